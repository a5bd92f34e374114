//! # Macro Split Calculator
//!
//! Daily calorie target and protein/carb/fat split with an optional meal plan.
//!
//! ## Pipeline
//!
//! 1. Validate and normalize inputs (weight → kg, height → cm)
//! 2. BMR: Mifflin-St Jeor always, Katch-McArdle when body fat is given
//!    (Katch-McArdle then drives TDEE)
//! 3. TDEE = BMR × activity multiplier
//! 4. Daily target = max(TDEE + goal delta, 1200)
//! 5. Ratio from diet type (custom ratios not summing to 100 fall back to 40/30/30)
//! 6. Grams per macro, meal plan rows, chart points, summary
//!
//! ## Example
//!
//! ```rust
//! use health_core::calculations::macro_split::calculate;
//! use health_core::input::CalculatorInput;
//!
//! let input = CalculatorInput::new()
//!     .with("gender", "male")
//!     .with("age", 30.0)
//!     .with("weight", 80.0)
//!     .with("height", 180.0)
//!     .with("activityLevel", "moderate")
//!     .with("goal", "maintain")
//!     .with("dietType", "balanced");
//!
//! let result = calculate(&input);
//! assert!(result.is_valid);
//! assert_eq!(result.number("bmrMifflin"), Some(1780.0));
//! assert_eq!(result.number("dailyCalories"), Some(2759.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::format::Formatter;
use crate::formulas::energy::{self, ActivityLevel, BmrEstimate, CalorieGoal, Gender};
use crate::formulas::macros::{self, DietType, MacroGrams, RatioOutcome, MAX_MEALS, MIN_MEALS};
use crate::input::CalculatorInput;
use crate::locale::{fill_template, Translator};
use crate::result::{ChartSeriesPoint, MealRow, ResultBuilder, ResultBundle, TableRow};
use crate::settings::EngineSettings;
use crate::units::Dimension;

const DEFAULT_SUMMARY: &str = "Eat {calories} per day: {protein} protein, {carbs} carbs and {fat} fat.";

/// Typed inputs for the macro calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroInput {
    pub gender: Gender,
    pub age: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    /// Body-fat percentage; `None` when not supplied or zero
    pub body_fat_pct: Option<f64>,
    pub activity: ActivityLevel,
    pub goal: CalorieGoal,
    pub diet: DietType,
    /// Custom (carbs, protein, fat) percentages
    pub custom: (Option<f64>, Option<f64>, Option<f64>),
    pub meals_per_day: u32,
    pub show_metabolic: bool,
    pub show_meal_plan: bool,
    pub show_chart: bool,
}

impl MacroInput {
    /// Parse and validate a raw input bundle.
    pub fn from_input(input: &CalculatorInput, settings: &EngineSettings) -> CalcResult<Self> {
        let gender = input.require_choice("gender", Gender::parse)?;
        let age = input.require_in_range("age", 15.0, 100.0)?;
        let weight_kg = input.require_measurement("weight", Dimension::Weight)?;
        let height_cm = input.require_measurement("height", Dimension::Height)?;

        let body_fat_pct = match input.number("bodyFat")? {
            Some(bf) if bf == 0.0 => None,
            Some(bf) if bf < 0.0 || bf >= 70.0 => {
                return Err(CalcError::out_of_range("bodyFat", bf, 0.0, 70.0));
            }
            other => other,
        };

        let meals = input.number_in_range_or(
            "mealsPerDay",
            settings.default_macro_meals as f64,
            MIN_MEALS as f64,
            MAX_MEALS as f64,
        )?;

        Ok(MacroInput {
            gender,
            age,
            weight_kg,
            height_cm,
            body_fat_pct,
            activity: input.choice_or("activityLevel", settings.default_activity, ActivityLevel::parse)?,
            goal: input.choice_or("goal", CalorieGoal::default(), CalorieGoal::parse)?,
            diet: input.choice_or("dietType", DietType::default(), DietType::parse)?,
            custom: (
                input.number("customCarbs")?,
                input.number("customProtein")?,
                input.number("customFat")?,
            ),
            meals_per_day: meals.round() as u32,
            show_metabolic: input.toggle("showMetabolic"),
            show_meal_plan: input.toggle("showMealPlan"),
            show_chart: input.toggle("showChart"),
        })
    }
}

/// Numeric outcome of the macro calculator, before formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroResult {
    pub bmr: BmrEstimate,
    pub tdee: f64,
    pub goal_adjustment: f64,
    /// Whole kcal, floored at 1200
    pub daily_calories: f64,
    pub ratio: RatioOutcome,
    /// Split of `daily_calories`, unrounded
    pub grams: MacroGrams,
    /// Meal rows followed by the Total row (labels untranslated)
    pub meals: Vec<MealRow>,
}

impl MacroResult {
    pub fn protein_g(&self) -> f64 {
        self.grams.protein_g.round()
    }

    pub fn carbs_g(&self) -> f64 {
        self.grams.carbs_g.round()
    }

    pub fn fat_g(&self) -> f64 {
        self.grams.fat_g.round()
    }
}

/// Run the macro formulas on validated inputs.
pub fn compute(input: &MacroInput) -> MacroResult {
    let bmr = BmrEstimate::new(
        input.gender,
        input.age,
        input.weight_kg,
        input.height_cm,
        input.body_fat_pct,
    );
    let tdee = energy::tdee(bmr.active_bmr(), input.activity);
    let daily_calories = energy::daily_calorie_target(tdee, input.goal).round();

    let ratio = macros::resolve_ratio(input.diet, input.custom);
    if let RatioOutcome::FallbackUsed { reason, .. } = &ratio {
        warn!(reason = %reason, "custom macro ratio rejected, using default split");
    }
    let grams = macros::split_calories(daily_calories, ratio.ratio());

    let mut result = MacroResult {
        bmr,
        tdee,
        goal_adjustment: input.goal.calorie_delta(),
        daily_calories,
        ratio,
        grams,
        meals: Vec::new(),
    };
    result.meals = meal_plan(&result, input.meals_per_day);
    result
}

/// Per-meal rows plus a Total row.
///
/// Each macro is weighted and rounded per meal independently. The Total row
/// is the daily figure itself, so it may differ from the column sums by a
/// gram or two.
pub fn meal_plan(result: &MacroResult, meals: u32) -> Vec<MealRow> {
    let (Some(weights), Some(labels)) = (macros::meal_weights(meals), macros::meal_labels(meals)) else {
        return Vec::new();
    };
    let (protein, carbs, fat) = (result.protein_g(), result.carbs_g(), result.fat_g());

    let mut rows: Vec<MealRow> = weights
        .iter()
        .zip(labels)
        .map(|(weight, label)| MealRow {
            meal: label.to_string(),
            calories: (result.daily_calories * weight).round(),
            protein: (protein * weight).round(),
            carbs: (carbs * weight).round(),
            fat: (fat * weight).round(),
        })
        .collect();

    rows.push(MealRow {
        meal: "Total".to_string(),
        calories: result.daily_calories,
        protein,
        carbs,
        fat,
    });
    rows
}

/// Fallible pipeline: input bundle to result bundle.
pub fn derive(input: &CalculatorInput, settings: &EngineSettings) -> CalcResult<ResultBundle> {
    let parsed = MacroInput::from_input(input, settings)?;
    debug!(
        diet = parsed.diet.code(),
        goal = parsed.goal.code(),
        body_fat = parsed.body_fat_pct.is_some(),
        "macro split inputs validated"
    );
    let result = compute(&parsed);
    Ok(assemble(&parsed, &result, input.translator(), settings))
}

fn assemble(parsed: &MacroInput, result: &MacroResult, t: &dyn Translator, settings: &EngineSettings) -> ResultBundle {
    let f = Formatter::new(t, &settings.default_date_format);
    let metabolic = parsed.show_metabolic;
    let ratio = result.ratio.ratio();

    let bmr_mifflin = result.bmr.mifflin_st_jeor.round();
    let bmr_katch = result.bmr.katch_mcardle.map(f64::round);
    let lean_mass = result.bmr.lean_mass_kg.map(|kg| (kg * 10.0).round() / 10.0);
    let bmr_active = result.bmr.active_bmr().round();
    let tdee = result.tdee.round();

    let mut b = ResultBuilder::new();
    b.metric_if("bmrMifflin", bmr_mifflin, f.kcal(bmr_mifflin), metabolic)
        .metric_if(
            "bmrKatchMcArdle",
            bmr_katch,
            bmr_katch.map(|v| f.kcal(v)).unwrap_or_default(),
            metabolic,
        )
        .metric_if("bmr", bmr_active, f.kcal(bmr_active), metabolic)
        .metric(
            "bmrFormula",
            result.bmr.active.code(),
            f.label(result.bmr.active.display_name()),
        )
        .metric_if(
            "leanMass",
            lean_mass,
            lean_mass.map(|v| f.kilograms(v)).unwrap_or_default(),
            metabolic,
        )
        .metric_if("tdee", tdee, f.kcal(tdee), metabolic)
        .metric("goalAdjustment", result.goal_adjustment, signed_kcal(&f, result.goal_adjustment))
        .metric("dailyCalories", result.daily_calories, f.kcal(result.daily_calories))
        .metric("proteinGrams", result.protein_g(), f.grams(result.protein_g()))
        .metric("carbsGrams", result.carbs_g(), f.grams(result.carbs_g()))
        .metric("fatGrams", result.fat_g(), f.grams(result.fat_g()))
        .metric("proteinCalories", result.grams.protein_kcal.round(), f.kcal(result.grams.protein_kcal))
        .metric("carbsCalories", result.grams.carbs_kcal.round(), f.kcal(result.grams.carbs_kcal))
        .metric("fatCalories", result.grams.fat_kcal.round(), f.kcal(result.grams.fat_kcal))
        .metric("proteinPercent", ratio.protein_pct, f.percent(ratio.protein_pct))
        .metric("carbsPercent", ratio.carbs_pct, f.percent(ratio.carbs_pct))
        .metric("fatPercent", ratio.fat_pct, f.percent(ratio.fat_pct))
        .metric("ratioSource", result.ratio.code(), f.label(ratio_source_label(&result.ratio)))
        .metric("mealsPerDay", parsed.meals_per_day as f64, f.number(parsed.meals_per_day as f64, 0));

    if parsed.show_meal_plan {
        let rows = result
            .meals
            .iter()
            .map(|row| {
                TableRow::Meal(MealRow {
                    meal: f.label(&row.meal),
                    ..row.clone()
                })
            })
            .collect();
        b.table(rows);
    }

    if parsed.show_chart {
        b.chart(vec![
            ChartSeriesPoint::new(f.label("Protein"), result.grams.protein_kcal.round()),
            ChartSeriesPoint::new(f.label("Carbs"), result.grams.carbs_kcal.round()),
            ChartSeriesPoint::new(f.label("Fat"), result.grams.fat_kcal.round()),
        ]);
    }

    let summary = fill_template(
        &t.template("macroSummary", DEFAULT_SUMMARY),
        &[
            ("calories", f.kcal(result.daily_calories)),
            ("protein", f.grams(result.protein_g())),
            ("carbs", f.grams(result.carbs_g())),
            ("fat", f.grams(result.fat_g())),
            ("tdee", f.kcal(tdee)),
        ],
    );
    b.build(summary)
}

fn signed_kcal(f: &Formatter<'_>, value: f64) -> String {
    if value > 0.0 {
        format!("+{}", f.kcal(value))
    } else {
        f.kcal(value)
    }
}

fn ratio_source_label(outcome: &RatioOutcome) -> &'static str {
    match outcome {
        RatioOutcome::Preset(_) => "Preset",
        RatioOutcome::Custom(_) => "Custom",
        RatioOutcome::FallbackUsed { .. } => "Default (custom values must add up to 100%)",
    }
}

/// Macro calculator with default settings.
pub fn calculate(input: &CalculatorInput) -> ResultBundle {
    calculate_with_settings(input, &EngineSettings::default())
}

/// Macro calculator; any input error yields the invalid bundle.
pub fn calculate_with_settings(input: &CalculatorInput, settings: &EngineSettings) -> ResultBundle {
    derive(input, settings).unwrap_or_else(|err| {
        debug!(error = %err, code = err.error_code(), "macro split input rejected");
        ResultBundle::invalid()
    })
}
