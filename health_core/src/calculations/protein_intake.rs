//! # Protein Intake Calculator
//!
//! Daily protein range in grams from a g/kg ratio table, with per-meal
//! amounts, a goal-based calorie split and food suggestions.
//!
//! ## Example
//!
//! ```rust
//! use health_core::calculations::protein_intake::calculate;
//! use health_core::input::CalculatorInput;
//!
//! let input = CalculatorInput::new()
//!     .with("gender", "male")
//!     .with("age", 30.0)
//!     .with("weight", 80.0);
//!
//! let result = calculate(&input);
//! assert_eq!(result.number("proteinLow"), Some(100.0));
//! assert_eq!(result.number("proteinHigh"), Some(132.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::format::{round_to, Formatter};
use crate::formulas::energy::{self, ActivityLevel, Gender};
use crate::formulas::macros::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::formulas::protein::{
    self, DietPreference, PregnancyStatus, ProteinGoal, ProteinRatio, TrainingType,
};
use crate::input::CalculatorInput;
use crate::locale::{fill_template, Translator};
use crate::result::{ChartSeriesPoint, FoodRow, ResultBuilder, ResultBundle, TableRow};
use crate::settings::EngineSettings;
use crate::units::Dimension;

const DEFAULT_SUMMARY: &str = "Aim for {low}–{high} of protein per day (about {perMeal} per meal).";

const MIN_MEALS: f64 = 1.0;
const MAX_MEALS: f64 = 8.0;

/// Typed inputs for the protein calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinInput {
    pub gender: Gender,
    pub age: f64,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub goal: ProteinGoal,
    pub activity: ActivityLevel,
    pub training: TrainingType,
    pub diet: DietPreference,
    pub meals_per_day: u32,
    pub pregnancy: PregnancyStatus,
    pub show_foods: bool,
    pub show_chart: bool,
}

impl ProteinInput {
    pub fn from_input(input: &CalculatorInput, settings: &EngineSettings) -> CalcResult<Self> {
        let gender = input.require_choice("gender", Gender::parse)?;
        let age = input.require_in_range("age", 15.0, 100.0)?;
        let weight_kg = input.require_measurement("weight", Dimension::Weight)?;

        let body_fat_pct = match input.number("bodyFat")? {
            Some(bf) if bf == 0.0 => None,
            Some(bf) if bf < 0.0 || bf >= 70.0 => {
                return Err(CalcError::out_of_range("bodyFat", bf, 0.0, 70.0));
            }
            other => other,
        };

        let meals = input.number_in_range_or(
            "mealsPerDay",
            settings.default_protein_meals as f64,
            MIN_MEALS,
            MAX_MEALS,
        )?;

        let mut pregnancy = input.choice_or("pregnancyStatus", PregnancyStatus::None, PregnancyStatus::parse)?;
        if gender == Gender::Male && pregnancy != PregnancyStatus::None {
            warn!(status = pregnancy.code(), "pregnancy status ignored for male profile");
            pregnancy = PregnancyStatus::None;
        }

        Ok(ProteinInput {
            gender,
            age,
            weight_kg,
            body_fat_pct,
            goal: input.choice_or("goal", ProteinGoal::default(), ProteinGoal::parse)?,
            activity: input.choice_or("activityLevel", settings.default_activity, ActivityLevel::parse)?,
            training: input.choice_or("trainingType", TrainingType::default(), TrainingType::parse)?,
            diet: input.choice_or("dietPreference", DietPreference::default(), DietPreference::parse)?,
            meals_per_day: meals.round() as u32,
            pregnancy,
            show_foods: input.toggle("showFoods"),
            show_chart: input.toggle("showChart"),
        })
    }
}

/// A low/mid/high gram triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GramRange {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl GramRange {
    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        GramRange {
            low: f(self.low),
            mid: f(self.mid),
            high: f(self.high),
        }
    }
}

/// Numeric outcome of the protein calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinResult {
    pub ratio: ProteinRatio,
    /// Weight the ratio is applied to (lean mass when body fat is known)
    pub reference_weight_kg: f64,
    pub lean_mass_kg: Option<f64>,
    /// Daily grams including the pregnancy extra
    pub daily: GramRange,
    pub pregnancy_extra: f64,
    pub per_meal: GramRange,
    pub total_calories: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    /// (protein %, carbs %, fat %)
    pub split: (f64, f64, f64),
}

pub fn compute(input: &ProteinInput) -> ProteinResult {
    let lean_mass_kg = input
        .body_fat_pct
        .map(|bf| energy::lean_mass(input.weight_kg, bf));
    let reference_weight_kg = lean_mass_kg.unwrap_or(input.weight_kg);

    let ratio = protein::protein_ratio(
        input.goal,
        input.activity,
        input.training,
        input.age,
        lean_mass_kg.is_some(),
    );

    let pregnancy_extra = input.pregnancy.extra_grams();
    let daily = GramRange {
        low: reference_weight_kg * ratio.low,
        mid: reference_weight_kg * ratio.mid(),
        high: reference_weight_kg * ratio.high,
    }
    .map(|g| g + pregnancy_extra);

    let meals = input.meals_per_day.max(1) as f64;
    let per_meal = daily.map(|g| g / meals);

    let split = input.goal.macro_split();
    let (protein_pct, carbs_pct, fat_pct) = split;
    let total_calories = daily.mid * KCAL_PER_G_PROTEIN / (protein_pct / 100.0);

    ProteinResult {
        ratio,
        reference_weight_kg,
        lean_mass_kg,
        daily,
        pregnancy_extra,
        per_meal,
        total_calories,
        carbs_g: total_calories * carbs_pct / 100.0 / KCAL_PER_G_CARBS,
        fat_g: total_calories * fat_pct / 100.0 / KCAL_PER_G_FAT,
        split,
    }
}

pub fn derive(input: &CalculatorInput, settings: &EngineSettings) -> CalcResult<ResultBundle> {
    let parsed = ProteinInput::from_input(input, settings)?;
    debug!(
        goal = parsed.goal.code(),
        training = parsed.training.code(),
        lean_mass = parsed.body_fat_pct.is_some(),
        "protein intake inputs validated"
    );
    let result = compute(&parsed);
    Ok(assemble(&parsed, &result, input.translator(), settings))
}

fn assemble(parsed: &ProteinInput, r: &ProteinResult, t: &dyn Translator, settings: &EngineSettings) -> ResultBundle {
    let f = Formatter::new(t, &settings.default_date_format);
    let daily = r.daily.map(f64::round);
    let per_meal = r.per_meal.map(f64::round);
    let (protein_pct, carbs_pct, fat_pct) = r.split;
    let lean = r.lean_mass_kg.map(|kg| round_to(kg, 1));
    let ratio_mid = r.ratio.mid();

    let mut b = ResultBuilder::new();
    b.metric("ratioLow", round_to(r.ratio.low, 2), f.with_unit(r.ratio.low, 2, "g/kg"))
        .metric("ratioHigh", round_to(r.ratio.high, 2), f.with_unit(r.ratio.high, 2, "g/kg"))
        .metric("ratioMid", round_to(ratio_mid, 2), f.with_unit(ratio_mid, 2, "g/kg"))
        .metric(
            "referenceWeight",
            round_to(r.reference_weight_kg, 1),
            f.kilograms(r.reference_weight_kg),
        )
        .metric("leanMass", lean, lean.map(|kg| f.kilograms(kg)).unwrap_or_default())
        .metric("proteinLow", daily.low, f.grams(daily.low))
        .metric("proteinHigh", daily.high, f.grams(daily.high))
        .metric("proteinMid", daily.mid, f.grams(daily.mid))
        .metric("pregnancyExtra", r.pregnancy_extra, f.grams(r.pregnancy_extra))
        .metric("perMealLow", per_meal.low, f.grams(per_meal.low))
        .metric("perMealHigh", per_meal.high, f.grams(per_meal.high))
        .metric("perMealMid", per_meal.mid, f.grams(per_meal.mid))
        .metric("mealsPerDay", parsed.meals_per_day as f64, f.number(parsed.meals_per_day as f64, 0))
        .metric("totalCalories", r.total_calories.round(), f.kcal(r.total_calories))
        .metric("carbsGrams", r.carbs_g.round(), f.grams(r.carbs_g))
        .metric("fatGrams", r.fat_g.round(), f.grams(r.fat_g))
        .metric("proteinPercent", protein_pct, f.percent(protein_pct))
        .metric("carbsPercent", carbs_pct, f.percent(carbs_pct))
        .metric("fatPercent", fat_pct, f.percent(fat_pct));

    if parsed.show_foods {
        let rows = protein::foods_for(parsed.diet)
            .map(|food| {
                TableRow::Food(FoodRow {
                    food: f.label(food.name),
                    serving: f.label(food.serving),
                    protein_per_serving: food.protein_g,
                    servings_per_day: round_to(r.daily.mid / food.protein_g, 1),
                })
            })
            .collect();
        b.table(rows);
    }

    if parsed.show_chart {
        let meal = f.label("Meal");
        let points = (1..=parsed.meals_per_day)
            .map(|i| ChartSeriesPoint::new(format!("{} {}", meal, i), round_to(r.per_meal.mid, 1)))
            .collect();
        b.chart(points);
    }

    let summary = fill_template(
        &t.template("proteinSummary", DEFAULT_SUMMARY),
        &[
            ("low", f.grams(daily.low)),
            ("high", f.grams(daily.high)),
            ("mid", f.grams(daily.mid)),
            ("perMeal", f.grams(per_meal.mid)),
            ("meals", parsed.meals_per_day.to_string()),
        ],
    );
    b.build(summary)
}

/// Protein calculator with default settings.
pub fn calculate(input: &CalculatorInput) -> ResultBundle {
    calculate_with_settings(input, &EngineSettings::default())
}

pub fn calculate_with_settings(input: &CalculatorInput, settings: &EngineSettings) -> ResultBundle {
    derive(input, settings).unwrap_or_else(|err| {
        debug!(error = %err, code = err.error_code(), "protein intake input rejected");
        ResultBundle::invalid()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> CalculatorInput {
        CalculatorInput::new()
            .with("gender", "male")
            .with("age", 30.0)
            .with("weight", 80.0)
    }

    #[test]
    fn test_defaults_maintain_moderate_mixed() {
        let result = calculate(&base_input());
        assert!(result.is_valid);
        // 1.2 + 0.05 .. 1.6 + 0.05
        assert_eq!(result.number("ratioLow"), Some(1.25));
        assert_eq!(result.number("ratioHigh"), Some(1.65));
        assert_eq!(result.number("ratioMid"), Some(1.45));
        assert_eq!(result.number("proteinLow"), Some(100.0));
        assert_eq!(result.number("proteinMid"), Some(116.0));
        assert_eq!(result.number("proteinHigh"), Some(132.0));
        assert_eq!(result.number("perMealMid"), Some(29.0));
        assert_eq!(result.number("mealsPerDay"), Some(4.0));
        // 116 × 4 / 0.25
        assert_eq!(result.number("totalCalories"), Some(1856.0));
        assert_eq!(result.number("carbsGrams"), Some(209.0));
        assert_eq!(result.number("fatGrams"), Some(62.0));
        assert!(result.value("leanMass").unwrap().is_null());
        assert_eq!(result.display("ratioLow"), "1.25 g/kg");
        assert_eq!(
            result.summary,
            "Aim for 100 g–132 g of protein per day (about 29 g per meal)."
        );
    }

    #[test]
    fn test_lean_mass_factor() {
        let result = calculate(&base_input().with("bodyFat", 20.0));
        assert_eq!(result.number("referenceWeight"), Some(64.0));
        assert_eq!(result.number("leanMass"), Some(64.0));
        // 1.25 × 1.15 = 1.4375
        assert!((result.number("ratioLow").unwrap() - 1.44).abs() < 0.011);
        assert_eq!(result.number("proteinLow"), Some(92.0));
        assert_eq!(result.number("proteinHigh"), Some(121.0));
    }

    #[test]
    fn test_pregnancy_extra_is_flat() {
        let input = base_input()
            .with("gender", "female")
            .with("pregnancyStatus", "trimester3");
        let result = calculate(&input);
        assert_eq!(result.number("pregnancyExtra"), Some(31.0));
        assert_eq!(result.number("proteinLow"), Some(131.0));
        assert_eq!(result.number("ratioLow"), Some(1.25));
    }

    #[test]
    fn test_pregnancy_ignored_for_male() {
        let result = calculate(&base_input().with("pregnancyStatus", "lactating"));
        assert_eq!(result.number("pregnancyExtra"), Some(0.0));
        assert_eq!(result.number("proteinLow"), Some(100.0));
    }

    #[test]
    fn test_range_ordering_for_sedentary_senior() {
        let input = base_input()
            .with("age", 80.0)
            .with("activityLevel", "sedentary")
            .with("trainingType", "none");
        let result = calculate(&input);
        let low = result.number("ratioLow").unwrap();
        let high = result.number("ratioHigh").unwrap();
        assert!(low >= 0.8);
        assert!(high >= low + 0.2 - 1e-9);
    }

    #[test]
    fn test_vegan_food_rows() {
        let result = calculate(&base_input().with("dietPreference", "vegan"));
        let rows = result.table_data();
        assert_eq!(rows.len(), 5);
        match &rows[0] {
            TableRow::Food(row) => {
                assert_eq!(row.food, "Seitan");
                // 116 / 25
                assert_eq!(row.servings_per_day, 4.6);
            }
            other => panic!("unexpected row {:?}", other),
        }
    }

    #[test]
    fn test_chart_has_one_point_per_meal() {
        let result = calculate(&base_input().with("mealsPerDay", 5.0));
        let chart = result.chart_data();
        assert_eq!(chart.len(), 5);
        assert_eq!(chart[0].category, "Meal 1");
        assert_eq!(chart[0].value, 23.2);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(calculate(&CalculatorInput::new()), ResultBundle::invalid());
        let err = derive(&base_input().with("mealsPerDay", 9.0), &EngineSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        let err = derive(&base_input().with("goal", "bulk"), &EngineSettings::default()).unwrap_err();
        assert_eq!(err.field(), Some("goal"));
        let err = derive(&base_input().with("weight", -5.0), &EngineSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_settings_meal_default_is_range_checked() {
        let settings = EngineSettings {
            default_protein_meals: 0,
            ..EngineSettings::default()
        };
        let err = derive(&base_input(), &settings).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        assert_eq!(err.field(), Some("mealsPerDay"));
        assert!(!calculate_with_settings(&base_input(), &settings).is_valid);
    }
}
