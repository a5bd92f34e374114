//! # Macronutrient Ratios
//!
//! Diet-type ratio table, custom ratio resolution and per-meal weight
//! vectors for the macro calculator.

use serde::{Deserialize, Serialize};

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Smallest and largest supported meal plans
pub const MIN_MEALS: u32 = 3;
pub const MAX_MEALS: u32 = 6;

/// Percentage split of daily calories (carbs, protein, fat)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatio {
    pub carbs_pct: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
}

impl MacroRatio {
    pub const fn new(carbs_pct: f64, protein_pct: f64, fat_pct: f64) -> Self {
        MacroRatio {
            carbs_pct,
            protein_pct,
            fat_pct,
        }
    }

    /// Fallback for custom ratios that do not add up
    pub const DEFAULT: MacroRatio = MacroRatio::new(40.0, 30.0, 30.0);

    pub fn total(&self) -> f64 {
        self.carbs_pct + self.protein_pct + self.fat_pct
    }
}

/// Preset diet types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DietType {
    #[default]
    Balanced,
    LowCarb,
    HighProtein,
    Keto,
    LowFat,
    Mediterranean,
    Paleo,
    Custom,
}

impl DietType {
    pub const ALL: [DietType; 8] = [
        DietType::Balanced,
        DietType::LowCarb,
        DietType::HighProtein,
        DietType::Keto,
        DietType::LowFat,
        DietType::Mediterranean,
        DietType::Paleo,
        DietType::Custom,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|diet| diet.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            DietType::Balanced => "balanced",
            DietType::LowCarb => "lowCarb",
            DietType::HighProtein => "highProtein",
            DietType::Keto => "keto",
            DietType::LowFat => "lowFat",
            DietType::Mediterranean => "mediterranean",
            DietType::Paleo => "paleo",
            DietType::Custom => "custom",
        }
    }

    /// Fixed ratio for presets; `None` for `Custom`
    pub fn preset_ratio(&self) -> Option<MacroRatio> {
        let ratio = match self {
            DietType::Balanced => MacroRatio::new(40.0, 30.0, 30.0),
            DietType::LowCarb => MacroRatio::new(25.0, 40.0, 35.0),
            DietType::HighProtein => MacroRatio::new(35.0, 40.0, 25.0),
            DietType::Keto => MacroRatio::new(5.0, 25.0, 70.0),
            DietType::LowFat => MacroRatio::new(60.0, 20.0, 20.0),
            DietType::Mediterranean => MacroRatio::new(45.0, 20.0, 35.0),
            DietType::Paleo => MacroRatio::new(30.0, 35.0, 35.0),
            DietType::Custom => return None,
        };
        Some(ratio)
    }
}

/// How the ratio in use was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum RatioOutcome {
    /// Fixed ratio of a preset diet type
    Preset(MacroRatio),
    /// User percentages that summed to exactly 100
    Custom(MacroRatio),
    /// User percentages rejected; default ratio substituted
    FallbackUsed { ratio: MacroRatio, reason: String },
}

impl RatioOutcome {
    pub fn ratio(&self) -> MacroRatio {
        match self {
            RatioOutcome::Preset(r) | RatioOutcome::Custom(r) => *r,
            RatioOutcome::FallbackUsed { ratio, .. } => *ratio,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RatioOutcome::Preset(_) => "preset",
            RatioOutcome::Custom(_) => "custom",
            RatioOutcome::FallbackUsed { .. } => "fallback",
        }
    }
}

/// Resolve the ratio for a diet type.
///
/// Custom percentages are used only when all three are present, non-negative
/// and sum to exactly 100; anything else falls back to [`MacroRatio::DEFAULT`].
pub fn resolve_ratio(diet: DietType, custom: (Option<f64>, Option<f64>, Option<f64>)) -> RatioOutcome {
    if let Some(preset) = diet.preset_ratio() {
        return RatioOutcome::Preset(preset);
    }

    let (carbs, protein, fat) = custom;
    let (Some(carbs), Some(protein), Some(fat)) = (carbs, protein, fat) else {
        return RatioOutcome::FallbackUsed {
            ratio: MacroRatio::DEFAULT,
            reason: "custom percentages incomplete".to_string(),
        };
    };
    if carbs < 0.0 || protein < 0.0 || fat < 0.0 {
        return RatioOutcome::FallbackUsed {
            ratio: MacroRatio::DEFAULT,
            reason: "custom percentages negative".to_string(),
        };
    }
    let ratio = MacroRatio::new(carbs, protein, fat);
    if (ratio.total() - 100.0).abs() > 1e-9 {
        return RatioOutcome::FallbackUsed {
            ratio: MacroRatio::DEFAULT,
            reason: format!("custom percentages sum to {}", ratio.total()),
        };
    }
    RatioOutcome::Custom(ratio)
}

/// Daily calories and grams per macro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein_kcal: f64,
    pub carbs_kcal: f64,
    pub fat_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Split a calorie target by ratio.
///
/// Fat calories are the remainder of the total so the three macro calorie
/// figures always add back up to `calories`.
pub fn split_calories(calories: f64, ratio: MacroRatio) -> MacroGrams {
    let protein_kcal = calories * ratio.protein_pct / 100.0;
    let carbs_kcal = calories * ratio.carbs_pct / 100.0;
    let fat_kcal = calories - protein_kcal - carbs_kcal;
    MacroGrams {
        protein_kcal,
        carbs_kcal,
        fat_kcal,
        protein_g: protein_kcal / KCAL_PER_G_PROTEIN,
        carbs_g: carbs_kcal / KCAL_PER_G_CARBS,
        fat_g: fat_kcal / KCAL_PER_G_FAT,
    }
}

/// Per-meal share of the day, one vector per meal count
pub fn meal_weights(meals: u32) -> Option<&'static [f64]> {
    match meals {
        3 => Some(&[0.30, 0.40, 0.30]),
        4 => Some(&[0.25, 0.35, 0.10, 0.30]),
        5 => Some(&[0.25, 0.10, 0.30, 0.10, 0.25]),
        6 => Some(&[0.20, 0.10, 0.25, 0.10, 0.25, 0.10]),
        _ => None,
    }
}

/// Label keys for each slot of a meal plan (translated by the caller)
pub fn meal_labels(meals: u32) -> Option<&'static [&'static str]> {
    match meals {
        3 => Some(&["Breakfast", "Lunch", "Dinner"]),
        4 => Some(&["Breakfast", "Lunch", "Snack", "Dinner"]),
        5 => Some(&["Breakfast", "Snack 1", "Lunch", "Snack 2", "Dinner"]),
        6 => Some(&["Breakfast", "Snack 1", "Lunch", "Snack 2", "Dinner", "Snack 3"]),
        _ => None,
    }
}
