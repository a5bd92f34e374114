//! # Protein Requirements
//!
//! Goal-based g/kg ranges, additive adjustments, pregnancy/lactation
//! extras and the protein food table used for the suggestions list.
//!
//! Order of operations for the g/kg range:
//!
//! 1. base `[low, high]` by goal
//! 2. + activity adjustment, + training adjustment
//! 3. age bracket (≥65: +0.1 with floors 1.0/1.2, ≥50: +0.05)
//! 4. × 1.15 on both bounds when body fat (lean mass) is used
//! 5. clamp `low ≥ 0.8`, `high ≥ low + 0.2`

use serde::{Deserialize, Serialize};

use super::energy::ActivityLevel;

/// Multiplier applied to both bounds when requirements are based on lean mass
pub const LEAN_MASS_FACTOR: f64 = 1.15;
/// Lowest allowed lower bound (g/kg)
pub const MIN_RATIO: f64 = 0.8;
/// Minimum width of the range (g/kg)
pub const MIN_RANGE_WIDTH: f64 = 0.2;

/// Primary goal for the protein calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProteinGoal {
    Muscle,
    Loss,
    #[default]
    Maintain,
    Recomp,
}

impl ProteinGoal {
    pub const ALL: [ProteinGoal; 4] = [
        ProteinGoal::Muscle,
        ProteinGoal::Loss,
        ProteinGoal::Maintain,
        ProteinGoal::Recomp,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|goal| goal.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProteinGoal::Muscle => "muscle",
            ProteinGoal::Loss => "loss",
            ProteinGoal::Maintain => "maintain",
            ProteinGoal::Recomp => "recomp",
        }
    }

    /// Base g/kg range `(low, high)`
    pub fn base_range(&self) -> (f64, f64) {
        match self {
            ProteinGoal::Muscle => (1.6, 2.2),
            ProteinGoal::Loss => (1.8, 2.7),
            ProteinGoal::Maintain => (1.2, 1.6),
            ProteinGoal::Recomp => (1.6, 2.2),
        }
    }

    /// Calorie split (protein %, carbs %, fat %) associated with the goal
    pub fn macro_split(&self) -> (f64, f64, f64) {
        match self {
            ProteinGoal::Muscle => (30.0, 45.0, 25.0),
            ProteinGoal::Loss => (40.0, 30.0, 30.0),
            ProteinGoal::Maintain => (25.0, 45.0, 30.0),
            ProteinGoal::Recomp => (35.0, 35.0, 30.0),
        }
    }
}

/// Dominant training style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TrainingType {
    None,
    Endurance,
    #[default]
    Mixed,
    Strength,
    Power,
}

impl TrainingType {
    pub const ALL: [TrainingType; 5] = [
        TrainingType::None,
        TrainingType::Endurance,
        TrainingType::Mixed,
        TrainingType::Strength,
        TrainingType::Power,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            TrainingType::None => "none",
            TrainingType::Endurance => "endurance",
            TrainingType::Mixed => "mixed",
            TrainingType::Strength => "strength",
            TrainingType::Power => "power",
        }
    }

    /// Additive g/kg adjustment
    pub fn adjustment(&self) -> f64 {
        match self {
            TrainingType::None => -0.1,
            TrainingType::Endurance => 0.0,
            TrainingType::Mixed => 0.05,
            TrainingType::Strength => 0.1,
            TrainingType::Power => 0.1,
        }
    }
}

/// Diet preference, used to filter protein food suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DietPreference {
    #[default]
    Omnivore,
    Pescatarian,
    Vegetarian,
    Vegan,
}

impl DietPreference {
    pub const ALL: [DietPreference; 4] = [
        DietPreference::Omnivore,
        DietPreference::Pescatarian,
        DietPreference::Vegetarian,
        DietPreference::Vegan,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            DietPreference::Omnivore => "omnivore",
            DietPreference::Pescatarian => "pescatarian",
            DietPreference::Vegetarian => "vegetarian",
            DietPreference::Vegan => "vegan",
        }
    }

    /// Whether a food of the given category fits this diet
    pub fn allows(&self, category: FoodCategory) -> bool {
        match self {
            DietPreference::Omnivore => true,
            DietPreference::Pescatarian => category != FoodCategory::Meat,
            DietPreference::Vegetarian => matches!(category, FoodCategory::DairyEgg | FoodCategory::Plant),
            DietPreference::Vegan => category == FoodCategory::Plant,
        }
    }
}

/// Pregnancy or lactation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PregnancyStatus {
    #[default]
    None,
    Trimester1,
    Trimester2,
    Trimester3,
    Lactating,
}

impl PregnancyStatus {
    pub const ALL: [PregnancyStatus; 5] = [
        PregnancyStatus::None,
        PregnancyStatus::Trimester1,
        PregnancyStatus::Trimester2,
        PregnancyStatus::Trimester3,
        PregnancyStatus::Lactating,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            PregnancyStatus::None => "none",
            PregnancyStatus::Trimester1 => "trimester1",
            PregnancyStatus::Trimester2 => "trimester2",
            PregnancyStatus::Trimester3 => "trimester3",
            PregnancyStatus::Lactating => "lactating",
        }
    }

    /// Flat daily grams added on top of the computed range
    pub fn extra_grams(&self) -> f64 {
        match self {
            PregnancyStatus::None => 0.0,
            PregnancyStatus::Trimester1 => 1.0,
            PregnancyStatus::Trimester2 => 10.0,
            PregnancyStatus::Trimester3 => 31.0,
            PregnancyStatus::Lactating => 19.0,
        }
    }
}

/// A g/kg protein range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinRatio {
    pub low: f64,
    pub high: f64,
}

impl ProteinRatio {
    pub fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Age bracket adjustment applied to `(low, high)`
pub fn age_adjusted(age: f64, low: f64, high: f64) -> (f64, f64) {
    if age >= 65.0 {
        ((low + 0.1).max(1.0), (high + 0.1).max(1.2))
    } else if age >= 50.0 {
        (low + 0.05, high + 0.05)
    } else {
        (low, high)
    }
}

/// Full g/kg range for the given profile.
pub fn protein_ratio(
    goal: ProteinGoal,
    activity: ActivityLevel,
    training: TrainingType,
    age: f64,
    lean_mass_used: bool,
) -> ProteinRatio {
    let (mut low, mut high) = goal.base_range();

    let adjustment = activity.protein_adjustment() + training.adjustment();
    low += adjustment;
    high += adjustment;

    (low, high) = age_adjusted(age, low, high);

    if lean_mass_used {
        low *= LEAN_MASS_FACTOR;
        high *= LEAN_MASS_FACTOR;
    }

    let low = low.max(MIN_RATIO);
    let high = high.max(low + MIN_RANGE_WIDTH);
    ProteinRatio { low, high }
}

/// Broad source category of a protein food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodCategory {
    Meat,
    Seafood,
    DairyEgg,
    Plant,
}

/// One entry of the protein food table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProteinFood {
    /// Label key (translated by the caller)
    pub name: &'static str,
    /// Serving description label key
    pub serving: &'static str,
    /// Protein per serving (g)
    pub protein_g: f64,
    pub category: FoodCategory,
}

/// Common protein sources, richest first within each category
pub const PROTEIN_FOODS: [ProteinFood; 14] = [
    ProteinFood { name: "Chicken breast", serving: "100 g cooked", protein_g: 31.0, category: FoodCategory::Meat },
    ProteinFood { name: "Turkey", serving: "100 g cooked", protein_g: 29.0, category: FoodCategory::Meat },
    ProteinFood { name: "Lean beef", serving: "100 g cooked", protein_g: 26.0, category: FoodCategory::Meat },
    ProteinFood { name: "Tuna", serving: "100 g canned", protein_g: 25.0, category: FoodCategory::Seafood },
    ProteinFood { name: "Shrimp", serving: "100 g cooked", protein_g: 24.0, category: FoodCategory::Seafood },
    ProteinFood { name: "Salmon", serving: "100 g cooked", protein_g: 22.0, category: FoodCategory::Seafood },
    ProteinFood { name: "Cottage cheese", serving: "200 g", protein_g: 24.0, category: FoodCategory::DairyEgg },
    ProteinFood { name: "Greek yogurt", serving: "200 g", protein_g: 20.0, category: FoodCategory::DairyEgg },
    ProteinFood { name: "Eggs", serving: "2 large", protein_g: 12.0, category: FoodCategory::DairyEgg },
    ProteinFood { name: "Seitan", serving: "100 g", protein_g: 25.0, category: FoodCategory::Plant },
    ProteinFood { name: "Tempeh", serving: "100 g", protein_g: 19.0, category: FoodCategory::Plant },
    ProteinFood { name: "Tofu", serving: "150 g firm", protein_g: 18.0, category: FoodCategory::Plant },
    ProteinFood { name: "Lentils", serving: "200 g cooked", protein_g: 18.0, category: FoodCategory::Plant },
    ProteinFood { name: "Chickpeas", serving: "200 g cooked", protein_g: 17.0, category: FoodCategory::Plant },
];

/// Foods compatible with a diet preference
pub fn foods_for(preference: DietPreference) -> impl Iterator<Item = &'static ProteinFood> {
    PROTEIN_FOODS.iter().filter(move |food| preference.allows(food.category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_ranges() {
        assert_eq!(ProteinGoal::Muscle.base_range(), (1.6, 2.2));
        assert_eq!(ProteinGoal::Loss.base_range(), (1.8, 2.7));
        assert_eq!(ProteinGoal::Maintain.base_range(), (1.2, 1.6));
        assert_eq!(ProteinGoal::Recomp.base_range(), (1.6, 2.2));
    }

    #[test]
    fn test_macro_splits_sum_to_100() {
        for goal in ProteinGoal::ALL {
            let (p, c, f) = goal.macro_split();
            assert_eq!(p + c + f, 100.0, "{:?}", goal);
        }
    }

    #[test]
    fn test_neutral_profile_keeps_base_range() {
        let ratio = protein_ratio(
            ProteinGoal::Maintain,
            ActivityLevel::Moderate,
            TrainingType::Endurance,
            30.0,
            false,
        );
        assert!((ratio.low - 1.2).abs() < 1e-9);
        assert!((ratio.high - 1.6).abs() < 1e-9);
        assert!((ratio.mid() - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_adjustments_stack() {
        // 1.6/2.2 + 0.3 (extra active) + 0.1 (strength)
        let ratio = protein_ratio(
            ProteinGoal::Muscle,
            ActivityLevel::ExtraActive,
            TrainingType::Strength,
            30.0,
            false,
        );
        assert!((ratio.low - 2.0).abs() < 1e-9);
        assert!((ratio.high - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_senior_floors() {
        // 1.2/1.6 − 0.2 − 0.1 = 0.9/1.3, then +0.1 → 1.0/1.4
        let ratio = protein_ratio(
            ProteinGoal::Maintain,
            ActivityLevel::Sedentary,
            TrainingType::None,
            70.0,
            false,
        );
        assert!((ratio.low - 1.0).abs() < 1e-9);
        assert!((ratio.high - 1.4).abs() < 1e-9);

        assert_eq!(age_adjusted(70.0, 0.5, 0.6), (1.0, 1.2));
        let (low, high) = age_adjusted(55.0, 1.0, 1.5);
        assert!((low - 1.05).abs() < 1e-9);
        assert!((high - 1.55).abs() < 1e-9);
        assert_eq!(age_adjusted(30.0, 1.0, 1.5), (1.0, 1.5));
    }

    #[test]
    fn test_lean_mass_factor() {
        let plain = protein_ratio(ProteinGoal::Loss, ActivityLevel::Moderate, TrainingType::Endurance, 30.0, false);
        let lean = protein_ratio(ProteinGoal::Loss, ActivityLevel::Moderate, TrainingType::Endurance, 30.0, true);
        assert!((lean.low - plain.low * LEAN_MASS_FACTOR).abs() < 1e-9);
        assert!((lean.high - plain.high * LEAN_MASS_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_range_never_degenerate() {
        for goal in ProteinGoal::ALL {
            for activity in ActivityLevel::ALL {
                for training in TrainingType::ALL {
                    for age in [18.0, 52.0, 80.0] {
                        for lean in [false, true] {
                            let r = protein_ratio(goal, activity, training, age, lean);
                            assert!(r.low >= MIN_RATIO);
                            assert!(r.high >= r.low + MIN_RANGE_WIDTH - 1e-12);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_pregnancy_extras() {
        assert_eq!(PregnancyStatus::Trimester1.extra_grams(), 1.0);
        assert_eq!(PregnancyStatus::Trimester2.extra_grams(), 10.0);
        assert_eq!(PregnancyStatus::Trimester3.extra_grams(), 31.0);
        assert_eq!(PregnancyStatus::Lactating.extra_grams(), 19.0);
        assert_eq!(PregnancyStatus::None.extra_grams(), 0.0);
    }

    #[test]
    fn test_food_filters() {
        assert_eq!(foods_for(DietPreference::Omnivore).count(), PROTEIN_FOODS.len());
        assert!(foods_for(DietPreference::Vegan).all(|f| f.category == FoodCategory::Plant));
        assert!(foods_for(DietPreference::Vegetarian).any(|f| f.name == "Eggs"));
        assert!(foods_for(DietPreference::Pescatarian).any(|f| f.name == "Salmon"));
        assert!(!foods_for(DietPreference::Pescatarian).any(|f| f.name == "Lean beef"));
    }

    #[test]
    fn test_foods_richest_first_within_category() {
        for pair in PROTEIN_FOODS.windows(2) {
            if pair[0].category == pair[1].category {
                assert!(pair[0].protein_g >= pair[1].protein_g, "{} before {}", pair[0].name, pair[1].name);
            }
        }
        let first = foods_for(DietPreference::Vegan).next().unwrap();
        assert_eq!(first.name, "Seitan");
    }
}
