//! # Energy Expenditure
//!
//! BMR and TDEE formulas with their lookup tables.
//!
//! - Mifflin-St Jeor (1990): `10·kg + 6.25·cm − 5·age + s`, s = +5 male / −161 female
//! - Katch-McArdle: `370 + 21.6·lean_kg`, needs a body-fat estimate
//! - TDEE = active BMR × activity multiplier
//! - Daily target = max(TDEE + goal delta, 1200 kcal)

use serde::{Deserialize, Serialize};

/// Lowest daily calorie target the engine will ever return (kcal)
pub const CALORIE_FLOOR: f64 = 1200.0;

/// Biological sex used by sex-specific formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "male" | "m" | "man" => Some(Gender::Male),
            "female" | "f" | "woman" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Mifflin-St Jeor additive constant
    pub fn mifflin_constant(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

/// Activity level for TDEE and protein adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    /// Desk job, little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Hard daily exercise plus physical job
    VeryActive,
    /// Athlete training twice a day
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 6] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "veryActive",
            ActivityLevel::ExtraActive => "extraActive",
        }
    }

    /// TDEE multiplier
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
            ActivityLevel::ExtraActive => 2.2,
        }
    }

    /// Additive g/kg protein adjustment
    pub fn protein_adjustment(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => -0.2,
            ActivityLevel::Light => -0.1,
            ActivityLevel::Moderate => 0.0,
            ActivityLevel::Active => 0.1,
            ActivityLevel::VeryActive => 0.2,
            ActivityLevel::ExtraActive => 0.3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Lightly active",
            ActivityLevel::Moderate => "Moderately active",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very active",
            ActivityLevel::ExtraActive => "Extra active",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Weight goal with a fixed daily calorie delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CalorieGoal {
    ExtremeLoss,
    Loss,
    MildLoss,
    #[default]
    Maintain,
    MildGain,
    Gain,
    ExtremeGain,
}

impl CalorieGoal {
    pub const ALL: [CalorieGoal; 7] = [
        CalorieGoal::ExtremeLoss,
        CalorieGoal::Loss,
        CalorieGoal::MildLoss,
        CalorieGoal::Maintain,
        CalorieGoal::MildGain,
        CalorieGoal::Gain,
        CalorieGoal::ExtremeGain,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|goal| goal.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            CalorieGoal::ExtremeLoss => "extremeLoss",
            CalorieGoal::Loss => "loss",
            CalorieGoal::MildLoss => "mildLoss",
            CalorieGoal::Maintain => "maintain",
            CalorieGoal::MildGain => "mildGain",
            CalorieGoal::Gain => "gain",
            CalorieGoal::ExtremeGain => "extremeGain",
        }
    }

    /// Daily calorie delta (kcal/day)
    pub fn calorie_delta(&self) -> f64 {
        match self {
            CalorieGoal::ExtremeLoss => -1000.0,
            CalorieGoal::Loss => -500.0,
            CalorieGoal::MildLoss => -250.0,
            CalorieGoal::Maintain => 0.0,
            CalorieGoal::MildGain => 250.0,
            CalorieGoal::Gain => 500.0,
            CalorieGoal::ExtremeGain => 1000.0,
        }
    }
}

/// Which formula produced the BMR that drives TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BmrFormula {
    MifflinStJeor,
    KatchMcArdle,
}

impl BmrFormula {
    pub fn code(&self) -> &'static str {
        match self {
            BmrFormula::MifflinStJeor => "mifflinStJeor",
            BmrFormula::KatchMcArdle => "katchMcArdle",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmrFormula::MifflinStJeor => "Mifflin-St Jeor",
            BmrFormula::KatchMcArdle => "Katch-McArdle",
        }
    }
}

/// Both BMR estimates plus the one selected for TDEE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrEstimate {
    pub mifflin_st_jeor: f64,
    pub katch_mcardle: Option<f64>,
    pub lean_mass_kg: Option<f64>,
    pub active: BmrFormula,
}

impl BmrEstimate {
    /// Katch-McArdle wins whenever a body-fat percentage was supplied.
    pub fn new(gender: Gender, age: f64, weight_kg: f64, height_cm: f64, body_fat_pct: Option<f64>) -> Self {
        let mifflin = mifflin_st_jeor(gender, age, weight_kg, height_cm);
        let lean = body_fat_pct
            .filter(|bf| *bf > 0.0)
            .map(|bf| lean_mass(weight_kg, bf));
        let katch = lean.map(katch_mcardle);
        BmrEstimate {
            mifflin_st_jeor: mifflin,
            katch_mcardle: katch,
            lean_mass_kg: lean,
            active: if katch.is_some() {
                BmrFormula::KatchMcArdle
            } else {
                BmrFormula::MifflinStJeor
            },
        }
    }

    /// The BMR used for TDEE
    pub fn active_bmr(&self) -> f64 {
        match (self.active, self.katch_mcardle) {
            (BmrFormula::KatchMcArdle, Some(katch)) => katch,
            _ => self.mifflin_st_jeor,
        }
    }
}

/// Mifflin-St Jeor BMR (kcal/day)
pub fn mifflin_st_jeor(gender: Gender, age: f64, weight_kg: f64, height_cm: f64) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + gender.mifflin_constant()
}

/// Katch-McArdle BMR from lean body mass (kcal/day)
pub fn katch_mcardle(lean_mass_kg: f64) -> f64 {
    370.0 + 21.6 * lean_mass_kg
}

/// Lean body mass from total weight and body-fat percentage
pub fn lean_mass(weight_kg: f64, body_fat_pct: f64) -> f64 {
    weight_kg * (1.0 - body_fat_pct / 100.0)
}

/// TDEE = BMR × activity multiplier
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// Goal-adjusted daily calories, never below [`CALORIE_FLOOR`]
pub fn daily_calorie_target(tdee: f64, goal: CalorieGoal) -> f64 {
    (tdee + goal.calorie_delta()).max(CALORIE_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mifflin_reference_values() {
        // 10·80 + 6.25·180 − 5·30 + 5 = 1780
        assert!((mifflin_st_jeor(Gender::Male, 30.0, 80.0, 180.0) - 1780.0).abs() < 1e-9);
        // 10·60 + 6.25·165 − 5·25 − 161 = 1345.25
        assert!((mifflin_st_jeor(Gender::Female, 25.0, 60.0, 165.0) - 1345.25).abs() < 1e-9);
    }

    #[test]
    fn test_katch_preferred_with_body_fat() {
        let est = BmrEstimate::new(Gender::Male, 30.0, 80.0, 180.0, Some(20.0));
        assert_eq!(est.active, BmrFormula::KatchMcArdle);
        assert!((est.lean_mass_kg.unwrap() - 64.0).abs() < 1e-9);
        // 370 + 21.6·64 = 1752.4
        assert!((est.active_bmr() - 1752.4).abs() < 1e-9);
        assert!((est.mifflin_st_jeor - 1780.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_body_fat_means_not_supplied() {
        let est = BmrEstimate::new(Gender::Female, 40.0, 70.0, 170.0, Some(0.0));
        assert_eq!(est.active, BmrFormula::MifflinStJeor);
        assert!(est.katch_mcardle.is_none());
        assert!(est.lean_mass_kg.is_none());
    }

    #[test]
    fn test_multipliers_strictly_increasing() {
        let multipliers: Vec<f64> = ActivityLevel::ALL.iter().map(|a| a.multiplier()).collect();
        assert_eq!(multipliers.first(), Some(&1.2));
        assert_eq!(multipliers.last(), Some(&2.2));
        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_goal_deltas() {
        assert_eq!(CalorieGoal::ExtremeLoss.calorie_delta(), -1000.0);
        assert_eq!(CalorieGoal::ExtremeGain.calorie_delta(), 1000.0);
        let deltas: Vec<f64> = CalorieGoal::ALL.iter().map(|g| g.calorie_delta()).collect();
        assert!(deltas.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_calorie_floor() {
        assert_eq!(daily_calorie_target(1800.0, CalorieGoal::ExtremeLoss), CALORIE_FLOOR);
        assert_eq!(daily_calorie_target(2500.0, CalorieGoal::Loss), 2000.0);
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(ActivityLevel::parse("veryActive"), Some(ActivityLevel::VeryActive));
        assert_eq!(ActivityLevel::parse("VERYACTIVE"), Some(ActivityLevel::VeryActive));
        assert_eq!(CalorieGoal::parse("mildGain"), Some(CalorieGoal::MildGain));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
    }
}
