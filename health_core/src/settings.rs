//! # Engine Settings
//!
//! Defaults applied when an optional form field is left empty. Settings are
//! passed into each calculator explicitly; there is no global state.
//!
//! ```rust
//! use health_core::settings::EngineSettings;
//!
//! let settings: EngineSettings = serde_json::from_str(r#"{ "default_cycle_length": 30 }"#).unwrap();
//! assert_eq!(settings.default_cycle_length, 30);
//! assert_eq!(settings.default_luteal_phase, 14);
//! ```

use serde::{Deserialize, Serialize};

use crate::format::DEFAULT_DATE_FORMAT;
use crate::formulas::energy::ActivityLevel;

/// Calculator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Menstrual cycle length used by the LMP method (days)
    pub default_cycle_length: u32,

    /// Luteal phase length used by the LMP method (days)
    pub default_luteal_phase: u32,

    /// Meals per day for the macro meal plan
    pub default_macro_meals: u32,

    /// Meals per day for the protein per-meal split
    pub default_protein_meals: u32,

    /// Activity level when none is selected
    pub default_activity: ActivityLevel,

    /// Date layout when the locale has no `date` format
    pub default_date_format: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_cycle_length: 28,
            default_luteal_phase: 14,
            default_macro_meals: 3,
            default_protein_meals: 4,
            default_activity: ActivityLevel::Moderate,
            default_date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}
