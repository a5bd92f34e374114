//! # Health Calculators
//!
//! Each calculator follows the same pattern:
//!
//! - `*Input` - Typed, validated inputs parsed from a [`CalculatorInput`]
//! - `*Result` - Numeric outcome before formatting (JSON-serializable)
//! - `compute(input) -> *Result` - Pure formula pipeline
//! - `derive(input, ...) -> CalcResult<ResultBundle>` - Fallible end-to-end run
//! - `calculate(input, ...) -> ResultBundle` - Invalid bundle on any error
//!
//! ## Available Calculators
//!
//! - [`macro_split`] - Daily calories and protein/carb/fat split
//! - [`protein_intake`] - Daily protein range and per-meal amounts
//! - [`due_date`] - Pregnancy due date and gestational timeline

pub mod due_date;
pub mod macro_split;
pub mod protein_intake;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::input::CalculatorInput;
use crate::result::ResultBundle;
use crate::settings::EngineSettings;

pub use due_date::{DueDateInput, DueDateMethod, DueDateResult, MethodInput, PregnancyDates};
pub use macro_split::{MacroInput, MacroResult};
pub use protein_intake::{ProteinInput, ProteinResult};

/// Every calculator the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculatorKind {
    MacroSplit,
    ProteinIntake,
    DueDate,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 3] = [
        CalculatorKind::MacroSplit,
        CalculatorKind::ProteinIntake,
        CalculatorKind::DueDate,
    ];

    /// Accepts the id or a short alias (`macro`, `protein`, `due-date`)
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "macrosplit" | "macro" | "macros" => Some(CalculatorKind::MacroSplit),
            "proteinintake" | "protein" => Some(CalculatorKind::ProteinIntake),
            "duedate" | "pregnancy" => Some(CalculatorKind::DueDate),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            CalculatorKind::MacroSplit => "macroSplit",
            CalculatorKind::ProteinIntake => "proteinIntake",
            CalculatorKind::DueDate => "dueDate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorKind::MacroSplit => "Macro Calculator",
            CalculatorKind::ProteinIntake => "Protein Calculator",
            CalculatorKind::DueDate => "Due Date Calculator",
        }
    }

    /// Run the calculator. `today` is only read by the due-date calculator.
    pub fn run(&self, input: &CalculatorInput, today: NaiveDate, settings: &EngineSettings) -> ResultBundle {
        match self {
            CalculatorKind::MacroSplit => macro_split::calculate_with_settings(input, settings),
            CalculatorKind::ProteinIntake => protein_intake::calculate_with_settings(input, settings),
            CalculatorKind::DueDate => due_date::calculate_with_settings(input, today, settings),
        }
    }
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(CalculatorKind::parse("macro"), Some(CalculatorKind::MacroSplit));
        assert_eq!(CalculatorKind::parse("macroSplit"), Some(CalculatorKind::MacroSplit));
        assert_eq!(CalculatorKind::parse("protein-intake"), Some(CalculatorKind::ProteinIntake));
        assert_eq!(CalculatorKind::parse("due-date"), Some(CalculatorKind::DueDate));
        assert_eq!(CalculatorKind::parse("bmi"), None);
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::parse(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_run_dispatches() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let settings = EngineSettings::default();
        let input = CalculatorInput::new().with("lmpDate", "2026-01-01");

        let due = CalculatorKind::DueDate.run(&input, today, &settings);
        assert_eq!(due.text("dueDate"), Some("2026-10-08"));

        let macros = CalculatorKind::MacroSplit.run(&input, today, &settings);
        assert!(!macros.is_valid);
    }
}
