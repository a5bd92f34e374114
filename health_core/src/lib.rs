//! # health_core - Health Calculator Derivation Engine
//!
//! `health_core` turns the loosely-typed input bundle posted by a calculator
//! form into a standardized result bundle: raw values, formatted strings, a
//! summary sentence and optional table/chart rows. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from an input bundle to a result bundle
//! - **JSON-First**: All contract types implement Serialize/Deserialize
//! - **Binary Validity**: Callers see `isValid`; [`CalcError`] explains why internally
//! - **Injected Context**: Locale strings and the reference date are parameters
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use health_core::{CalculatorInput, CalculatorKind, EngineSettings};
//!
//! let json = r#"{
//!     "values": { "gender": "female", "age": 34, "weight": 150, "height": 5, "heightInches": 6 },
//!     "fieldUnits": { "weight": "lbs", "height": "ft_in" }
//! }"#;
//! let input = CalculatorInput::from_json(json).unwrap();
//! let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
//!
//! let result = CalculatorKind::MacroSplit.run(&input, today, &EngineSettings::default());
//! assert!(result.is_valid);
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Macro, protein and due-date pipelines
//! - [`formulas`] - Lookup tables and domain formulas
//! - [`units`] - Type-safe unit wrappers and normalization
//! - [`input`] / [`result`] - Input and output contracts
//! - [`locale`] / [`format`] - Label lookup and value formatting
//! - [`settings`] - Engine-wide defaults
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod format;
pub mod formulas;
pub mod input;
pub mod locale;
pub mod result;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::CalculatorKind;
pub use errors::{CalcError, CalcResult};
pub use input::{CalculatorInput, RawValue};
pub use locale::{LocaleStrings, NoTranslations, Translator};
pub use result::{ResultBundle, ResultValue};
pub use settings::EngineSettings;
