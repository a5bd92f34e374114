//! # Formula Library
//!
//! Read-only lookup tables and pure functions encoding the domain
//! knowledge the calculators build on. Nothing here holds state; every
//! table is a `const` or a lazily built immutable map.
//!
//! ## Modules
//!
//! - [`energy`] - BMR (Mifflin-St Jeor, Katch-McArdle), TDEE, goal deltas
//! - [`macros`] - Diet-type ratios, custom ratio resolution, meal weights
//! - [`protein`] - Protein g/kg ranges, adjustments, protein foods
//! - [`gestation`] - Gestation constants, baby sizes, calendar lookups, milestones

pub mod energy;
pub mod gestation;
pub mod macros;
pub mod protein;

pub use energy::{ActivityLevel, BmrEstimate, BmrFormula, CalorieGoal, Gender, CALORIE_FLOOR};
pub use gestation::{EmbryoAge, GenderPrediction, Trimester};
pub use macros::{DietType, MacroGrams, MacroRatio, RatioOutcome};
pub use protein::{DietPreference, PregnancyStatus, ProteinGoal, ProteinRatio, TrainingType};
