//! # Error Types
//!
//! Structured error types for health_core. Calculators report failure to the
//! UI layer only through `ResultBundle::is_valid`, but every pipeline runs on
//! a fallible `derive` function first, so tests and the CLI can see exactly
//! which field was rejected and why.
//!
//! ## Example
//!
//! ```rust
//! use health_core::errors::{CalcError, CalcResult};
//!
//! fn validate_age(age: f64) -> CalcResult<()> {
//!     if !(15.0..=100.0).contains(&age) {
//!         return Err(CalcError::out_of_range("age", age, 15.0, 100.0));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_age(30.0).is_ok());
//! assert_eq!(validate_age(5.0).unwrap_err().error_code(), "OUT_OF_RANGE");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for health_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for derivation and conversion operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required field is missing (absent, null or empty)
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A field holds a value of the wrong shape or an unknown option
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A date string is malformed or names a day that does not exist
    #[error("Invalid date for '{field}': {value}")]
    InvalidDate { field: String, value: String },

    /// A numeric field falls outside its accepted range
    #[error("Value for '{field}' out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Unit tag not recognised
    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },

    /// Dimension tag not recognised
    #[error("Unknown dimension: {dimension}")]
    UnknownDimension { dimension: String },

    /// Unit is valid but belongs to another dimension (e.g. "lb" for height)
    #[error("Unit '{unit}' cannot measure {dimension}")]
    UnitMismatch { unit: String, dimension: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::InvalidDate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        CalcError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit { unit: unit.into() }
    }

    /// Create an UnknownDimension error
    pub fn unknown_dimension(dimension: impl Into<String>) -> Self {
        CalcError::UnknownDimension {
            dimension: dimension.into(),
        }
    }

    /// Create a UnitMismatch error
    pub fn unit_mismatch(unit: impl Into<String>, dimension: impl Into<String>) -> Self {
        CalcError::UnitMismatch {
            unit: unit.into(),
            dimension: dimension.into(),
        }
    }

    /// The field that caused the error, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::MissingField { field }
            | CalcError::InvalidInput { field, .. }
            | CalcError::InvalidDate { field, .. }
            | CalcError::OutOfRange { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidDate { .. } => "INVALID_DATE",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::UnknownDimension { .. } => "UNKNOWN_DIMENSION",
            CalcError::UnitMismatch { .. } => "UNIT_MISMATCH",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
