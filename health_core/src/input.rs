//! # Calculator Input Bundle
//!
//! The form renderer hands every calculator the same loosely-typed bundle:
//! field values keyed by field id, an optional per-field unit selection and
//! an optional locale provider. This module owns parsing those raw values
//! into typed quantities, including unit normalization to kg/cm.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "values": { "gender": "female", "age": 34, "weight": 150, "height": 5, "heightInches": 6 },
//!   "fieldUnits": { "weight": "lbs", "height": "ft_in" },
//!   "t": { "values": {}, "formats": {} }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::locale::{LocaleStrings, NoTranslations, Translator};
use crate::units::{to_base, Centimeters, Dimension, FeetInches, MeasurementUnit};

/// A single raw field value as posted by the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl RawValue {
    /// Null and blank strings count as "not supplied"
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            RawValue::Bool(b) => b.to_string(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::Null => "null".to_string(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// Input bundle for one derivation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    /// Raw field values keyed by field id
    #[serde(default)]
    pub values: BTreeMap<String, RawValue>,

    /// Unit selected for a field (e.g. `weight -> "lbs"`); absent = canonical unit
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_units: BTreeMap<String, String>,

    /// Locale strings supplied by the locale provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<LocaleStrings>,
}

impl CalculatorInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for a field value
    pub fn with(mut self, field: &str, value: impl Into<RawValue>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    /// Builder-style setter for a field unit
    pub fn with_unit(mut self, field: &str, unit: &str) -> Self {
        self.field_units.insert(field.to_string(), unit.to_string());
        self
    }

    /// Parse a bundle from JSON
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The locale provider for this bundle, or one that falls back to keys
    pub fn translator(&self) -> &dyn Translator {
        match &self.t {
            Some(t) => t,
            None => &NoTranslations,
        }
    }

    /// Raw value for a field, treating null/blank as absent
    pub fn raw(&self, field: &str) -> Option<&RawValue> {
        self.values.get(field).filter(|v| !v.is_blank())
    }

    /// Optional numeric field. Numeric strings are accepted.
    pub fn number(&self, field: &str) -> CalcResult<Option<f64>> {
        let Some(raw) = self.raw(field) else {
            return Ok(None);
        };
        let value = match raw {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                CalcError::invalid_input(field, s.clone(), "Expected a number")
            })?,
            other => {
                return Err(CalcError::invalid_input(field, other.describe(), "Expected a number"));
            }
        };
        if !value.is_finite() {
            return Err(CalcError::invalid_input(field, value.to_string(), "Expected a finite number"));
        }
        Ok(Some(value))
    }

    /// Required numeric field
    pub fn require_number(&self, field: &str) -> CalcResult<f64> {
        self.number(field)?.ok_or_else(|| CalcError::missing_field(field))
    }

    /// Required numeric field within an inclusive range
    pub fn require_in_range(&self, field: &str, min: f64, max: f64) -> CalcResult<f64> {
        let value = self.require_number(field)?;
        check_range(field, value, min, max)
    }

    /// Optional numeric field, or `default` when absent. The resolved value
    /// must lie in the inclusive range either way.
    pub fn number_in_range_or(&self, field: &str, default: f64, min: f64, max: f64) -> CalcResult<f64> {
        let value = self.number(field)?.unwrap_or(default);
        check_range(field, value, min, max)
    }

    /// Optional text field (numbers are rendered as text)
    pub fn text(&self, field: &str) -> Option<String> {
        match self.raw(field)? {
            RawValue::Text(s) => Some(s.trim().to_string()),
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Null => None,
        }
    }

    /// Feature toggle. Absent toggles are on.
    pub fn toggle(&self, field: &str) -> bool {
        self.toggle_or(field, true)
    }

    /// Feature toggle with an explicit default for the absent case.
    pub fn toggle_or(&self, field: &str, default: bool) -> bool {
        match self.raw(field) {
            Some(RawValue::Bool(b)) => *b,
            Some(RawValue::Number(n)) => *n != 0.0,
            Some(RawValue::Text(s)) => !matches!(
                s.trim().to_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            ),
            _ => default,
        }
    }

    /// Parse an option field via `parse`, falling back to `default` when absent.
    pub fn choice_or<T>(&self, field: &str, default: T, parse: fn(&str) -> Option<T>) -> CalcResult<T> {
        match self.text(field) {
            Some(code) => parse(&code)
                .ok_or_else(|| CalcError::invalid_input(field, code, "Unknown option")),
            None => Ok(default),
        }
    }

    /// Parse a required option field via `parse`.
    pub fn require_choice<T>(&self, field: &str, parse: fn(&str) -> Option<T>) -> CalcResult<T> {
        let code = self.text(field).ok_or_else(|| CalcError::missing_field(field))?;
        parse(&code).ok_or_else(|| CalcError::invalid_input(field, code, "Unknown option"))
    }

    /// Optional calendar date (`YYYY-MM-DD`, optionally followed by a time part)
    pub fn date(&self, field: &str) -> CalcResult<Option<NaiveDate>> {
        match self.raw(field) {
            None => Ok(None),
            Some(RawValue::Text(s)) => parse_date(field, s).map(Some),
            Some(other) => Err(CalcError::invalid_date(field, other.describe())),
        }
    }

    /// Required calendar date
    pub fn require_date(&self, field: &str) -> CalcResult<NaiveDate> {
        self.date(field)?.ok_or_else(|| CalcError::missing_field(field))
    }

    /// Unit selected for a field, if any
    pub fn unit(&self, field: &str) -> CalcResult<Option<MeasurementUnit>> {
        match self.field_units.get(field) {
            Some(tag) if !tag.trim().is_empty() => MeasurementUnit::parse(tag).map(Some),
            _ => Ok(None),
        }
    }

    /// Optional measurement normalized to the canonical unit of `dimension`.
    ///
    /// A `ft_in` height reads the field as feet and `<field>Inches` as inches.
    pub fn measurement(&self, field: &str, dimension: Dimension) -> CalcResult<Option<f64>> {
        let Some(value) = self.number(field)? else {
            return Ok(None);
        };
        let unit = match self.unit(field)? {
            Some(unit) => unit,
            None => return Ok(Some(value)),
        };
        if unit == MeasurementUnit::FeetInches && dimension == Dimension::Height {
            let inches = self.number(&format!("{}Inches", field))?.unwrap_or(0.0);
            let cm: Centimeters = FeetInches { feet: value, inches }.into();
            return Ok(Some(cm.0));
        }
        Ok(Some(to_base(value, unit, dimension)?.value))
    }

    /// Required positive measurement in the canonical unit
    pub fn require_measurement(&self, field: &str, dimension: Dimension) -> CalcResult<f64> {
        let value = self
            .measurement(field, dimension)?
            .ok_or_else(|| CalcError::missing_field(field))?;
        if value <= 0.0 {
            return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
        }
        Ok(value)
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<f64> {
    if value < min || value > max {
        return Err(CalcError::out_of_range(field, value, min, max));
    }
    Ok(value)
}

/// Parse `YYYY-MM-DD`, ignoring any trailing `T...` time part.
///
/// The date must name a real day, so `2026-02-30` is rejected rather than
/// rolled into March. Only digits and dashes are accepted, with a four-digit
/// year.
pub fn parse_date(field: &str, text: &str) -> CalcResult<NaiveDate> {
    let trimmed = text.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    let invalid = || CalcError::invalid_date(field, text);

    let well_formed = date_part.find('-') == Some(4)
        && date_part.bytes().all(|b| b.is_ascii_digit() || b == b'-');
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())
}
