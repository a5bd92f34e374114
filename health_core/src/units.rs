//! # Unit Conversion
//!
//! Body measurements arrive in whatever unit the user picked on the form.
//! Every formula in this crate works on a single canonical unit per
//! dimension: kilograms for weight, centimeters for height.
//!
//! Conversion is tag-driven (`convert_to_base` / `convert_from_base`): the
//! unit is a string selected at runtime and each [`MeasurementUnit`] carries
//! its factor to the canonical unit. Unknown tags are an error, never a
//! silent default. Imperial heights entered as two fields go through
//! [`FeetInches`].
//!
//! ## Example
//!
//! ```rust
//! use health_core::units::{convert_to_base, convert_from_base, Centimeters, FeetInches};
//!
//! let cm: Centimeters = FeetInches { feet: 5.0, inches: 10.0 }.into();
//! assert!((cm.0 - 177.8).abs() < 1e-9);
//!
//! let base = convert_to_base(6.0, "ft", "height").unwrap();
//! assert!((base.value - 182.88).abs() < 1e-9);
//! assert!((convert_from_base(base.value, "ft", "height").unwrap() - 6.0).abs() < 1e-12);
//!
//! assert!(convert_to_base(1.0, "furlong", "height").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Kilograms per pound (exact, international avoirdupois pound)
pub const KG_PER_LB: f64 = 0.453_592_37;
/// Pounds per stone
pub const LB_PER_STONE: f64 = 14.0;
/// Centimeters per inch (exact)
pub const CM_PER_INCH: f64 = 2.54;
/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;
/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;

// ============================================================================
// Composite height
// ============================================================================

/// Height in centimeters (canonical)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Height as entered on imperial forms (e.g. 5 ft 10 in)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: f64,
    pub inches: f64,
}

impl From<FeetInches> for Centimeters {
    fn from(fi: FeetInches) -> Self {
        Centimeters((fi.feet * INCHES_PER_FOOT + fi.inches) * CM_PER_INCH)
    }
}

// ============================================================================
// Tag-driven conversion
// ============================================================================

/// A measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Weight,
    Height,
}

impl Dimension {
    /// Parse a dimension tag ("weight", "mass", "height", "length")
    pub fn parse(tag: &str) -> CalcResult<Self> {
        match tag.trim().to_lowercase().as_str() {
            "weight" | "mass" => Ok(Dimension::Weight),
            "height" | "length" => Ok(Dimension::Height),
            _ => Err(CalcError::unknown_dimension(tag)),
        }
    }

    /// The canonical base unit all values of this dimension normalize to
    pub fn base_unit(&self) -> BaseUnit {
        match self {
            Dimension::Weight => BaseUnit::Kg,
            Dimension::Height => BaseUnit::Cm,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Dimension::Weight => "weight",
            Dimension::Height => "height",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Canonical unit tag of a `CanonicalMeasurement`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    Kg,
    Cm,
}

/// A value expressed in its dimension's canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMeasurement {
    pub value: f64,
    pub unit: BaseUnit,
}

/// Every unit a form field may be entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    Kilograms,
    Pounds,
    Stone,
    Centimeters,
    Meters,
    Inches,
    /// Decimal feet
    Feet,
    /// Feet plus a separate inches field; as a scalar this is decimal feet
    FeetInches,
}

impl MeasurementUnit {
    /// All supported units
    pub const ALL: [MeasurementUnit; 8] = [
        MeasurementUnit::Kilograms,
        MeasurementUnit::Pounds,
        MeasurementUnit::Stone,
        MeasurementUnit::Centimeters,
        MeasurementUnit::Meters,
        MeasurementUnit::Inches,
        MeasurementUnit::Feet,
        MeasurementUnit::FeetInches,
    ];

    /// Parse a unit tag as used in `fieldUnits` (case-insensitive)
    pub fn parse(tag: &str) -> CalcResult<Self> {
        let unit = match tag.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => MeasurementUnit::Kilograms,
            "lb" | "lbs" | "pound" | "pounds" => MeasurementUnit::Pounds,
            "st" | "stone" | "stones" => MeasurementUnit::Stone,
            "cm" | "centimeter" | "centimeters" => MeasurementUnit::Centimeters,
            "m" | "meter" | "meters" | "metre" | "metres" => MeasurementUnit::Meters,
            "in" | "inch" | "inches" => MeasurementUnit::Inches,
            "ft" | "feet" | "foot" => MeasurementUnit::Feet,
            "ft_in" | "ftin" | "feet_inches" => MeasurementUnit::FeetInches,
            _ => return Err(CalcError::unknown_unit(tag)),
        };
        Ok(unit)
    }

    /// Dimension this unit measures
    pub fn dimension(&self) -> Dimension {
        match self {
            MeasurementUnit::Kilograms | MeasurementUnit::Pounds | MeasurementUnit::Stone => {
                Dimension::Weight
            }
            _ => Dimension::Height,
        }
    }

    /// Short tag for display
    pub fn code(&self) -> &'static str {
        match self {
            MeasurementUnit::Kilograms => "kg",
            MeasurementUnit::Pounds => "lb",
            MeasurementUnit::Stone => "st",
            MeasurementUnit::Centimeters => "cm",
            MeasurementUnit::Meters => "m",
            MeasurementUnit::Inches => "in",
            MeasurementUnit::Feet => "ft",
            MeasurementUnit::FeetInches => "ft_in",
        }
    }

    /// Multiplier from this unit to the canonical unit of its dimension
    pub fn factor_to_base(&self) -> f64 {
        match self {
            MeasurementUnit::Kilograms => 1.0,
            MeasurementUnit::Pounds => KG_PER_LB,
            MeasurementUnit::Stone => LB_PER_STONE * KG_PER_LB,
            MeasurementUnit::Centimeters => 1.0,
            MeasurementUnit::Meters => CM_PER_METER,
            MeasurementUnit::Inches => CM_PER_INCH,
            MeasurementUnit::Feet | MeasurementUnit::FeetInches => INCHES_PER_FOOT * CM_PER_INCH,
        }
    }

    fn check_dimension(&self, dimension: Dimension) -> CalcResult<()> {
        if self.dimension() != dimension {
            return Err(CalcError::unit_mismatch(self.code(), dimension.code()));
        }
        Ok(())
    }
}

/// Convert a value in a typed unit to the canonical unit of `dimension`.
pub fn to_base(value: f64, unit: MeasurementUnit, dimension: Dimension) -> CalcResult<CanonicalMeasurement> {
    unit.check_dimension(dimension)?;
    Ok(CanonicalMeasurement {
        value: value * unit.factor_to_base(),
        unit: dimension.base_unit(),
    })
}

/// Convert a canonical value of `dimension` into a typed unit.
pub fn from_base(value: f64, unit: MeasurementUnit, dimension: Dimension) -> CalcResult<f64> {
    unit.check_dimension(dimension)?;
    Ok(value / unit.factor_to_base())
}

/// Convert `(value, unit tag, dimension tag)` into the canonical unit.
///
/// # Errors
///
/// `UnknownUnit`, `UnknownDimension`, or `UnitMismatch` when the unit does
/// not measure the requested dimension.
pub fn convert_to_base(value: f64, unit: &str, dimension: &str) -> CalcResult<CanonicalMeasurement> {
    let dimension = Dimension::parse(dimension)?;
    let unit = MeasurementUnit::parse(unit)?;
    to_base(value, unit, dimension)
}

/// Inverse of [`convert_to_base`]: canonical value into the tagged unit.
pub fn convert_from_base(value: f64, unit: &str, dimension: &str) -> CalcResult<f64> {
    let dimension = Dimension::parse(dimension)?;
    let unit = MeasurementUnit::parse(unit)?;
    from_base(value, unit, dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_factors() {
        let kg = to_base(100.0, MeasurementUnit::Pounds, Dimension::Weight).unwrap();
        assert!((kg.value - 45.359237).abs() < 1e-9);

        let kg = to_base(10.0, MeasurementUnit::Stone, Dimension::Weight).unwrap();
        assert!((kg.value - 63.5029318).abs() < 1e-6);
    }

    #[test]
    fn test_feet_inches_to_centimeters() {
        let cm: Centimeters = FeetInches { feet: 5.0, inches: 10.0 }.into();
        assert!((cm.0 - 177.8).abs() < 1e-9);

        // Same as decimal feet through the tag path
        let decimal = to_base(5.0 + 10.0 / 12.0, MeasurementUnit::FeetInches, Dimension::Height).unwrap();
        assert!((decimal.value - cm.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_to_base_tags() {
        let m = convert_to_base(1.75, "m", "height").unwrap();
        assert_eq!(m.unit, BaseUnit::Cm);
        assert!((m.value - 175.0).abs() < 1e-9);

        let lbs = convert_to_base(154.0, "LBS", "weight").unwrap();
        assert_eq!(lbs.unit, BaseUnit::Kg);
        assert!((lbs.value - 69.853).abs() < 0.001);
    }

    #[test]
    fn test_unknown_tags_are_errors() {
        assert_eq!(
            convert_to_base(1.0, "furlong", "height").unwrap_err(),
            CalcError::unknown_unit("furlong")
        );
        assert_eq!(
            convert_to_base(1.0, "kg", "volume").unwrap_err(),
            CalcError::unknown_dimension("volume")
        );
        assert_eq!(
            convert_from_base(1.0, "lb", "height").unwrap_err(),
            CalcError::unit_mismatch("lb", "height")
        );
    }

    #[test]
    fn test_every_unit_roundtrips() {
        for unit in MeasurementUnit::ALL {
            let dim = unit.dimension();
            let base = to_base(12.5, unit, dim).unwrap();
            let back = from_base(base.value, unit, dim).unwrap();
            assert!((back - 12.5).abs() < 1e-9, "{:?}", unit);
        }
    }

    #[test]
    fn test_serialization() {
        let cm = Centimeters(177.8);
        assert_eq!(serde_json::to_string(&cm).unwrap(), "177.8");

        let unit: MeasurementUnit = serde_json::from_str("\"feet_inches\"").unwrap();
        assert_eq!(unit, MeasurementUnit::FeetInches);
    }
}
