//! # Display Formatting
//!
//! Turns raw numbers and dates into the strings placed in
//! `ResultBundle::formatted`. Separators, unit suffixes, month names and the
//! date layout are all looked up through the [`Translator`], so a locale can
//! override any of them and a missing locale still yields English output.
//!
//! Locale keys used here:
//!
//! | kind | key | default |
//! |---|---|---|
//! | format | `thousandsSeparator` | `,` |
//! | format | `decimalSeparator` | `.` |
//! | format | `date` | `{month} {day}, {year}` |
//! | value | `kcal`, `g`, `kg`, `cm`, `%`, `g/kg` | same |
//! | value | `January` … `December` | same |

use chrono::{Datelike, NaiveDate};

use crate::locale::{fill_template, Translator};

pub const DEFAULT_DATE_FORMAT: &str = "{month} {day}, {year}";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month.clamp(1, 12)) - 1) as usize]
}

/// Round to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Locale-aware number formatter.
pub struct Formatter<'a> {
    t: &'a dyn Translator,
    thousands: String,
    decimal: String,
    date_template: String,
}

impl<'a> Formatter<'a> {
    /// Build a formatter, resolving separators once from the translator.
    ///
    /// `date_template` is the fallback layout when the locale has no `date` format.
    pub fn new(t: &'a dyn Translator, date_template: &str) -> Self {
        Formatter {
            t,
            thousands: t.template("thousandsSeparator", ","),
            decimal: t.template("decimalSeparator", "."),
            date_template: t.template("date", date_template),
        }
    }

    /// Localized label
    pub fn label(&self, key: &str) -> String {
        self.t.label(key)
    }

    /// Number with grouping and a fixed number of decimals
    pub fn number(&self, value: f64, decimals: u32) -> String {
        let rounded = round_to(value, decimals);
        let negative = rounded < 0.0;
        let text = format!("{:.*}", decimals as usize, rounded.abs());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (text, None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands);
            }
            grouped.push(ch);
        }

        let mut out = String::new();
        if negative && rounded != 0.0 {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal);
            out.push_str(&frac);
        }
        out
    }

    /// Number followed by a localized unit label, e.g. `2,150 kcal`
    pub fn with_unit(&self, value: f64, decimals: u32, unit: &str) -> String {
        format!("{} {}", self.number(value, decimals), self.t.label(unit))
    }

    pub fn kcal(&self, value: f64) -> String {
        self.with_unit(value, 0, "kcal")
    }

    pub fn grams(&self, value: f64) -> String {
        self.with_unit(value, 0, "g")
    }

    pub fn kilograms(&self, value: f64) -> String {
        self.with_unit(value, 1, "kg")
    }

    pub fn percent(&self, value: f64) -> String {
        format!("{}{}", self.number(value, 0), self.t.label("%"))
    }

    /// Date in the locale layout with a translated month name
    pub fn date(&self, date: NaiveDate) -> String {
        fill_template(
            &self.date_template,
            &[
                ("month", self.t.label(month_name(date.month()))),
                ("day", date.day().to_string()),
                ("year", date.year().to_string()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{LocaleStrings, NoTranslations};

    #[test]
    fn test_number_grouping() {
        let f = Formatter::new(&NoTranslations, DEFAULT_DATE_FORMAT);
        assert_eq!(f.number(2150.0, 0), "2,150");
        assert_eq!(f.number(1234567.891, 2), "1,234,567.89");
        assert_eq!(f.number(999.0, 0), "999");
        assert_eq!(f.number(-1000.0, 0), "-1,000");
        assert_eq!(f.number(-0.2, 0), "0");
    }

    #[test]
    fn test_units() {
        let f = Formatter::new(&NoTranslations, DEFAULT_DATE_FORMAT);
        assert_eq!(f.kcal(2150.4), "2,150 kcal");
        assert_eq!(f.grams(161.0), "161 g");
        assert_eq!(f.kilograms(68.04), "68.0 kg");
        assert_eq!(f.percent(30.0), "30%");
    }

    #[test]
    fn test_locale_separators() {
        let mut t = LocaleStrings::default();
        t.formats.insert("thousandsSeparator".into(), ".".into());
        t.formats.insert("decimalSeparator".into(), ",".into());
        let f = Formatter::new(&t, DEFAULT_DATE_FORMAT);
        assert_eq!(f.number(1234.5, 1), "1.234,5");
    }

    #[test]
    fn test_date_default_and_localized() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        let f = Formatter::new(&NoTranslations, DEFAULT_DATE_FORMAT);
        assert_eq!(f.date(date), "October 8, 2026");

        let mut t = LocaleStrings::default();
        t.values.insert("October".into(), "octubre".into());
        t.formats.insert("date".into(), "{day} de {month} de {year}".into());
        let f = Formatter::new(&t, DEFAULT_DATE_FORMAT);
        assert_eq!(f.date(date), "8 de octubre de 2026");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.855, 1), 1.9);
        assert_eq!(round_to(2.0, 2), 2.0);
    }
}
