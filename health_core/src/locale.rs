//! # Locale Strings
//!
//! Display labels and summary templates come from an external locale
//! provider as two flat maps (`values` for labels, `formats` for templates).
//! The engine only ever asks a [`Translator`] for a key; a missing key falls
//! back to the key itself (labels) or to a built-in English template
//! (formats). Lookups never fail.
//!
//! Templates use plain `{token}` substitution:
//!
//! ```rust
//! use health_core::locale::{fill_template, LocaleStrings, Translator};
//!
//! let mut t = LocaleStrings::default();
//! t.values.insert("Protein".into(), "Eiweiß".into());
//!
//! assert_eq!(t.label("Protein"), "Eiweiß");
//! assert_eq!(t.label("Carbs"), "Carbs");
//!
//! let s = fill_template("{a} + {b} = {c}", &[("a", "1".into()), ("b", "2".into()), ("c", "3".into())]);
//! assert_eq!(s, "1 + 2 = 3");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Source of localized labels and templates.
pub trait Translator {
    /// Localized label for `key`, if the provider has one
    fn value(&self, key: &str) -> Option<&str>;

    /// Localized template for `key`, if the provider has one
    fn format(&self, key: &str) -> Option<&str>;

    /// Label for `key`, falling back to the key itself
    fn label(&self, key: &str) -> String {
        self.value(key).unwrap_or(key).to_string()
    }

    /// Template for `key`, falling back to `default`
    fn template(&self, key: &str, default: &str) -> String {
        self.format(key).unwrap_or(default).to_string()
    }
}

/// Translator with no strings: every label is its key, every template the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslations;

impl Translator for NoTranslations {
    fn value(&self, _key: &str) -> Option<&str> {
        None
    }

    fn format(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// The `t` object supplied alongside an input bundle.
///
/// ## JSON Example
///
/// ```json
/// {
///   "values": { "Protein": "Proteína", "Breakfast": "Desayuno" },
///   "formats": { "macroSummary": "Come {calories} al día." }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleStrings {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    #[serde(default)]
    pub formats: BTreeMap<String, String>,
}

impl Translator for LocaleStrings {
    fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn format(&self, key: &str) -> Option<&str> {
        self.formats.get(key).map(String::as_str)
    }
}

/// Replace each `{token}` in `template` with its value.
///
/// Tokens without a value are left in place so a broken translation stays
/// visible instead of silently dropping text.
pub fn fill_template(template: &str, tokens: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match tokens.iter().find(|(token, _)| *token == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_fallback_to_key() {
        let t = NoTranslations;
        assert_eq!(t.label("Third trimester"), "Third trimester");
        assert_eq!(t.template("macroSummary", "default {x}"), "default {x}");
    }

    #[test]
    fn test_locale_strings_lookup() {
        let json = r#"{"values":{"Fat":"Grasa"},"formats":{"greeting":"Hola {name}"}}"#;
        let t: LocaleStrings = serde_json::from_str(json).unwrap();
        assert_eq!(t.label("Fat"), "Grasa");
        assert_eq!(t.template("greeting", "Hi {name}"), "Hola {name}");
        assert_eq!(t.template("missing", "Hi {name}"), "Hi {name}");
    }

    #[test]
    fn test_locale_strings_partial_json() {
        let t: LocaleStrings = serde_json::from_str(r#"{"values":{}}"#).unwrap();
        assert!(t.formats.is_empty());
    }

    #[test]
    fn test_fill_template_unknown_token_kept() {
        let s = fill_template("{known} and {unknown}", &[("known", "yes".to_string())]);
        assert_eq!(s, "yes and {unknown}");
    }

    #[test]
    fn test_fill_template_unclosed_brace() {
        let s = fill_template("value {open", &[("open", "x".to_string())]);
        assert_eq!(s, "value {open");
    }

    #[test]
    fn test_fill_template_repeated_token() {
        let s = fill_template("{n}/{n}", &[("n", "7".to_string())]);
        assert_eq!(s, "7/7");
    }
}
