//! Formatter adapter
//!
//! Entry text is kept in the locale's form (its decimal separator). The
//! adapter converts that text to the canonical `.` form a [`NumericKind`]
//! understands and back.

use serde::{Deserialize, Serialize};

use crate::kind::{NumericKind, Rounding};

/// Canonical clear text
pub const CLEAR_TEXT: &str = "0";

/// Fraction digits used when none are requested
pub const DEFAULT_PRECISION: u32 = 2;

/// Locale tags whose decimal separator is a comma
const COMMA_LOCALES: &[&str] = &[
    "bg", "cs", "da", "de", "el", "es", "fi", "fr", "hr", "hu", "id", "it", "nb", "nl", "no",
    "pl", "pt", "ro", "ru", "sk", "sl", "sr", "sv", "tr", "uk", "vi",
];

/// Decimal formatting rules for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub separator: char,
    pub precision: u32,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            separator: '.',
            precision: DEFAULT_PRECISION,
        }
    }
}

impl NumberFormat {
    pub fn new(separator: char, precision: u32) -> Self {
        Self {
            separator,
            precision,
        }
    }

    /// Separator for a BCP 47 style tag such as `de-DE` or `en_US`
    ///
    /// Only the language subtag is consulted. Unknown tags use `.`.
    pub fn separator_for_locale(tag: &str) -> char {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if COMMA_LOCALES.contains(&language.as_str()) {
            ','
        } else {
            '.'
        }
    }

    pub fn for_locale(tag: &str, precision: u32) -> Self {
        Self::new(Self::separator_for_locale(tag), precision)
    }

    pub fn has_separator(&self, text: &str) -> bool {
        text.contains(self.separator)
    }

    /// Count of characters after the separator, 0 when absent
    pub fn fraction_digits(&self, text: &str) -> u32 {
        text.split_once(self.separator)
            .map(|(_, fraction)| fraction.chars().count() as u32)
            .unwrap_or(0)
    }

    /// Locale text to canonical text
    ///
    /// A trailing separator is dropped, so `"1."` reads as `"1"`.
    pub fn to_canonical(&self, text: &str) -> String {
        let text = text.strip_suffix(self.separator).unwrap_or(text);
        text.chars()
            .map(|c| if c == self.separator { '.' } else { c })
            .collect()
    }

    /// Canonical text to locale text
    pub fn to_locale(&self, canonical: &str) -> String {
        canonical
            .chars()
            .map(|c| if c == '.' { self.separator } else { c })
            .collect()
    }

    /// Digits plus at most one separator
    pub fn is_well_formed(&self, text: &str) -> bool {
        !text.is_empty()
            && text.chars().all(|c| c.is_ascii_digit() || c == self.separator)
            && text.matches(self.separator).count() <= 1
    }

    pub fn parse<K: NumericKind>(&self, text: &str) -> Option<K::Value> {
        if !self.is_well_formed(text) {
            return None;
        }
        K::parse(&self.to_canonical(text))
    }

    pub fn format<K: NumericKind>(&self, value: K::Value, rounding: Rounding) -> Option<String> {
        K::format(value, self.precision, rounding).map(|canonical| self.to_locale(&canonical))
    }

    /// Render a value, falling back to the clear text
    pub fn render<K: NumericKind>(&self, value: K::Value) -> String {
        self.format::<K>(value, Rounding::HalfEven)
            .unwrap_or_else(|| CLEAR_TEXT.to_string())
    }
}
