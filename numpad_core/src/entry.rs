//! NumberEntry state machine
//!
//! Accumulates keypad presses into bounded, precision-limited text. Every
//! action either commits new text or leaves it untouched and reports why.
//!
//! ## Invariants
//!
//! After every action the text
//! - is never empty (`"0"` is the clear state),
//! - holds at most one separator, and none when precision is zero,
//! - has no more fraction digits than the precision,
//! - parses to a value in `[0, upper_bound]`.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EntryResult, Rejection, Unsupported};
use crate::format::{NumberFormat, CLEAR_TEXT, DEFAULT_PRECISION};
use crate::key::Key;
use crate::kind::{self, Decimal, Float, Integer, NumericKind, Rounding};
use crate::snapshot::EntrySnapshot;

/// Outcome of an accepted action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryOutcome {
    /// Text changed
    Changed,
    /// Action accepted but text is the same (e.g. `0` on a clear pad)
    Unchanged,
}

impl EntryOutcome {
    pub fn is_changed(self) -> bool {
        self == EntryOutcome::Changed
    }
}

/// Construction options
///
/// Unset fields take the kind's defaults: two fraction digits and the
/// largest representable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryOptions<V> {
    pub precision: Option<u32>,
    pub upper_bound: Option<V>,
    pub separator: char,
}

impl<V> Default for EntryOptions<V> {
    fn default() -> Self {
        Self {
            precision: None,
            upper_bound: None,
            separator: '.',
        }
    }
}

impl<V> EntryOptions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_upper_bound(mut self, upper_bound: V) -> Self {
        self.upper_bound = Some(upper_bound);
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

/// Bounded numeric entry for one input session
pub struct NumberEntry<K: NumericKind> {
    text: String,
    upper_bound: K::Value,
    format: NumberFormat,
    _kind: PhantomData<K>,
}

pub type IntegerEntry<T> = NumberEntry<Integer<T>>;
pub type FloatEntry<T> = NumberEntry<Float<T>>;
pub type DecimalEntry = NumberEntry<Decimal>;

impl<K: NumericKind> NumberEntry<K> {
    /// Create an entry with default precision and bound
    pub fn new(value: K::Value) -> Self {
        Self::with_options(value, EntryOptions::default())
    }

    /// Create an entry, clamping `value` into `[0, upper_bound]`
    pub fn with_options(value: K::Value, options: EntryOptions<K::Value>) -> Self {
        let precision = K::effective_precision(options.precision.unwrap_or(DEFAULT_PRECISION));

        let upper_bound = K::sanitize(options.upper_bound.unwrap_or_else(K::max_value));
        let upper_bound = if upper_bound < K::zero() {
            K::zero()
        } else {
            upper_bound
        };

        let separator = if Key::is_reserved(options.separator) {
            warn!("unusable decimal separator {:?}, using '.'", options.separator);
            '.'
        } else {
            options.separator
        };
        let format = NumberFormat::new(separator, precision);

        let clamped = kind::clamp::<K>(value, upper_bound);
        if clamped.partial_cmp(&value) != Some(Ordering::Equal) {
            debug!(
                "{} entry: initial value {:?} clamped to {:?}",
                K::NAME,
                value,
                clamped
            );
        }

        let text = render_within::<K>(&format, clamped, upper_bound);
        debug!(
            "{} entry: text {:?}, precision {}, upper bound {:?}",
            K::NAME,
            text,
            precision,
            upper_bound
        );

        Self {
            text,
            upper_bound,
            format,
            _kind: PhantomData,
        }
    }

    // Accessors

    /// In-progress text, including a trailing separator if one was just typed
    pub fn string_value(&self) -> &str {
        &self.text
    }

    /// Parsed value; a trailing separator reads as its integer prefix
    pub fn value(&self) -> Option<K::Value> {
        self.format.parse::<K>(&self.text)
    }

    pub fn is_clear(&self) -> bool {
        self.text == CLEAR_TEXT
    }

    /// Whether a decimal point key should be offered at all
    pub fn show_decimal_point(&self) -> bool {
        self.format.precision > 0
    }

    pub fn precision(&self) -> u32 {
        self.format.precision
    }

    pub fn upper_bound(&self) -> K::Value {
        self.upper_bound
    }

    pub fn separator(&self) -> char {
        self.format.separator
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    /// Digits typed after the separator
    pub fn fraction_digits(&self) -> u32 {
        self.format.fraction_digits(&self.text)
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            kind: K::NAME.to_string(),
            text: self.text.clone(),
            precision: self.format.precision,
            separator: self.format.separator,
            is_clear: self.is_clear(),
            fraction_digits: self.fraction_digits(),
            show_decimal_point: self.show_decimal_point(),
        }
    }

    // Actions

    /// Apply a key press
    pub fn apply(&mut self, key: Key) -> EntryResult<EntryOutcome> {
        match key {
            Key::Backspace => Ok(self.backspace()),
            Key::Clear => Ok(self.clear()),
            Key::DecimalPoint => self.decimal_point(),
            digit => match digit.digit() {
                Some(d) => self.digit(d),
                None => Err(self.reject("apply", Rejection::NotADigit(digit))),
            },
        }
    }

    /// Apply keys in order, collecting each result
    pub fn replay<I>(&mut self, keys: I) -> Vec<EntryResult<EntryOutcome>>
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter().map(|key| self.apply(key)).collect()
    }

    /// Append digit `d`
    ///
    /// On a clear pad the digit replaces the `"0"`.
    pub fn digit(&mut self, d: u8) -> EntryResult<EntryOutcome> {
        if d > 9 {
            return Err(self.reject("digit", Rejection::InvalidDigit(d)));
        }
        let ch = char::from(b'0' + d);

        let tentative = if self.is_clear() {
            ch.to_string()
        } else {
            let precision = self.format.precision;
            if self.format.has_separator(&self.text) && self.fraction_digits() >= precision {
                return Err(self.reject("digit", Rejection::PrecisionExceeded { precision }));
            }
            let mut tentative = self.text.clone();
            tentative.push(ch);
            tentative
        };

        if let Err(rejection) = self.check_tentative(&tentative) {
            return Err(self.reject("digit", rejection));
        }
        Ok(self.commit(tentative))
    }

    /// Boolean form of [`digit`](Self::digit) taking a key; control keys fail
    pub fn digit_action(&mut self, key: Key) -> bool {
        match key.digit() {
            Some(d) => self.digit(d).is_ok(),
            None => {
                self.reject("digit", Rejection::NotADigit(key));
                false
            }
        }
    }

    /// Append the decimal separator
    pub fn decimal_point(&mut self) -> EntryResult<EntryOutcome> {
        if self.format.precision == 0 {
            return Err(self.reject("decimal_point", Unsupported::ZeroPrecision.into()));
        }
        if self.format.has_separator(&self.text) {
            return Err(self.reject("decimal_point", Unsupported::SeparatorPresent.into()));
        }
        self.text.push(self.format.separator);
        Ok(EntryOutcome::Changed)
    }

    pub fn decimal_point_action(&mut self) -> bool {
        self.decimal_point().is_ok()
    }

    /// Remove the last character; a single character becomes `"0"`
    pub fn backspace(&mut self) -> EntryOutcome {
        if self.text.chars().count() <= 1 {
            return self.clear();
        }
        self.text.pop();
        EntryOutcome::Changed
    }

    pub fn clear(&mut self) -> EntryOutcome {
        self.commit(CLEAR_TEXT.to_string())
    }

    // Helpers

    fn check_tentative(&self, tentative: &str) -> EntryResult<()> {
        match self.format.parse::<K>(tentative) {
            Some(value) if value > self.upper_bound => Err(Rejection::BoundExceeded),
            Some(_) => Ok(()),
            // Well-formed text only fails to parse when it overflows the type
            None if self.format.is_well_formed(tentative) => Err(Rejection::BoundExceeded),
            None => Err(Rejection::ParseFailure),
        }
    }

    fn commit(&mut self, text: String) -> EntryOutcome {
        if self.text == text {
            EntryOutcome::Unchanged
        } else {
            self.text = text;
            EntryOutcome::Changed
        }
    }

    fn reject(&self, action: &str, rejection: Rejection) -> Rejection {
        trace!(
            "{} entry: {} rejected at {:?}: {}",
            K::NAME,
            action,
            self.text,
            rejection
        );
        rejection
    }
}

/// Render `value` so the text reads back within the bound
///
/// Rounding half-even can carry past the bound (9.996 to 10 under a bound
/// of 9.999); in that case the extra digits are dropped instead.
fn render_within<K: NumericKind>(
    format: &NumberFormat,
    value: K::Value,
    upper_bound: K::Value,
) -> String {
    for rounding in [Rounding::HalfEven, Rounding::TowardZero] {
        if let Some(text) = format.format::<K>(value, rounding) {
            match format.parse::<K>(&text) {
                Some(parsed) if parsed <= upper_bound => return text,
                _ => debug!("{} entry: {:?} falls outside the bound", K::NAME, text),
            }
        }
    }
    CLEAR_TEXT.to_string()
}

impl<K: NumericKind> Clone for NumberEntry<K> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            upper_bound: self.upper_bound,
            format: self.format,
            _kind: PhantomData,
        }
    }
}

impl<K: NumericKind> fmt::Debug for NumberEntry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberEntry")
            .field("kind", &K::NAME)
            .field("text", &self.text)
            .field("upper_bound", &self.upper_bound)
            .field("format", &self.format)
            .finish()
    }
}

impl<K: NumericKind> fmt::Display for NumberEntry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal as Dec;

    fn float(value: f64) -> FloatEntry<f64> {
        FloatEntry::new(value)
    }

    #[test]
    fn test_new_entry() {
        let x = float(0.0);
        assert_eq!(x.string_value(), "0");
        assert_eq!(x.value(), Some(0.0));
        assert!(x.is_clear());
        assert!(x.show_decimal_point());
        assert_eq!(x.precision(), 2);
    }

    #[test]
    fn test_redundant_zero_is_accepted_unchanged() {
        let mut x = float(0.0);
        assert_eq!(x.digit(0), Ok(EntryOutcome::Unchanged));
        assert_eq!(x.string_value(), "0");
    }

    #[test]
    fn test_digit_replaces_clear_text() {
        let mut x = float(0.0);
        assert_eq!(x.digit(5), Ok(EntryOutcome::Changed));
        assert_eq!(x.string_value(), "5");
    }

    #[test]
    fn test_invalid_digit() {
        let mut x = float(3.0);
        assert_eq!(x.digit(10), Err(Rejection::InvalidDigit(10)));
        assert_eq!(x.string_value(), "3");
    }

    #[test]
    fn test_digit_action_rejects_control_keys() {
        let mut x = float(34.3);
        assert!(!x.digit_action(Key::Backspace));
        assert!(!x.digit_action(Key::DecimalPoint));
        assert!(!x.digit_action(Key::Clear));
        assert_eq!(x.string_value(), "34.3");
        assert!(!x.decimal_point_action());
        assert_eq!(x.string_value(), "34.3");
    }

    #[test]
    fn test_precision_exceeded() {
        let mut x = float(0.01);
        assert_eq!(x.fraction_digits(), 2);
        assert_eq!(x.digit(9), Err(Rejection::PrecisionExceeded { precision: 2 }));
        assert_eq!(x.string_value(), "0.01");
    }

    #[test]
    fn test_decimal_point_twice() {
        let mut x = float(1.0);
        assert_eq!(x.decimal_point(), Ok(EntryOutcome::Changed));
        assert_eq!(x.string_value(), "1.");
        assert_eq!(x.value(), Some(1.0));
        assert_eq!(
            x.decimal_point(),
            Err(Rejection::UnsupportedAction(Unsupported::SeparatorPresent))
        );
        assert_eq!(x.string_value(), "1.");
    }

    #[test]
    fn test_zero_precision_float_has_no_decimal_point() {
        let mut x = FloatEntry::<f64>::with_options(3.7, EntryOptions::new().with_precision(0));
        assert_eq!(x.string_value(), "4");
        assert!(!x.show_decimal_point());
        assert_eq!(
            x.decimal_point(),
            Err(Rejection::UnsupportedAction(Unsupported::ZeroPrecision))
        );
        assert_eq!(x.digit(2), Ok(EntryOutcome::Changed));
        assert_eq!(x.string_value(), "42");
    }

    #[test]
    fn test_integer_rejects_decimal_point() {
        let mut x = IntegerEntry::<u32>::with_options(34, EntryOptions::new().with_precision(3));
        assert_eq!(x.precision(), 0);
        assert!(!x.show_decimal_point());
        assert_eq!(
            x.apply(Key::DecimalPoint),
            Err(Rejection::UnsupportedAction(Unsupported::ZeroPrecision))
        );
        assert_eq!(x.string_value(), "34");
    }

    #[test]
    fn test_bound_exceeded() {
        let mut x = IntegerEntry::<i32>::with_options(10, EntryOptions::new().with_upper_bound(10));
        assert_eq!(x.digit(0), Err(Rejection::BoundExceeded));
        assert_eq!(x.string_value(), "10");
    }

    #[test]
    fn test_type_overflow_is_bound_exceeded() {
        let mut x = IntegerEntry::<u8>::new(25);
        assert_eq!(x.digit(5), Ok(EntryOutcome::Changed));
        assert_eq!(x.string_value(), "255");
        x.backspace();
        assert_eq!(x.digit(6), Err(Rejection::BoundExceeded));
        assert_eq!(x.string_value(), "25");
    }

    #[test]
    fn test_clear_pad_respects_small_bound() {
        let mut x = IntegerEntry::<u32>::with_options(0, EntryOptions::new().with_upper_bound(5));
        assert_eq!(x.digit(9), Err(Rejection::BoundExceeded));
        assert!(x.is_clear());
        assert_eq!(x.digit(5), Ok(EntryOutcome::Changed));
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut x = float(1.2);
        assert_eq!(x.backspace(), EntryOutcome::Changed);
        assert_eq!(x.string_value(), "1.");
        assert_eq!(x.backspace(), EntryOutcome::Changed);
        assert_eq!(x.string_value(), "1");
        assert_eq!(x.backspace(), EntryOutcome::Changed);
        assert_eq!(x.string_value(), "0");
        assert_eq!(x.backspace(), EntryOutcome::Unchanged);
        assert_eq!(x.clear(), EntryOutcome::Unchanged);
        assert!(x.is_clear());
    }

    #[test]
    fn test_construction_rounding_stays_within_bound() {
        let x = FloatEntry::<f64>::with_options(9.996, EntryOptions::new().with_upper_bound(9.999));
        assert_eq!(x.string_value(), "9.99");
    }

    #[test]
    fn test_negative_upper_bound_collapses_to_zero() {
        let mut x = IntegerEntry::<i32>::with_options(5, EntryOptions::new().with_upper_bound(-3));
        assert!(x.is_clear());
        assert_eq!(x.upper_bound(), 0);
        assert_eq!(x.digit(1), Err(Rejection::BoundExceeded));
    }

    #[test]
    fn test_comma_separator() {
        let mut x = FloatEntry::<f64>::with_options(3.25, EntryOptions::new().with_separator(','));
        assert_eq!(x.string_value(), "3,25");
        assert_eq!(x.value(), Some(3.25));
        x.clear();
        x.digit(7).unwrap();
        x.decimal_point().unwrap();
        assert_eq!(x.string_value(), "7,");
        x.digit(5).unwrap();
        assert_eq!(x.value(), Some(7.5));
    }

    #[test]
    fn test_digit_separator_is_replaced() {
        let x = FloatEntry::<f64>::with_options(1.5, EntryOptions::new().with_separator('5'));
        assert_eq!(x.separator(), '.');
        assert_eq!(x.string_value(), "1.5");
    }

    #[test]
    fn test_key_alias_separator_is_replaced() {
        for separator in ['<', 'c', 'C'] {
            let options = EntryOptions::new().with_separator(separator);
            let x = FloatEntry::<f64>::with_options(1.5, options);
            assert_eq!(x.separator(), '.');
            assert_eq!(x.string_value(), "1.5");
        }
    }

    #[test]
    fn test_huge_precision_is_capped() {
        let options = EntryOptions::new().with_precision(70_000);
        let mut x = FloatEntry::<f64>::with_options(1.5, options);
        assert_eq!(x.precision(), f64::DIGITS);
        assert_eq!(x.string_value(), "1.5");
        assert_eq!(x.digit(2), Ok(EntryOutcome::Changed));
        assert_eq!(x.string_value(), "1.52");

        let x = FloatEntry::<f64>::with_options(0.1, EntryOptions::new().with_precision(20));
        assert_eq!(x.string_value(), "0.1");
    }

    #[test]
    fn test_decimal_entry() {
        let mut x = DecimalEntry::new(Dec::new(2_348_938_936, 3));
        assert_eq!(x.string_value(), "2348938.94");
        assert_eq!(x.value(), Some(Dec::new(234_893_894, 2)));
        x.clear();
        x.decimal_point().unwrap();
        x.digit(0).unwrap();
        x.digit(1).unwrap();
        assert_eq!(x.value(), Some(Dec::new(1, 2)));
    }

    #[test]
    fn test_replay_and_snapshot() {
        let mut x = float(0.0);
        let results = x.replay([Key::D1, Key::DecimalPoint, Key::D2, Key::D3, Key::D4]);
        assert_eq!(results.len(), 5);
        assert!(results[..4].iter().all(|r| r.is_ok()));
        assert_eq!(results[4], Err(Rejection::PrecisionExceeded { precision: 2 }));

        let snap = x.snapshot();
        assert_eq!(snap.kind, "f64");
        assert_eq!(snap.text, "1.23");
        assert_eq!(snap.fraction_digits, 2);
        assert!(!snap.is_clear);
    }

    #[test]
    fn test_options_from_json() {
        let opts: EntryOptions<f64> =
            serde_json::from_str(r#"{"precision": 1, "upper_bound": 99.5}"#).unwrap();
        assert_eq!(opts.precision, Some(1));
        assert_eq!(opts.upper_bound, Some(99.5));
        assert_eq!(opts.separator, '.');
    }

    #[test]
    fn test_display() {
        let x = IntegerEntry::<u64>::new(42);
        assert_eq!(x.to_string(), "42");
    }
}
