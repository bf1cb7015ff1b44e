//! Numeric kinds
//!
//! A kind ties the entry state machine to one host numeric type. It knows
//! how to read canonical text (ASCII digits and at most one `.`), how to
//! print a value with a bounded number of fraction digits, and whether
//! fractions exist at all.

use core::fmt;
use core::marker::PhantomData;

use rust_decimal::RoundingStrategy;

/// How `format` treats digits beyond the requested precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round to nearest, ties to even
    HalfEven,
    /// Drop extra digits
    TowardZero,
}

/// Per-type parsing and printing rules
pub trait NumericKind {
    type Value: Copy + PartialOrd + fmt::Debug;

    /// Short name used in logs and snapshots
    const NAME: &'static str;

    fn zero() -> Self::Value;

    /// Largest representable value, the default upper bound
    fn max_value() -> Self::Value;

    /// Whether the kind can hold fraction digits
    fn supports_fraction() -> bool;

    /// Parse canonical text. `None` when malformed or out of the type's range.
    fn parse(canonical: &str) -> Option<Self::Value>;

    /// Print `value` with at most `precision` fraction digits, no grouping,
    /// no trailing fraction zeros.
    fn format(value: Self::Value, precision: u32, rounding: Rounding) -> Option<String>;

    /// Map values with no ordering meaning (NaN, negative zero) onto zero
    fn sanitize(value: Self::Value) -> Self::Value {
        value
    }

    /// Most fraction digits the type carries faithfully
    fn max_precision() -> u32 {
        0
    }

    fn effective_precision(requested: u32) -> u32 {
        if Self::supports_fraction() {
            requested.min(Self::max_precision())
        } else {
            0
        }
    }
}

/// Clamp `value` into `[0, upper_bound]`
///
/// An upper bound below zero collapses the range to zero.
pub fn clamp<K: NumericKind>(value: K::Value, upper_bound: K::Value) -> K::Value {
    let zero = K::zero();
    let value = K::sanitize(value);
    let upper_bound = K::sanitize(upper_bound);

    if value <= zero {
        zero
    } else if value > upper_bound {
        if upper_bound > zero {
            upper_bound
        } else {
            zero
        }
    } else {
        value
    }
}

fn is_canonical(text: &str, allow_fraction: bool) -> bool {
    let mut separators = 0;
    let mut digits = 0;
    for ch in text.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' if allow_fraction => separators += 1,
            _ => return false,
        }
    }
    digits > 0 && separators <= 1
}

fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        let keep = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(keep);
    }
    text
}

/// Fixed-width integers; never carry a fraction
pub struct Integer<T>(PhantomData<T>);

macro_rules! integer_kind {
    ($($t:ty),* $(,)?) => {
        $(
            impl NumericKind for Integer<$t> {
                type Value = $t;

                const NAME: &'static str = stringify!($t);

                fn zero() -> $t {
                    0
                }

                fn max_value() -> $t {
                    <$t>::MAX
                }

                fn supports_fraction() -> bool {
                    false
                }

                fn parse(canonical: &str) -> Option<$t> {
                    if !is_canonical(canonical, false) {
                        return None;
                    }
                    canonical.parse().ok()
                }

                fn format(value: $t, _precision: u32, _rounding: Rounding) -> Option<String> {
                    Some(value.to_string())
                }
            }
        )*
    };
}

integer_kind!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Binary floating point, printed through an `f64` intermediate
pub struct Float<T>(PhantomData<T>);

fn format_f64(value: f64, precision: u32, rounding: Rounding) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let value = match rounding {
        Rounding::HalfEven => value,
        Rounding::TowardZero => {
            let scale = 10f64.powi(precision.min(i32::MAX as u32) as i32);
            let scaled = value * scale;
            if scaled.is_finite() {
                scaled.trunc() / scale
            } else {
                value
            }
        }
    };
    Some(trim_fraction(format!("{:.*}", precision as usize, value)))
}

macro_rules! float_kind {
    ($($t:ty),* $(,)?) => {
        $(
            impl NumericKind for Float<$t> {
                type Value = $t;

                const NAME: &'static str = stringify!($t);

                fn zero() -> $t {
                    0.0
                }

                fn max_value() -> $t {
                    <$t>::MAX
                }

                fn supports_fraction() -> bool {
                    true
                }

                fn parse(canonical: &str) -> Option<$t> {
                    if !is_canonical(canonical, true) {
                        return None;
                    }
                    canonical.parse::<f64>().ok().map(|v| v as $t)
                }

                fn max_precision() -> u32 {
                    <$t>::DIGITS
                }

                fn format(value: $t, precision: u32, rounding: Rounding) -> Option<String> {
                    format_f64(f64::from(value), precision.min(Self::max_precision()), rounding)
                }

                fn sanitize(value: $t) -> $t {
                    if value.is_nan() || value == 0.0 {
                        0.0
                    } else {
                        value
                    }
                }
            }
        )*
    };
}

float_kind!(f32, f64);

/// Largest scale a 96-bit decimal holds
const DECIMAL_MAX_PRECISION: u32 = 28;

/// 96-bit decimal mantissa with a base-10 scale
pub struct Decimal;

impl NumericKind for Decimal {
    type Value = rust_decimal::Decimal;

    const NAME: &'static str = "decimal";

    fn zero() -> Self::Value {
        rust_decimal::Decimal::ZERO
    }

    fn max_value() -> Self::Value {
        rust_decimal::Decimal::MAX
    }

    fn supports_fraction() -> bool {
        true
    }

    fn parse(canonical: &str) -> Option<Self::Value> {
        if !is_canonical(canonical, true) {
            return None;
        }
        // Text that needs rounding to fit is out of range, not approximated
        rust_decimal::Decimal::from_str_exact(canonical).ok()
    }

    fn max_precision() -> u32 {
        DECIMAL_MAX_PRECISION
    }

    fn format(value: Self::Value, precision: u32, rounding: Rounding) -> Option<String> {
        let precision = precision.min(Self::max_precision());
        let strategy = match rounding {
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::TowardZero => RoundingStrategy::ToZero,
        };
        let rounded = value.round_dp_with_strategy(precision, strategy).normalize();
        Some(rounded.to_string())
    }

    fn sanitize(value: Self::Value) -> Self::Value {
        if value.is_zero() {
            rust_decimal::Decimal::ZERO
        } else {
            value
        }
    }
}
