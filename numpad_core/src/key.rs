//! Platform-independent keypad key representation

use serde::{Deserialize, Serialize};

/// A single key on the numeric keypad
///
/// Codes are stable: digits map to their value, followed by the three
/// control keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    Backspace,
    DecimalPoint,
    Clear,
}

const DIGITS: [Key; 10] = [
    Key::D0,
    Key::D1,
    Key::D2,
    Key::D3,
    Key::D4,
    Key::D5,
    Key::D6,
    Key::D7,
    Key::D8,
    Key::D9,
];

impl Key {
    /// All keys in code order
    pub const ALL: [Key; 13] = [
        Key::D0,
        Key::D1,
        Key::D2,
        Key::D3,
        Key::D4,
        Key::D5,
        Key::D6,
        Key::D7,
        Key::D8,
        Key::D9,
        Key::Backspace,
        Key::DecimalPoint,
        Key::Clear,
    ];

    /// Digit key for `d`, if `d` is in 0..=9
    pub fn from_digit(d: u8) -> Option<Self> {
        DIGITS.get(usize::from(d)).copied()
    }

    /// Stable numeric code (0-9 for digits, 10 backspace, 11 decimal point, 12 clear)
    pub fn code(self) -> u8 {
        match self {
            Key::Backspace => 10,
            Key::DecimalPoint => 11,
            Key::Clear => 12,
            digit => digit.digit().unwrap_or_default(),
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Digit value, or `None` for control keys
    pub fn digit(self) -> Option<u8> {
        DIGITS.iter().position(|k| *k == self).map(|i| i as u8)
    }

    pub fn is_digit(self) -> bool {
        self.digit().is_some()
    }

    /// Convert a typed character to a key
    ///
    /// `separator` is the locale decimal separator; `'.'` is always accepted
    /// as well so scripted input works regardless of locale.
    pub fn from_char(ch: char, separator: char) -> Option<Self> {
        match ch {
            '0'..='9' => ch.to_digit(10).and_then(|d| Self::from_digit(d as u8)),
            '.' => Some(Key::DecimalPoint),
            c if c == separator => Some(Key::DecimalPoint),
            '\x08' | '\x7f' | '<' => Some(Key::Backspace),
            'c' | 'C' | '\x1b' => Some(Key::Clear),
            _ => None,
        }
    }

    /// Whether `ch` already means something other than a decimal point
    ///
    /// Digits, control characters and the backspace/clear aliases cannot
    /// serve as a locale separator.
    pub fn is_reserved(ch: char) -> bool {
        ch.is_ascii_digit()
            || ch.is_control()
            || !matches!(Self::from_char(ch, '.'), None | Some(Key::DecimalPoint))
    }

    /// Glyph shown on the key cap
    pub fn label(self, separator: char) -> String {
        match self {
            Key::Backspace => "\u{232b}".into(),
            Key::DecimalPoint => separator.to_string(),
            Key::Clear => "C".into(),
            digit => digit.code().to_string(),
        }
    }
}
