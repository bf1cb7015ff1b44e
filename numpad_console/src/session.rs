//! Keypad session over a configured numeric kind

use std::str::FromStr;

use numpad_core::{
    DecimalEntry, EntryOptions, EntryOutcome, EntryResult, EntrySnapshot, FloatEntry,
    IntegerEntry, Key,
};

use crate::config::{ConsoleError, ConsoleResult, KindName, SessionConfig};

/// One entry of whichever kind the config selected
#[derive(Debug, Clone)]
pub enum PadSession {
    Integer(IntegerEntry<i64>),
    Float(FloatEntry<f64>),
    Decimal(DecimalEntry),
}

fn parse_number<T: FromStr>(
    field: &'static str,
    input: &str,
    kind: KindName,
) -> ConsoleResult<T> {
    input
        .trim()
        .parse()
        .map_err(|_| ConsoleError::InvalidNumber {
            field,
            input: input.to_string(),
            kind,
        })
}

fn options<T: FromStr>(config: &SessionConfig) -> ConsoleResult<EntryOptions<T>> {
    let mut options = EntryOptions::new()
        .with_precision(config.precision)
        .with_separator(config.separator());
    if let Some(bound) = &config.upper_bound {
        options = options.with_upper_bound(parse_number("upper bound", bound, config.kind)?);
    }
    Ok(options)
}

impl PadSession {
    /// Builds the entry described by `config`
    pub fn from_config(config: &SessionConfig) -> ConsoleResult<Self> {
        let kind = config.kind;
        let session = match kind {
            KindName::Integer => PadSession::Integer(IntegerEntry::with_options(
                parse_number("value", &config.value, kind)?,
                options(config)?,
            )),
            KindName::Float => PadSession::Float(FloatEntry::with_options(
                parse_number("value", &config.value, kind)?,
                options(config)?,
            )),
            KindName::Decimal => PadSession::Decimal(DecimalEntry::with_options(
                parse_number("value", &config.value, kind)?,
                options(config)?,
            )),
        };
        log::info!("Started {} session at {:?}", kind, session.text());
        Ok(session)
    }

    pub fn press(&mut self, key: Key) -> EntryResult<EntryOutcome> {
        match self {
            PadSession::Integer(entry) => entry.apply(key),
            PadSession::Float(entry) => entry.apply(key),
            PadSession::Decimal(entry) => entry.apply(key),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            PadSession::Integer(entry) => entry.string_value(),
            PadSession::Float(entry) => entry.string_value(),
            PadSession::Decimal(entry) => entry.string_value(),
        }
    }

    /// Parsed value printed in canonical form
    pub fn value_text(&self) -> Option<String> {
        match self {
            PadSession::Integer(entry) => entry.value().map(|v| v.to_string()),
            PadSession::Float(entry) => entry.value().map(|v| v.to_string()),
            PadSession::Decimal(entry) => entry.value().map(|v| v.to_string()),
        }
    }

    pub fn separator(&self) -> char {
        match self {
            PadSession::Integer(entry) => entry.separator(),
            PadSession::Float(entry) => entry.separator(),
            PadSession::Decimal(entry) => entry.separator(),
        }
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        match self {
            PadSession::Integer(entry) => entry.snapshot(),
            PadSession::Float(entry) => entry.snapshot(),
            PadSession::Decimal(entry) => entry.snapshot(),
        }
    }

    /// Keys for a typed line, in order
    pub fn keys_for(&self, line: &str) -> ConsoleResult<Vec<Key>> {
        let separator = self.separator();
        line.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Key::from_char(c, separator).ok_or(ConsoleError::UnknownKey(c)))
            .collect()
    }

    /// Presses every key of `line`, returning how many were rejected
    pub fn type_line(&mut self, line: &str) -> ConsoleResult<usize> {
        let keys = self.keys_for(line)?;
        let mut rejected = 0;
        for key in keys {
            if let Err(rejection) = self.press(key) {
                log::debug!("{:?} rejected: {}", key, rejection);
                rejected += 1;
            }
        }
        Ok(rejected)
    }

    /// Single-line summary for display
    pub fn status_line(&self) -> String {
        let snapshot = self.snapshot();
        let value = self.value_text().unwrap_or_else(|| "-".into());
        let mut line = format!("[{}] {}  = {}", snapshot.kind, snapshot.text, value);
        if snapshot.show_decimal_point {
            line.push_str(&format!(
                "  ({}/{} fraction digits)",
                snapshot.fraction_digits, snapshot.precision
            ));
        }
        line
    }
}
