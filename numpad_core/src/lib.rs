//! # NumPad Core
//!
//! Keypad-driven numeric entry, independent of any rendering.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Same key trace => same entry text
//! - **Never fatal**: Invalid input is rejected with a reason, state untouched
//! - **Mechanism over policy**: Core validates and accumulates, hosts decide rendering
//!
//! ## Design
//!
//! The core provides:
//! - NumberEntry: State machine over text that is always valid for its kind
//! - NumericKind: Per-type parsing/printing (integers, floats, decimals)
//! - NumberFormat: Locale separator and precision adapter
//! - EntrySnapshot: Deterministic state for replay testing
//! - Key: Platform-independent keypad keys
//!
//! Negative values are not supported; the lower bound is always zero.

pub mod entry;
pub mod error;
pub mod format;
pub mod key;
pub mod kind;
pub mod snapshot;

pub use entry::{
    DecimalEntry, EntryOptions, EntryOutcome, FloatEntry, IntegerEntry, NumberEntry,
};
pub use error::{EntryResult, Rejection, Unsupported};
pub use format::{NumberFormat, CLEAR_TEXT, DEFAULT_PRECISION};
pub use key::Key;
pub use kind::{Decimal, Float, Integer, NumericKind, Rounding};
pub use snapshot::EntrySnapshot;
