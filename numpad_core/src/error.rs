//! Rejection reasons for keypad actions
//!
//! A rejected action never changes the entry text. The reason is kept
//! distinct so hosts and tests can tell a full fraction apart from an
//! out-of-range value.

use crate::key::Key;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("{0:?} is not a digit key")]
    NotADigit(Key),

    #[error("{0} is not a decimal digit")]
    InvalidDigit(u8),

    #[error("fraction already has {precision} digits")]
    PrecisionExceeded { precision: u32 },

    #[error("value would exceed the upper bound")]
    BoundExceeded,

    #[error("unsupported action: {0}")]
    UnsupportedAction(Unsupported),

    #[error("entry text does not parse")]
    ParseFailure,
}

/// Why a decimal point cannot be entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Unsupported {
    #[error("precision is zero")]
    ZeroPrecision,

    #[error("separator already present")]
    SeparatorPresent,
}

impl From<Unsupported> for Rejection {
    fn from(reason: Unsupported) -> Self {
        Rejection::UnsupportedAction(reason)
    }
}

/// Result of a keypad action
pub type EntryResult<T> = Result<T, Rejection>;
