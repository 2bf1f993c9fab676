//! Error types for the Cronos engine.
//!
//! Ordering itself never fails: the comparator, the normalizer and the
//! reorder planner are total. These errors belong to the board operations
//! around them.

use crate::{DayKey, EventId};
use thiserror::Error;

/// All possible errors from the Cronos engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    // Validation errors
    #[error("invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDate(DayKey),

    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("template title must not be blank")]
    BlankTitle,

    // State errors
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
