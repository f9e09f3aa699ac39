//! Interactive explorer controllers and their view-state.
//!
//! Everything here runs single-threaded inside toolkit event callbacks:
//! the embedding toolkit renders the typed control states and calls the
//! controller handler methods when a value changes.

pub mod basket;
pub mod controls;
pub mod database;
pub mod experiment;
pub mod filter;
pub mod frequency;
pub mod selector;
pub mod transfer;

use thiserror::Error;

/// Errors raised by the explorer layer. These mark logic bugs (a name that
/// should be in a list is not, a broken invariant), never ordinary
/// "nothing selected" situations, which are silent no-ops.
#[derive(Error, Debug)]
pub enum ExploreError {
    #[error("not present in list: {0}")]
    NotFound(String),

    #[error("'{0}' is already held by the other side of the transfer list")]
    SidesOverlap(String),

    #[error("cannot interpret frequency rule: {0}")]
    BadFrequency(String),

    #[error("invalid date range: {0}")]
    BadRange(String),

    #[error("unknown experiment: {0}")]
    UnknownExperiment(String),

    #[error("catalog holds no experiments")]
    EmptyCatalog,
}

/// Render an optional value as its display form, or the empty string.
pub fn value_or_empty<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
