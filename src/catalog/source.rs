//! External catalog contract.
//!
//! The explorer never talks to a database directly. It consumes a
//! [`CatalogSource`], the abstract face of whatever query layer the
//! embedding environment provides. [`crate::catalog::memory::MemoryCatalog`]
//! is the in-process implementation used by tests and demos.
//!
//! All calls are blocking, single-attempt, issued from UI event handlers.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::model::types::{ExperimentRecord, VariableRecord};

/// Errors surfaced by a catalog source.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("unknown experiment: {0}")]
    UnknownExperiment(String),

    #[error("this source does not support keyword queries")]
    KeywordsUnsupported,

    #[error("catalog query failed: {0}")]
    Query(String),

    #[error("loading '{variable}' from '{experiment}' failed: {reason}")]
    Load {
        experiment: String,
        variable: String,
        reason: String,
    },
}

/// Opaque handle to a loaded time-series array.
///
/// The explorer only ever stores it and renders its summary line; the
/// numerical payload lives with the data-access layer.
#[derive(Debug, Clone)]
pub struct ArrayHandle {
    pub experiment: String,
    pub variable: String,
    pub long_name: String,
    pub units: String,
    /// Number of time samples in the loaded range.
    pub samples: usize,
    pub time_start: Option<NaiveDateTime>,
    pub time_end: Option<NaiveDateTime>,
}

impl std::fmt::Display for ArrayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<DataArray '{}'", self.variable)?;
        if !self.long_name.is_empty() {
            write!(f, " ({})", self.long_name)?;
        }
        if !self.units.is_empty() {
            write!(f, " [{}]", self.units)?;
        }
        write!(f, ", {} samples", self.samples)?;
        if let (Some(start), Some(end)) = (self.time_start, self.time_end) {
            write!(f, ", {}..{}", start.date(), end.date())?;
        }
        write!(f, ">")
    }
}

/// The external catalog/query library, seen as a trait.
pub trait CatalogSource {
    /// List experiments. When `keywords` is given the result is restricted
    /// to experiments tagged with *all* of the supplied keywords. `all`
    /// requests the full metadata columns rather than the name-only view.
    fn experiments(
        &self,
        all: bool,
        keywords: Option<&BTreeSet<String>>,
    ) -> Result<Vec<ExperimentRecord>, CatalogError>;

    /// The per-experiment variable metadata join: one row per
    /// (variable, frequency, file pattern), optionally restricted to one
    /// diagnostic frequency.
    fn variables(
        &self,
        experiment: &str,
        frequency: Option<&str>,
    ) -> Result<Vec<VariableRecord>, CatalogError>;

    /// Every keyword known to the catalog.
    fn keywords(&self) -> Result<Vec<String>, CatalogError>;

    /// Load the time series of one variable of one experiment.
    fn load_array(
        &self,
        experiment: &str,
        variable: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<ArrayHandle, CatalogError>;
}
