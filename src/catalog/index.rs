//! Joined (experiment × variable) metadata index.
//!
//! Built once per catalog session: the per-experiment variable tables are
//! concatenated, each row tagged with its owning experiment and given its
//! derived `restart`/`coordinate` flags. Afterwards the index is read-only;
//! the selector widgets mutate their own copies of the variable rows, never
//! the index.

use std::collections::BTreeSet;
use std::sync::Arc;

use itertools::Itertools;
use rustc_hash::FxHashSet;

use chrono::NaiveDateTime;

use crate::catalog::source::{ArrayHandle, CatalogError, CatalogSource};
use crate::model::types::{ExperimentRecord, VariableRecord};

pub struct CatalogIndex {
    source: Arc<dyn CatalogSource>,
    experiments: Vec<ExperimentRecord>,
    /// All catalog keywords, case-insensitively sorted for stable listing.
    keywords: Vec<String>,
    /// The joined table: one row per experiment × variable × frequency × file.
    rows: Vec<VariableRecord>,
    /// De-duplicated (name, long_name, restart, coordinate) rows.
    unique: Vec<VariableRecord>,
}

impl CatalogIndex {
    /// Build the index by querying the source once per experiment.
    /// `experiment_names` restricts the joined table to a subset; the
    /// experiment universe itself always holds the full listing.
    pub fn build(
        source: Arc<dyn CatalogSource>,
        experiment_names: Option<&[String]>,
    ) -> Result<Self, CatalogError> {
        let experiments = source.experiments(true, None)?;
        let mut keywords = source.keywords()?;
        keywords.sort_by_key(|k| k.to_lowercase());

        let selected: Vec<&ExperimentRecord> = match experiment_names {
            None => experiments.iter().collect(),
            Some(names) => names
                .iter()
                .map(|name| {
                    experiments
                        .iter()
                        .find(|e| e.experiment == *name)
                        .ok_or_else(|| CatalogError::UnknownExperiment(name.clone()))
                })
                .collect::<Result<_, _>>()?,
        };

        let mut rows = Vec::new();
        for expt in &selected {
            let mut table = source.variables(&expt.experiment, None)?;
            for row in &mut table {
                row.experiment = expt.experiment.clone();
                row.derive_flags();
            }
            rows.extend(table);
        }
        let unique = unique_rows(&rows);

        tracing::debug!(
            target: "modex::catalog",
            experiments = selected.len(),
            rows = rows.len(),
            unique = unique.len(),
            "built catalog index"
        );

        Ok(Self {
            source,
            experiments,
            keywords,
            rows,
            unique,
        })
    }

    pub fn experiments(&self) -> &[ExperimentRecord] {
        &self.experiments
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// The full experiment universe, as a set.
    pub fn universe(&self) -> FxHashSet<String> {
        self.experiments
            .iter()
            .map(|e| e.experiment.clone())
            .collect()
    }

    /// De-duplicated variable rows across all indexed experiments.
    pub fn unique_variables(&self) -> &[VariableRecord] {
        &self.unique
    }

    /// The unique rows that come from restart files.
    pub fn restart_variables(&self) -> Vec<VariableRecord> {
        self.unique.iter().filter(|r| r.restart).cloned().collect()
    }

    /// The joined table, optionally restricted to a subset of experiments.
    pub fn experiment_variable_map(&self, experiments: Option<&[String]>) -> Vec<VariableRecord> {
        match experiments {
            None => self.rows.clone(),
            Some(names) => {
                let wanted: FxHashSet<&str> = names.iter().map(String::as_str).collect();
                self.rows
                    .iter()
                    .filter(|row| wanted.contains(row.experiment.as_str()))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Experiments tagged with *all* of the given keywords. Delegates to the
    /// source; a source without keyword support degrades to no matches.
    pub fn keyword_filter(&self, keywords: &BTreeSet<String>) -> FxHashSet<String> {
        match self.source.experiments(false, Some(keywords)) {
            Ok(matched) => matched.into_iter().map(|e| e.experiment).collect(),
            Err(err) => {
                tracing::debug!(
                    target: "modex::catalog",
                    error = %err,
                    "keyword filter unavailable, returning no matches"
                );
                FxHashSet::default()
            }
        }
    }

    /// Experiments containing *all* of the given variables.
    ///
    /// An empty request means no filtering and returns the full universe;
    /// intersecting zero sets is undefined, so the identity is special-cased
    /// here rather than left to callers.
    pub fn variable_filter(&self, variable_names: &BTreeSet<String>) -> FxHashSet<String> {
        if variable_names.is_empty() {
            return self.universe();
        }
        let mut result: Option<FxHashSet<String>> = None;
        for name in variable_names {
            let with_name: FxHashSet<String> = self
                .rows
                .iter()
                .filter(|row| row.name == *name)
                .map(|row| row.experiment.clone())
                .collect();
            result = Some(match result {
                None => with_name,
                Some(acc) => acc.intersection(&with_name).cloned().collect(),
            });
        }
        result.unwrap_or_default()
    }

    pub fn get_experiment(&self, name: &str) -> Option<&ExperimentRecord> {
        self.experiments.iter().find(|e| e.experiment == name)
    }

    /// Variables of one experiment, grouped by (name, frequency) with
    /// aggregated file count and time bounds, ordered by
    /// (frequency, name, time_start, file_pattern). The ordering is part of
    /// the contract: the UI listing and the tests rely on it.
    pub fn get_variables(&self, experiment: &str, frequency: Option<&str>) -> Vec<VariableRecord> {
        let mut rows: Vec<&VariableRecord> = self
            .rows
            .iter()
            .filter(|row| row.experiment == experiment)
            .filter(|row| frequency.is_none() || row.frequency.as_deref() == frequency)
            .collect();
        rows.sort_by(|a, b| {
            (&a.frequency, &a.name, &a.time_start, &a.file_pattern)
                .cmp(&(&b.frequency, &b.name, &b.time_start, &b.file_pattern))
        });

        let mut out = Vec::new();
        let grouped = rows
            .into_iter()
            .chunk_by(|row| (row.frequency.clone(), row.name.clone()));
        for (_key, group) in &grouped {
            let group: Vec<&VariableRecord> = group.collect();
            let mut merged = group[0].clone();
            merged.file_count = group.iter().map(|row| row.file_count).sum();
            merged.time_start = group.iter().filter_map(|row| row.time_start).min();
            merged.time_end = group.iter().filter_map(|row| row.time_end).max();
            out.push(merged);
        }
        out
    }

    /// Issue the blocking array load through the owning session.
    pub fn load_array(
        &self,
        experiment: &str,
        variable: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<ArrayHandle, CatalogError> {
        self.source
            .load_array(experiment, variable, start_time, end_time)
    }
}

impl std::fmt::Debug for CatalogIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogIndex")
            .field("experiments", &self.experiments.len())
            .field("rows", &self.rows.len())
            .field("unique", &self.unique.len())
            .finish()
    }
}

/// First-seen de-duplication on (name, long_name, restart, coordinate).
fn unique_rows(rows: &[VariableRecord]) -> Vec<VariableRecord> {
    let mut seen: FxHashSet<(String, String, bool, bool)> = FxHashSet::default();
    let mut out = Vec::new();
    for row in rows {
        let key = (
            row.name.clone(),
            row.long_name.clone(),
            row.restart,
            row.coordinate,
        );
        if seen.insert(key) {
            out.push(row.clone());
        }
    }
    out
}
