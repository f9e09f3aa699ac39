//! In-memory catalog source.
//!
//! Backs tests and demos with a fully deterministic catalog. Fixture data
//! can be supplied as records or parsed from JSON.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::catalog::source::{ArrayHandle, CatalogError, CatalogSource};
use crate::model::types::{ExperimentRecord, VariableRecord};

/// A [`CatalogSource`] holding its whole catalog in memory.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    experiments: Vec<ExperimentRecord>,
    rows: Vec<VariableRecord>,
    keyword_support: bool,
    load_failure: Option<String>,
}

impl MemoryCatalog {
    pub fn new(experiments: Vec<ExperimentRecord>, rows: Vec<VariableRecord>) -> Self {
        Self {
            experiments,
            rows,
            keyword_support: true,
            load_failure: None,
        }
    }

    /// Parse a catalog from two JSON arrays of records.
    pub fn from_json(experiments: &str, variables: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            serde_json::from_str(experiments)?,
            serde_json::from_str(variables)?,
        ))
    }

    /// Simulate a catalog built without keyword metadata: keyword queries
    /// error, and callers are expected to degrade.
    pub fn without_keyword_support(mut self) -> Self {
        self.keyword_support = false;
        self
    }

    /// Make every `load_array` call fail with the given reason. Lets tests
    /// drive the load-error path without a real backend.
    pub fn failing_loads(mut self, reason: &str) -> Self {
        self.load_failure = Some(reason.to_string());
        self
    }
}

impl CatalogSource for MemoryCatalog {
    fn experiments(
        &self,
        _all: bool,
        keywords: Option<&BTreeSet<String>>,
    ) -> Result<Vec<ExperimentRecord>, CatalogError> {
        match keywords {
            None => Ok(self.experiments.clone()),
            Some(query) => {
                if !self.keyword_support {
                    return Err(CatalogError::KeywordsUnsupported);
                }
                Ok(self
                    .experiments
                    .iter()
                    .filter(|expt| query.iter().all(|k| expt.keywords.contains(k)))
                    .cloned()
                    .collect())
            }
        }
    }

    fn variables(
        &self,
        experiment: &str,
        frequency: Option<&str>,
    ) -> Result<Vec<VariableRecord>, CatalogError> {
        if !self.experiments.iter().any(|e| e.experiment == experiment) {
            return Err(CatalogError::UnknownExperiment(experiment.to_string()));
        }
        Ok(self
            .rows
            .iter()
            .filter(|row| row.experiment == experiment)
            .filter(|row| frequency.is_none() || row.frequency.as_deref() == frequency)
            .cloned()
            .collect())
    }

    fn keywords(&self) -> Result<Vec<String>, CatalogError> {
        let keywords: BTreeSet<String> = self
            .experiments
            .iter()
            .flat_map(|expt| expt.keywords.iter().cloned())
            .collect();
        Ok(keywords.into_iter().collect())
    }

    fn load_array(
        &self,
        experiment: &str,
        variable: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<ArrayHandle, CatalogError> {
        if let Some(reason) = &self.load_failure {
            return Err(CatalogError::Load {
                experiment: experiment.to_string(),
                variable: variable.to_string(),
                reason: reason.clone(),
            });
        }
        let matching: Vec<&VariableRecord> = self
            .rows
            .iter()
            .filter(|row| row.experiment == experiment && row.name == variable)
            .collect();
        let Some(first) = matching.first() else {
            return Err(CatalogError::Load {
                experiment: experiment.to_string(),
                variable: variable.to_string(),
                reason: "no such variable in experiment".to_string(),
            });
        };
        Ok(ArrayHandle {
            experiment: experiment.to_string(),
            variable: variable.to_string(),
            long_name: first.long_name.clone(),
            units: first.units.clone(),
            samples: matching.iter().map(|row| row.file_count.max(0) as usize).sum(),
            time_start: Some(start_time),
            time_end: Some(end_time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expt(name: &str, keywords: &[&str]) -> ExperimentRecord {
        ExperimentRecord {
            experiment: name.to_string(),
            description: None,
            notes: None,
            contact: None,
            email: None,
            ncfiles: None,
            created: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn var(experiment: &str, name: &str) -> VariableRecord {
        VariableRecord {
            experiment: experiment.to_string(),
            name: name.to_string(),
            long_name: format!("long {name}"),
            standard_name: String::new(),
            units: "m".to_string(),
            frequency: Some("1 monthly".to_string()),
            file_pattern: format!("output/{name}.nc"),
            file_count: 2,
            time_start: None,
            time_end: None,
            restart: false,
            coordinate: false,
        }
    }

    #[test]
    fn keyword_query_needs_all_keywords() {
        let source = MemoryCatalog::new(
            vec![expt("a", &["ocean", "ice"]), expt("b", &["ocean"])],
            Vec::new(),
        );
        let query: BTreeSet<String> = ["ocean", "ice"].iter().map(|s| s.to_string()).collect();
        let matched = source.experiments(false, Some(&query)).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].experiment, "a");
    }

    #[test]
    fn keyword_query_without_support_errors() {
        let source = MemoryCatalog::new(vec![expt("a", &["ocean"])], Vec::new())
            .without_keyword_support();
        let query: BTreeSet<String> = ["ocean"].iter().map(|s| s.to_string()).collect();
        assert!(source.experiments(false, Some(&query)).is_err());
        // Unfiltered listing still works.
        assert_eq!(source.experiments(true, None).unwrap().len(), 1);
    }

    #[test]
    fn variables_for_unknown_experiment_is_loud() {
        let source = MemoryCatalog::new(vec![expt("a", &[])], vec![var("a", "temp")]);
        assert!(source.variables("nope", None).is_err());
        assert_eq!(source.variables("a", None).unwrap().len(), 1);
    }

    #[test]
    fn keywords_are_deduplicated_and_sorted() {
        let source = MemoryCatalog::new(
            vec![expt("a", &["ocean", "ice"]), expt("b", &["ocean"])],
            Vec::new(),
        );
        assert_eq!(source.keywords().unwrap(), vec!["ice", "ocean"]);
    }

    #[test]
    fn load_array_reports_missing_variable() {
        let source = MemoryCatalog::new(vec![expt("a", &[])], vec![var("a", "temp")]);
        let start = NaiveDateTime::parse_from_str("2000-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let end = NaiveDateTime::parse_from_str("2001-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert!(source.load_array("a", "salt", start, end).is_err());
        let handle = source.load_array("a", "temp", start, end).unwrap();
        assert_eq!(handle.samples, 2);
    }
}
