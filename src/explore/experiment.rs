//! Single-experiment explorer: variable browsing, date-range selection and
//! data loading.
//!
//! The loaded array lands in an explicit result slot on the controller, so
//! the embedding notebook reads it from the explorer object rather than
//! from ambient module state.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::catalog::index::CatalogIndex;
use crate::catalog::source::ArrayHandle;
use crate::config::{ExplorerConfig, SelectorOptions};
use crate::explore::ExploreError;
use crate::explore::controls::{DateRangeState, InfoPanelState, SelectState};
use crate::explore::frequency::{date_range, frequency_to_rule};
use crate::explore::selector::VariableSelector;
use crate::explore::value_or_empty;
use crate::model::types::VariableRecord;

pub struct ExperimentExplorer {
    index: Arc<CatalogIndex>,
    experiment: String,
    /// Aggregated (name, frequency) summaries for the current experiment.
    variables: Vec<VariableRecord>,
    /// Dropdown over every experiment in the catalog.
    pub experiment_picker: SelectState,
    pub selector: VariableSelector,
    pub variable_info: InfoPanelState,
    pub date_range: DateRangeState,
    /// Load progress, the echoed command and the result summary or error.
    pub result_panel: InfoPanelState,
    data: Option<ArrayHandle>,
    config: ExplorerConfig,
}

impl ExperimentExplorer {
    /// Open on the given experiment; an unknown or absent name falls back
    /// to the first experiment in the catalog.
    pub fn new(
        index: Arc<CatalogIndex>,
        experiment: Option<&str>,
        config: ExplorerConfig,
    ) -> Result<Self, ExploreError> {
        let experiment = match experiment {
            Some(name) if index.get_experiment(name).is_some() => name.to_string(),
            _ => index
                .experiments()
                .first()
                .map(|e| e.experiment.clone())
                .ok_or(ExploreError::EmptyCatalog)?,
        };

        let mut experiment_picker = SelectState::new(1);
        experiment_picker.set_options(
            index
                .experiments()
                .iter()
                .map(|e| (e.experiment.clone(), String::new()))
                .collect(),
        );
        experiment_picker.select(&experiment)?;

        let mut explorer = Self {
            index,
            experiment: experiment.clone(),
            variables: Vec::new(),
            experiment_picker,
            selector: VariableSelector::new(Vec::new(), &config.selector),
            variable_info: InfoPanelState::default(),
            date_range: DateRangeState::default(),
            result_panel: InfoPanelState::default(),
            data: None,
            config,
        };
        explorer.load_experiment_variables(&experiment);
        Ok(explorer)
    }

    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    /// The most recently loaded array, if any.
    pub fn data(&self) -> Option<&ArrayHandle> {
        self.data.as_ref()
    }

    /// Dropdown handler: switch experiments, re-query variables, reset the
    /// search and selection.
    pub fn on_experiment_changed(&mut self, name: &str) -> Result<(), ExploreError> {
        if self.index.get_experiment(name).is_none() {
            return Err(ExploreError::UnknownExperiment(name.to_string()));
        }
        self.experiment_picker.select(name)?;
        self.experiment = name.to_string();
        self.load_experiment_variables(name);
        Ok(())
    }

    /// Selection handler: fill the variable info panel and configure the
    /// date range from the variable's time bounds and frequency.
    pub fn on_variable_selected(&mut self, name: Option<&str>) -> Result<(), ExploreError> {
        self.selector.on_selected(name)?;
        self.date_range.disable();

        let Some(name) = name else {
            self.variable_info.set(format_variable_info("", ""));
            return Ok(());
        };
        // Summaries can hold one row per frequency for the same name; the
        // listing order makes the first one the representative.
        let Some(row) = self.variables.iter().find(|r| r.name == name).cloned() else {
            self.variable_info.set(format_variable_info("", ""));
            return Ok(());
        };
        self.variable_info.set(format_variable_info(
            &row.long_name,
            &value_or_empty(row.frequency.as_ref()),
        ));

        let (Some(start), Some(end)) = (row.time_start, row.time_end) else {
            return Ok(());
        };
        let Some(frequency) = row.frequency.as_deref() else {
            return Ok(());
        };
        if frequency == "static" {
            return Ok(());
        }
        let rule = frequency_to_rule(frequency);
        match date_range(start, end, &rule) {
            Ok(dates) => self.date_range.set_options(dates),
            Err(err) => {
                tracing::debug!(
                    target: "modex::explore",
                    variable = name,
                    rule = %rule,
                    error = %err,
                    "date range unavailable"
                );
            }
        }
        Ok(())
    }

    pub fn on_date_range_changed(&mut self, start: usize, end: usize) -> Result<(), ExploreError> {
        self.date_range.select_indices(start, end)
    }

    /// Load action: echo the equivalent data-access call, issue it once,
    /// store the result. A failure becomes a message; the explorer stays
    /// usable. Nothing highlighted loads nothing.
    pub fn load(&mut self) {
        let Some(variable) = self.selector.list.highlighted_label().map(str::to_string) else {
            return;
        };
        let row = self.variables.iter().find(|r| r.name == variable).cloned();
        let span = self.date_range.selected().or_else(|| {
            row.as_ref().and_then(|r| r.time_start.zip(r.time_end))
        });
        let Some((start, end)) = span else {
            self.result_panel
                .set(format!("Variable {variable} has no time axis to load"));
            return;
        };

        let command = load_command(&self.experiment, &variable, start, end);
        self.result_panel
            .set(format!("Loading data, using:\n  {command}\nPlease wait ..."));
        tracing::info!(
            target: "modex::explore",
            experiment = %self.experiment,
            variable = %variable,
            "loading array"
        );

        match self.index.load_array(&self.experiment, &variable, start, end) {
            Ok(handle) => {
                self.result_panel
                    .set(format!("Loaded data with:\n  {command}\n{handle}"));
                self.data = Some(handle);
            }
            Err(err) => {
                tracing::warn!(
                    target: "modex::explore",
                    experiment = %self.experiment,
                    variable = %variable,
                    error = %err,
                    "array load failed"
                );
                self.result_panel
                    .set(format!("Error loading variable {variable} data: {err}"));
            }
        }
    }

    fn load_experiment_variables(&mut self, name: &str) {
        self.variables = self.index.get_variables(name, None);
        // Fresh pool for the selector; checkbox settings survive the switch.
        let options = SelectorOptions {
            hide_coordinates: self.selector.hide_coordinates.value,
            hide_restarts: self.selector.hide_restarts.value,
            ..self.config.selector.clone()
        };
        self.selector = VariableSelector::new(self.variables.clone(), &options);
        self.variable_info.set(format_variable_info("", ""));
        self.date_range.disable();
        tracing::debug!(
            target: "modex::explore",
            experiment = name,
            variables = self.variables.len(),
            "loaded experiment variables"
        );
    }
}

/// The reproducible equivalent of the load the explorer performs; shown to
/// the user so it can be copied into a script.
fn load_command(experiment: &str, variable: &str, start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!(
        "load_array(\"{experiment}\", \"{variable}\", session, start_time=\"{start}\", end_time=\"{end}\")"
    )
}

fn format_variable_info(long_name: &str, frequency: &str) -> String {
    format!("Long name: {long_name}\nFrequency: {frequency}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::MemoryCatalog;
    use crate::catalog::source::CatalogSource;
    use crate::model::types::ExperimentRecord;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn expt(name: &str) -> ExperimentRecord {
        ExperimentRecord {
            experiment: name.to_string(),
            description: None,
            notes: None,
            contact: None,
            email: None,
            ncfiles: None,
            created: None,
            keywords: Default::default(),
        }
    }

    fn var(
        experiment: &str,
        name: &str,
        frequency: Option<&str>,
        bounds: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> VariableRecord {
        VariableRecord {
            experiment: experiment.to_string(),
            name: name.to_string(),
            long_name: format!("long {name}"),
            standard_name: String::new(),
            units: "m".to_string(),
            frequency: frequency.map(str::to_string),
            file_pattern: format!("output/{name}.nc"),
            file_count: 3,
            time_start: bounds.map(|(s, _)| s),
            time_end: bounds.map(|(_, e)| e),
            restart: false,
            coordinate: false,
        }
    }

    fn rows() -> Vec<VariableRecord> {
        vec![
            var(
                "e1",
                "temp",
                Some("1 monthly"),
                Some((ts(2000, 1, 1), ts(2000, 12, 31))),
            ),
            var("e1", "kmt", Some("static"), None),
            var("e2", "salt", Some("1 daily"), Some((ts(2001, 1, 1), ts(2001, 1, 10)))),
        ]
    }

    fn build_index(source: MemoryCatalog) -> Arc<CatalogIndex> {
        let source: Arc<dyn CatalogSource> = Arc::new(source);
        Arc::new(CatalogIndex::build(source, None).unwrap())
    }

    fn explorer() -> ExperimentExplorer {
        let index = build_index(MemoryCatalog::new(vec![expt("e1"), expt("e2")], rows()));
        ExperimentExplorer::new(index, Some("e1"), ExplorerConfig::default()).unwrap()
    }

    #[test]
    fn unknown_experiment_falls_back_to_the_first() {
        let index = build_index(MemoryCatalog::new(vec![expt("e1"), expt("e2")], rows()));
        let explorer =
            ExperimentExplorer::new(index, Some("nope"), ExplorerConfig::default()).unwrap();
        assert_eq!(explorer.experiment(), "e1");
        assert_eq!(explorer.experiment_picker.highlighted_label(), Some("e1"));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let index = build_index(MemoryCatalog::new(Vec::new(), Vec::new()));
        assert!(matches!(
            ExperimentExplorer::new(index, None, ExplorerConfig::default()),
            Err(ExploreError::EmptyCatalog)
        ));
    }

    #[test]
    fn selecting_a_dated_variable_enables_the_range() {
        let mut explorer = explorer();
        explorer.on_variable_selected(Some("temp")).unwrap();
        assert!(explorer.date_range.enabled);
        assert_eq!(explorer.date_range.options().len(), 12);
        assert_eq!(
            explorer.date_range.selected(),
            Some((ts(2000, 1, 1), ts(2000, 12, 1)))
        );
        assert!(explorer.variable_info.text.contains("Long name: long temp"));
        assert!(explorer.variable_info.text.contains("Frequency: 1 monthly"));
    }

    #[test]
    fn static_variables_leave_the_range_disabled() {
        let mut explorer = explorer();
        explorer.on_variable_selected(Some("kmt")).unwrap();
        assert!(!explorer.date_range.enabled);
        assert!(explorer.variable_info.text.contains("Frequency: static"));
    }

    #[test]
    fn deselecting_clears_the_info_panel() {
        let mut explorer = explorer();
        explorer.on_variable_selected(Some("temp")).unwrap();
        explorer.on_variable_selected(None).unwrap();
        assert_eq!(explorer.variable_info.text, "Long name: \nFrequency: ");
        assert!(!explorer.date_range.enabled);
    }

    #[test]
    fn switching_experiments_swaps_the_variable_pool() {
        let mut explorer = explorer();
        explorer.on_experiment_changed("e2").unwrap();
        assert_eq!(explorer.experiment(), "e2");
        let labels: Vec<&str> = explorer
            .selector
            .list
            .options()
            .iter()
            .map(|(l, _)| l.as_str())
            .collect();
        assert_eq!(labels, vec!["salt"]);
        assert!(explorer.on_experiment_changed("nope").is_err());
    }

    #[test]
    fn load_with_nothing_selected_is_a_no_op() {
        let mut explorer = explorer();
        explorer.load();
        assert!(explorer.data().is_none());
        assert!(explorer.result_panel.text.is_empty());
    }

    #[test]
    fn load_stores_the_array_and_echoes_the_command() {
        let mut explorer = explorer();
        explorer.on_variable_selected(Some("temp")).unwrap();
        explorer.load();
        let handle = explorer.data().expect("array should be stored");
        assert_eq!(handle.variable, "temp");
        assert!(explorer.result_panel.text.starts_with("Loaded data with:"));
        assert!(explorer.result_panel.text.contains("load_array(\"e1\", \"temp\""));
        assert!(explorer.result_panel.text.contains("<DataArray 'temp'"));
    }

    #[test]
    fn load_failure_becomes_a_message_and_the_explorer_stays_usable() {
        let index = build_index(
            MemoryCatalog::new(vec![expt("e1"), expt("e2")], rows()).failing_loads("backend down"),
        );
        let mut explorer =
            ExperimentExplorer::new(index, Some("e1"), ExplorerConfig::default()).unwrap();
        explorer.on_variable_selected(Some("temp")).unwrap();
        explorer.load();
        assert!(explorer.data().is_none());
        assert!(
            explorer
                .result_panel
                .text
                .starts_with("Error loading variable temp data:")
        );
        // Still usable afterwards.
        explorer.on_variable_selected(Some("kmt")).unwrap();
        assert!(explorer.variable_info.text.contains("Frequency: static"));
    }
}
