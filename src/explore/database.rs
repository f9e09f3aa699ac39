//! Whole-catalog explorer: experiment list, keyword and variable
//! filtering, experiment metadata panel.

use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::catalog::index::CatalogIndex;
use crate::config::ExplorerConfig;
use crate::explore::ExploreError;
use crate::explore::basket::VariableFilterBasket;
use crate::explore::controls::{CheckboxState, InfoPanelState, SelectState};
use crate::explore::experiment::ExperimentExplorer;
use crate::explore::value_or_empty;
use crate::model::types::ExperimentRecord;

pub struct DatabaseExplorer {
    index: Arc<CatalogIndex>,
    pub experiment_list: SelectState,
    /// One checkbox per catalog keyword, in case-insensitive keyword order.
    pub keyword_panel: Vec<CheckboxState>,
    pub basket: VariableFilterBasket,
    pub experiment_info: InfoPanelState,
    config: ExplorerConfig,
}

impl DatabaseExplorer {
    pub fn new(index: Arc<CatalogIndex>, config: ExplorerConfig) -> Self {
        let mut experiment_list = SelectState::new(config.experiment_list.rows);
        experiment_list.set_options(experiment_options(index.experiments()));
        let keyword_panel = index
            .keywords()
            .iter()
            .map(|keyword| CheckboxState::new(keyword, false))
            .collect();
        let basket = VariableFilterBasket::new(index.unique_variables().to_vec(), &config);
        Self {
            index,
            experiment_list,
            keyword_panel,
            basket,
            experiment_info: InfoPanelState::default(),
            config,
        }
    }

    /// Experiment selection populates the metadata panel.
    pub fn on_experiment_selected(&mut self, name: Option<&str>) -> Result<(), ExploreError> {
        match name {
            None => {
                self.experiment_list.clear_selection();
                self.experiment_info.clear();
            }
            Some(name) => {
                self.experiment_list.select(name)?;
                let text = self
                    .index
                    .get_experiment(name)
                    .map(format_experiment_info)
                    .unwrap_or_default();
                self.experiment_info.set(text);
            }
        }
        Ok(())
    }

    pub fn on_keyword_toggled(&mut self, keyword: &str, on: bool) -> Result<(), ExploreError> {
        match self.keyword_panel.iter_mut().find(|c| c.label == keyword) {
            Some(checkbox) => {
                checkbox.value = on;
                Ok(())
            }
            None => Err(ExploreError::NotFound(keyword.to_string())),
        }
    }

    pub fn checked_keywords(&self) -> BTreeSet<String> {
        self.keyword_panel
            .iter()
            .filter(|c| c.value)
            .map(|c| c.label.clone())
            .collect()
    }

    /// Filter action: start from the full universe, intersect with each
    /// active facet, and replace the experiment list.
    pub fn filter_experiments(&mut self) {
        let mut options: FxHashSet<String> = self.index.universe();

        let keywords = self.checked_keywords();
        if !keywords.is_empty() {
            let matched = self.index.keyword_filter(&keywords);
            options.retain(|e| matched.contains(e));
        }

        let variables = self.basket.selected_vars();
        if !variables.is_empty() {
            let matched = self.index.variable_filter(&variables);
            options.retain(|e| matched.contains(e));
        }

        tracing::debug!(
            target: "modex::explore",
            keywords = keywords.len(),
            variables = variables.len(),
            experiments = options.len(),
            "filtered experiment list"
        );

        let mut names: Vec<String> = options.into_iter().collect();
        names.sort_by_key(|n| n.to_lowercase());
        self.experiment_list
            .set_options(names.into_iter().map(|n| (n, String::new())).collect());
        self.experiment_info.clear();
    }

    /// Load action: open an experiment explorer for the highlighted
    /// experiment. Nothing highlighted opens nothing.
    pub fn load_experiment(&self) -> Result<Option<ExperimentExplorer>, ExploreError> {
        match self.experiment_list.highlighted_label() {
            None => Ok(None),
            Some(name) => Ok(Some(ExperimentExplorer::new(
                Arc::clone(&self.index),
                Some(name),
                self.config.clone(),
            )?)),
        }
    }
}

fn experiment_options(experiments: &[ExperimentRecord]) -> Vec<(String, String)> {
    experiments
        .iter()
        .map(|e| (e.experiment.clone(), String::new()))
        .collect()
}

/// Plain-text metadata table for one experiment. Missing values render as
/// empty strings rather than a literal "None".
pub fn format_experiment_info(expt: &ExperimentRecord) -> String {
    format!(
        "Experiment: {}\n\
         Description: {}\n\
         Notes: {}\n\
         Contact: {} <{}>\n\
         No. files: {}\n\
         Created: {}",
        expt.experiment,
        value_or_empty(expt.description.as_ref()),
        value_or_empty(expt.notes.as_ref()),
        value_or_empty(expt.contact.as_ref()),
        value_or_empty(expt.email.as_ref()),
        value_or_empty(expt.ncfiles.as_ref()),
        value_or_empty(expt.created.as_ref()),
    )
}
