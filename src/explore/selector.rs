//! Variable selector: live search over a select box, with hide checkboxes
//! and a long-name info line.

use rustc_hash::FxHashMap;

use crate::config::SelectorOptions;
use crate::explore::ExploreError;
use crate::explore::controls::{CheckboxState, InfoPanelState, SelectState, TextFieldState};
use crate::explore::filter::FacetFilterState;
use crate::model::types::VariableRecord;

#[derive(Debug, Clone)]
pub struct VariableSelector {
    filter: FacetFilterState,
    pub search: TextFieldState,
    pub list: SelectState,
    pub hide_coordinates: CheckboxState,
    pub hide_restarts: CheckboxState,
    pub info: InfoPanelState,
}

impl VariableSelector {
    pub fn new(variables: Vec<VariableRecord>, options: &SelectorOptions) -> Self {
        let filter = FacetFilterState::new(
            variables,
            options.hide_coordinates,
            options.hide_restarts,
        );
        let mut selector = Self {
            search: TextFieldState::with_placeholder(&options.search_placeholder),
            list: SelectState::new(options.rows),
            hide_coordinates: CheckboxState::new("Hide coordinates", options.hide_coordinates),
            hide_restarts: CheckboxState::new("Hide restarts", options.hide_restarts),
            info: InfoPanelState::default(),
            filter,
        };
        let visible = selector.filter.visible_rows();
        selector.refresh(visible);
        selector
    }

    /// Checkbox handler. Regating wipes the search and the highlight.
    pub fn on_hide_coordinates(&mut self, on: bool) {
        self.hide_coordinates.value = on;
        let visible = self.filter.set_hide_coordinates(on);
        self.search.clear();
        self.refresh(visible);
    }

    /// Checkbox handler. Regating wipes the search and the highlight.
    pub fn on_hide_restarts(&mut self, on: bool) {
        self.hide_restarts.value = on;
        let visible = self.filter.set_hide_restarts(on);
        self.search.clear();
        self.refresh(visible);
    }

    /// Live search handler: narrows the already-gated subset.
    pub fn on_search_changed(&mut self, text: &str) {
        self.search.value = text.to_string();
        let visible = self.filter.set_search(text);
        self.refresh(visible);
    }

    /// Selection handler: surface the long name of the highlighted variable.
    pub fn on_selected(&mut self, name: Option<&str>) -> Result<(), ExploreError> {
        match name {
            Some(name) => self.list.select(name)?,
            None => self.list.clear_selection(),
        }
        self.update_info();
        Ok(())
    }

    /// Remove variables from the pool, returning the removed rows. `None`
    /// removes the highlighted variable (a no-op when nothing is
    /// highlighted). The search term survives, so transferring several
    /// variables in a row does not force retyping it.
    pub fn delete(&mut self, names: Option<&[String]>) -> Result<Vec<VariableRecord>, ExploreError> {
        let names: Vec<String> = match names {
            Some(names) => {
                for name in names {
                    if !self.filter.rows().iter().any(|r| r.name == *name) {
                        return Err(ExploreError::NotFound(name.clone()));
                    }
                }
                names.to_vec()
            }
            None => match self.list.highlighted_label() {
                Some(label) => vec![label.to_string()],
                None => return Ok(Vec::new()),
            },
        };
        let removed = self.filter.remove_rows(&names);
        let visible = self.filter.visible_rows();
        self.refresh(visible);
        Ok(removed)
    }

    /// Add variables to the pool. Empty input is ignored. The pool changed,
    /// so the gate is recomputed, which also wipes the search.
    pub fn add(&mut self, records: Vec<VariableRecord>) {
        if records.is_empty() {
            return;
        }
        let visible = self.filter.add_rows(records);
        self.search.clear();
        self.refresh(visible);
    }

    /// Currently visible rows, in display order.
    pub fn visible(&self) -> Vec<VariableRecord> {
        self.filter.visible_rows()
    }

    /// The whole pool, including gated-out rows.
    pub fn pool(&self) -> &[VariableRecord] {
        self.filter.rows()
    }

    fn refresh(&mut self, visible: Vec<VariableRecord>) {
        self.list.set_options(options_from_rows(&visible));
        self.update_info();
    }

    fn update_info(&mut self) {
        let long_name = self
            .list
            .highlighted()
            .map(|(_, detail)| detail.to_string())
            .unwrap_or_default();
        self.info.set(format!("Long name: {long_name}"));
    }
}

/// Collapse rows to (name, long_name) options, case-insensitively sorted.
/// Duplicate names keep the last row seen, matching map-backed options.
pub(crate) fn options_from_rows(rows: &[VariableRecord]) -> Vec<(String, String)> {
    let mut by_name: FxHashMap<String, String> = FxHashMap::default();
    for row in rows {
        by_name.insert(row.name.clone(), row.long_name.clone());
    }
    let mut options: Vec<(String, String)> = by_name.into_iter().collect();
    options.sort_by(|a, b| (a.0.to_lowercase(), &a.0).cmp(&(b.0.to_lowercase(), &b.0)));
    options
}
