//! Derived visibility over a variable table.
//!
//! Two layers: the checkboxes *gate* which rows can ever be shown, and the
//! search text *narrows* within that gate. The asymmetry is deliberate and
//! load-bearing: clearing the search restores exactly the gated set, never
//! the unfiltered table, while toggling a checkbox rebuilds the gate and
//! resets the search.

use rustc_hash::FxHashSet;

use crate::model::types::VariableRecord;

#[derive(Debug, Clone)]
pub struct FacetFilterState {
    rows: Vec<VariableRecord>,
    /// Checkbox-driven visibility mask, parallel to `rows`. Recomputed,
    /// never edited in place.
    gate: Vec<bool>,
    hide_coordinates: bool,
    hide_restarts: bool,
    search_text: String,
}

impl FacetFilterState {
    pub fn new(rows: Vec<VariableRecord>, hide_coordinates: bool, hide_restarts: bool) -> Self {
        let mut state = Self {
            rows,
            gate: Vec::new(),
            hide_coordinates,
            hide_restarts,
            search_text: String::new(),
        };
        state.recompute_gate();
        state
    }

    pub fn hide_coordinates(&self) -> bool {
        self.hide_coordinates
    }

    pub fn hide_restarts(&self) -> bool {
        self.hide_restarts
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// The whole pool, gated or not.
    pub fn rows(&self) -> &[VariableRecord] {
        &self.rows
    }

    /// Set all three facets at once and recompute from scratch.
    pub fn apply(
        &mut self,
        hide_coordinates: bool,
        hide_restarts: bool,
        search_text: &str,
    ) -> Vec<VariableRecord> {
        self.hide_coordinates = hide_coordinates;
        self.hide_restarts = hide_restarts;
        self.search_text = search_text.to_string();
        self.recompute_gate();
        self.visible_rows()
    }

    /// Toggle the coordinate checkbox. Rebuilding the gate resets the search.
    pub fn set_hide_coordinates(&mut self, on: bool) -> Vec<VariableRecord> {
        self.hide_coordinates = on;
        self.search_text.clear();
        self.recompute_gate();
        self.visible_rows()
    }

    /// Toggle the restart checkbox. Rebuilding the gate resets the search.
    pub fn set_hide_restarts(&mut self, on: bool) -> Vec<VariableRecord> {
        self.hide_restarts = on;
        self.search_text.clear();
        self.recompute_gate();
        self.visible_rows()
    }

    /// Narrow within the gated subset. Never re-admits gated-out rows.
    pub fn set_search(&mut self, text: &str) -> Vec<VariableRecord> {
        self.search_text = text.to_string();
        self.visible_rows()
    }

    /// Rows passing the gate and the current search, case-insensitively
    /// sorted by name for display.
    pub fn visible_rows(&self) -> Vec<VariableRecord> {
        let mut visible: Vec<VariableRecord> = self
            .rows
            .iter()
            .zip(&self.gate)
            .filter(|(_, gated)| **gated)
            .map(|(row, _)| row)
            .filter(|row| self.matches_search(row))
            .cloned()
            .collect();
        visible.sort_by(|a, b| {
            (a.name.to_lowercase(), &a.name).cmp(&(b.name.to_lowercase(), &b.name))
        });
        visible
    }

    /// Grow the pool. The gate is stale afterwards, so it is rebuilt, which
    /// also resets the search.
    pub fn add_rows(&mut self, rows: Vec<VariableRecord>) -> Vec<VariableRecord> {
        if rows.is_empty() {
            return self.visible_rows();
        }
        self.rows.extend(rows);
        self.search_text.clear();
        self.recompute_gate();
        self.visible_rows()
    }

    /// Remove every row whose name is in `names`, returning the removed
    /// rows. The search term is kept: transferring several variables in a
    /// row should not force retyping it.
    pub fn remove_rows(&mut self, names: &[String]) -> Vec<VariableRecord> {
        let wanted: FxHashSet<&str> = names.iter().map(String::as_str).collect();
        let (removed, kept): (Vec<VariableRecord>, Vec<VariableRecord>) =
            std::mem::take(&mut self.rows)
                .into_iter()
                .partition(|row| wanted.contains(row.name.as_str()));
        self.rows = kept;
        self.recompute_gate();
        removed
    }

    fn matches_search(&self, row: &VariableRecord) -> bool {
        self.search_text.is_empty()
            || row.name.contains(&self.search_text)
            || row.long_name.contains(&self.search_text)
    }

    /// A row is gated out iff a checkbox is on and the row carries that
    /// flag. Unnamed rows never show.
    fn recompute_gate(&mut self) {
        let hide_coordinates = self.hide_coordinates;
        let hide_restarts = self.hide_restarts;
        self.gate = self
            .rows
            .iter()
            .map(|row| {
                !row.name.is_empty()
                    && !(hide_restarts && row.restart)
                    && !(hide_coordinates && row.coordinate)
            })
            .collect();
    }
}
