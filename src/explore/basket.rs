//! Variable filter basket: a selector feeding a chosen list.
//!
//! The available side is rendered through a [`VariableSelector`] (search,
//! hide checkboxes); the chosen side is a plain select list. A
//! [`TransferList`] is the single owner of which side holds which name, and
//! the selector pool is kept in step with its available side: every basket
//! mutation goes through the transfer list first, then mirrors into the
//! selector.

use std::collections::BTreeSet;

use crate::config::ExplorerConfig;
use crate::explore::ExploreError;
use crate::explore::controls::SelectState;
use crate::explore::selector::{VariableSelector, options_from_rows};
use crate::explore::transfer::{Side, TransferList};
use crate::model::types::VariableRecord;

#[derive(Debug, Clone)]
pub struct VariableFilterBasket {
    pub selector: VariableSelector,
    pub chosen: SelectState,
    transfer: TransferList,
}

impl VariableFilterBasket {
    pub fn new(variables: Vec<VariableRecord>, config: &ExplorerConfig) -> Self {
        Self {
            selector: VariableSelector::new(variables.clone(), &config.selector),
            chosen: SelectState::new(config.selector.rows),
            transfer: TransferList::new(variables),
        }
    }

    /// Selection event on the available list.
    pub fn on_available_selected(&mut self, name: Option<&str>) -> Result<(), ExploreError> {
        match name {
            Some(name) => {
                self.transfer.select(Side::Source, name)?;
                self.selector.on_selected(Some(name))?;
            }
            None => {
                self.transfer.clear_selection(Side::Source);
                self.selector.on_selected(None)?;
            }
        }
        Ok(())
    }

    /// Selection event on the chosen list.
    pub fn on_chosen_selected(&mut self, name: Option<&str>) -> Result<(), ExploreError> {
        match name {
            Some(name) => {
                self.transfer.select(Side::Chosen, name)?;
                self.chosen.select(name)?;
            }
            None => {
                self.transfer.clear_selection(Side::Chosen);
                self.chosen.clear_selection();
            }
        }
        Ok(())
    }

    /// Move the highlighted available variable into the chosen list.
    /// Nothing highlighted moves nothing.
    pub fn move_to_chosen(&mut self) -> Result<(), ExploreError> {
        let moved = self.transfer.move_to_chosen(None)?;
        if moved.is_empty() {
            return Ok(());
        }
        let names: Vec<String> = moved.iter().map(|r| r.name.clone()).collect();
        self.selector.delete(Some(&names))?;
        self.refresh_chosen();
        Ok(())
    }

    /// Move the highlighted chosen variable back to the available pool.
    pub fn move_to_source(&mut self) -> Result<(), ExploreError> {
        let moved = self.transfer.move_to_source(None)?;
        if moved.is_empty() {
            return Ok(());
        }
        self.selector.add(moved);
        self.refresh_chosen();
        Ok(())
    }

    /// Add brand-new variables to the available pool.
    pub fn add_available(&mut self, records: Vec<VariableRecord>) -> Result<(), ExploreError> {
        let inserted = self.transfer.add(Side::Source, records)?;
        self.selector.add(inserted);
        Ok(())
    }

    /// Chosen variable names, the set experiments get filtered by.
    pub fn selected_vars(&self) -> BTreeSet<String> {
        self.transfer
            .chosen_records()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    /// Entries across both sides; conserved by moves.
    pub fn total_len(&self) -> usize {
        self.transfer.total_len()
    }

    fn refresh_chosen(&mut self) {
        self.chosen
            .set_options(options_from_rows(self.transfer.chosen_records()));
    }
}
