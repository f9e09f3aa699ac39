//! Two-list (available/chosen) transfer model.
//!
//! Entries live on exactly one side at a time, keyed by variable name; a
//! name may map to several variant rows (e.g. a restart and a regular copy)
//! which always travel together. Moving never creates or destroys entries,
//! so the total count is conserved across any sequence of moves.

use rustc_hash::FxHashSet;

use crate::explore::ExploreError;
use crate::model::types::VariableRecord;

/// Which side of the pair an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Source,
    Chosen,
}

#[derive(Debug, Clone, Default)]
struct TransferSide {
    entries: Vec<VariableRecord>,
    /// Idle (`None`) or ItemSelected.
    highlighted: Option<String>,
}

impl TransferSide {
    fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|r| r.name == name)
    }

    fn name_set(&self) -> FxHashSet<String> {
        self.entries.iter().map(|r| r.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransferList {
    source: TransferSide,
    chosen: TransferSide,
}

impl TransferList {
    /// Seed the available side with a pool of rows.
    pub fn new(available: Vec<VariableRecord>) -> Self {
        Self {
            source: TransferSide {
                entries: available,
                highlighted: None,
            },
            chosen: TransferSide::default(),
        }
    }

    pub fn source_records(&self) -> &[VariableRecord] {
        &self.source.entries
    }

    pub fn chosen_records(&self) -> &[VariableRecord] {
        &self.chosen.entries
    }

    /// Conserved across moves; only `add` and `delete` change it.
    pub fn total_len(&self) -> usize {
        self.source.entries.len() + self.chosen.entries.len()
    }

    pub fn highlighted(&self, side: Side) -> Option<&str> {
        self.side(side).highlighted.as_deref()
    }

    /// Highlight one entry by name. The UI can only select what it was
    /// shown, so an unknown name is a logic error.
    pub fn select(&mut self, side: Side, name: &str) -> Result<(), ExploreError> {
        if !self.side(side).contains(name) {
            return Err(ExploreError::NotFound(name.to_string()));
        }
        self.side_mut(side).highlighted = Some(name.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self, side: Side) {
        self.side_mut(side).highlighted = None;
    }

    /// Insert brand-new records into a side, returning the ones actually
    /// inserted. Empty input is a silent no-op. Names the side already holds
    /// are skipped (idempotent); a name held by the opposite side would
    /// break disjointness and is loud. Inserting resets the highlight.
    pub fn add(
        &mut self,
        side: Side,
        records: Vec<VariableRecord>,
    ) -> Result<Vec<VariableRecord>, ExploreError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let existing = self.side(side).name_set();
        let mut inserted = Vec::new();
        for record in records {
            if self.other(side).contains(&record.name) {
                return Err(ExploreError::SidesOverlap(record.name));
            }
            if existing.contains(&record.name) {
                continue;
            }
            self.side_mut(side).entries.push(record.clone());
            inserted.push(record);
        }
        self.side_mut(side).highlighted = None;
        Ok(inserted)
    }

    /// Remove entries by name, returning them. `None` removes the single
    /// highlighted entry; with nothing highlighted that is the "nothing
    /// selected" case and removes nothing. Explicit names must exist.
    pub fn delete(
        &mut self,
        side: Side,
        names: Option<&[String]>,
    ) -> Result<Vec<VariableRecord>, ExploreError> {
        let names: Vec<String> = match names {
            Some(names) => {
                for name in names {
                    if !self.side(side).contains(name) {
                        return Err(ExploreError::NotFound(name.clone()));
                    }
                }
                names.to_vec()
            }
            None => match self.side(side).highlighted.clone() {
                Some(name) => vec![name],
                None => return Ok(Vec::new()),
            },
        };

        let wanted: FxHashSet<&str> = names.iter().map(String::as_str).collect();
        let state = self.side_mut(side);
        let (removed, kept): (Vec<VariableRecord>, Vec<VariableRecord>) =
            std::mem::take(&mut state.entries)
                .into_iter()
                .partition(|row| wanted.contains(row.name.as_str()));
        state.entries = kept;
        if state
            .highlighted
            .as_deref()
            .is_some_and(|h| wanted.contains(h))
        {
            state.highlighted = None;
        }
        Ok(removed)
    }

    /// Move entries from the available side to the chosen side. With `None`
    /// the highlighted entry moves; nothing highlighted moves nothing.
    pub fn move_to_chosen(
        &mut self,
        names: Option<&[String]>,
    ) -> Result<Vec<VariableRecord>, ExploreError> {
        let moved = self.delete(Side::Source, names)?;
        self.add(Side::Chosen, moved.clone())?;
        Ok(moved)
    }

    /// Move entries from the chosen side back to the available side.
    pub fn move_to_source(
        &mut self,
        names: Option<&[String]>,
    ) -> Result<Vec<VariableRecord>, ExploreError> {
        let moved = self.delete(Side::Chosen, names)?;
        self.add(Side::Source, moved.clone())?;
        Ok(moved)
    }

    fn side(&self, side: Side) -> &TransferSide {
        match side {
            Side::Source => &self.source,
            Side::Chosen => &self.chosen,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut TransferSide {
        match side {
            Side::Source => &mut self.source,
            Side::Chosen => &mut self.chosen,
        }
    }

    fn other(&self, side: Side) -> &TransferSide {
        match side {
            Side::Source => &self.chosen,
            Side::Chosen => &self.source,
        }
    }
}
