//! Typed view-state for the interactive controls the explorer drives.
//!
//! The actual widget toolkit lives outside this crate. Controllers mutate
//! these structs inside their event handlers; the toolkit renders them and
//! feeds value changes back in. Each struct replaces one entry of a
//! string-keyed widget registry with a named field.

use chrono::NaiveDateTime;

use crate::explore::ExploreError;

/// Free-text input.
#[derive(Debug, Clone, Default)]
pub struct TextFieldState {
    pub value: String,
    pub placeholder: String,
}

impl TextFieldState {
    pub fn with_placeholder(placeholder: &str) -> Self {
        Self {
            value: String::new(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Checkbox with a fixed label.
#[derive(Debug, Clone)]
pub struct CheckboxState {
    pub label: String,
    pub value: bool,
}

impl CheckboxState {
    pub fn new(label: &str, value: bool) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Single-select list over (label, detail) options.
///
/// The visible label is the variable or experiment name; the detail carries
/// the long name. The highlight is the Idle/ItemSelected state machine:
/// `None` is Idle, and replacing the options always drops back to Idle.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    options: Vec<(String, String)>,
    highlighted: Option<usize>,
    /// Rows the toolkit should display at once.
    pub rows: usize,
}

impl SelectState {
    pub fn new(rows: usize) -> Self {
        Self {
            options: Vec::new(),
            highlighted: None,
            rows,
        }
    }

    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Replace the options and drop the highlight.
    pub fn set_options(&mut self, options: Vec<(String, String)>) {
        self.options = options;
        self.highlighted = None;
    }

    /// Highlight the option with the given label. The UI can only select
    /// what it was shown, so an unknown label is a logic error.
    pub fn select(&mut self, label: &str) -> Result<(), ExploreError> {
        match self.options.iter().position(|(l, _)| l == label) {
            Some(idx) => {
                self.highlighted = Some(idx);
                Ok(())
            }
            None => Err(ExploreError::NotFound(label.to_string())),
        }
    }

    pub fn clear_selection(&mut self) {
        self.highlighted = None;
    }

    pub fn highlighted(&self) -> Option<(&str, &str)> {
        self.highlighted
            .and_then(|idx| self.options.get(idx))
            .map(|(label, detail)| (label.as_str(), detail.as_str()))
    }

    pub fn highlighted_label(&self) -> Option<&str> {
        self.highlighted().map(|(label, _)| label)
    }
}

/// Date-range slider: an ordered list of boundary dates plus the currently
/// selected (start, end) index pair. Disabled whenever the underlying
/// variable has no usable time axis.
#[derive(Debug, Clone, Default)]
pub struct DateRangeState {
    options: Vec<NaiveDateTime>,
    selected: Option<(usize, usize)>,
    pub enabled: bool,
}

impl DateRangeState {
    /// Populate the boundaries and select the full span.
    pub fn set_options(&mut self, dates: Vec<NaiveDateTime>) {
        if dates.len() < 2 {
            self.disable();
            return;
        }
        self.selected = Some((0, dates.len() - 1));
        self.options = dates;
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.options.clear();
        self.selected = None;
        self.enabled = false;
    }

    pub fn options(&self) -> &[NaiveDateTime] {
        &self.options
    }

    pub fn select_indices(&mut self, start: usize, end: usize) -> Result<(), ExploreError> {
        if !self.enabled || start > end || end >= self.options.len() {
            return Err(ExploreError::BadRange(format!("indices ({start}, {end})")));
        }
        self.selected = Some((start, end));
        Ok(())
    }

    pub fn selected(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.selected
            .map(|(start, end)| (self.options[start], self.options[end]))
    }
}

/// Plain-text informational panel.
#[derive(Debug, Clone, Default)]
pub struct InfoPanelState {
    pub text: String,
}

impl InfoPanelState {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
