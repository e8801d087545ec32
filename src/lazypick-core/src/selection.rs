//! Selected value state for single- and multi-select modes.
//!
//! Pure value-level operations: membership is decided by string equality on
//! display labels, independent of which pages are currently loaded. Two
//! distinct records sharing the same display label are therefore one
//! selectable value; toggling or clearing the label affects all occurrences.

/// Fixed selection cardinality for a controller instance's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// At most one selected value; selecting replaces it.
    #[default]
    Single,
    /// Any number of selected values, unique, in insertion order.
    Multi,
}

/// The selected value(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Single(Option<String>),
    Multi(Vec<String>),
}

impl SelectionState {
    /// Number of selected values.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(value) => usize::from(value.is_some()),
            Self::Multi(values) => values.len(),
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected labels in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => value.iter().map(String::as_str).collect(),
            Self::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Owns the selected value(s) for one controller.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    state: SelectionState,
}

impl SelectionModel {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        let state = match mode {
            SelectionMode::Single => SelectionState::Single(None),
            SelectionMode::Multi => SelectionState::Multi(Vec::new()),
        };
        Self { state }
    }

    /// Current selection.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Toggle a value. Returns whether it is selected afterwards.
    ///
    /// Single mode unconditionally replaces the current value. Multi mode
    /// removes the value when present, otherwise appends it.
    pub fn toggle(&mut self, label: &str) -> bool {
        match &mut self.state {
            SelectionState::Single(value) => {
                *value = Some(label.to_string());
                true
            }
            SelectionState::Multi(values) => {
                if let Some(position) = values.iter().position(|v| v == label) {
                    values.remove(position);
                    false
                } else {
                    values.push(label.to_string());
                    true
                }
            }
        }
    }

    /// Remove a value; no-op when absent.
    pub fn remove(&mut self, label: &str) {
        match &mut self.state {
            SelectionState::Single(value) => {
                if value.as_deref() == Some(label) {
                    *value = None;
                }
            }
            SelectionState::Multi(values) => {
                values.retain(|v| v != label);
            }
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        match &mut self.state {
            SelectionState::Single(value) => *value = None,
            SelectionState::Multi(values) => values.clear(),
        }
    }

    /// Pure membership test, independent of the loaded page window.
    pub fn is_selected(&self, label: &str) -> bool {
        match &self.state {
            SelectionState::Single(value) => value.as_deref() == Some(label),
            SelectionState::Multi(values) => values.iter().any(|v| v == label),
        }
    }
}
