//! Dropdown navigation state machine.
//!
//! Tracks whether the dropdown is open and which index the keyboard has
//! highlighted. Transitions are driven by discrete [`NavEvent`]s; the
//! machine never mutates the selection itself - when a commit is requested
//! it reports the index to commit and leaves the side effect to the
//! composing controller.

/// Discrete events driving the dropdown state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Pointer activation: flip open/closed.
    ToggleOpen,
    /// Open without moving the highlight (arrow key while closed).
    Open,
    /// Close without side effects.
    Close,
    /// Move the highlight by the given delta, clamped. No wraparound.
    MoveHighlight(isize),
    /// Commit the highlighted item and close.
    CommitSelection,
    /// Escape pressed: close, no selection change.
    EscapeClose,
    /// Focus left the component: close, no selection change.
    Blur,
}

/// Result of applying a [`NavEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// No selection side effect requested.
    None,
    /// Commit the item at this index (the dropdown has already closed).
    Commit(usize),
}

/// Open/closed state plus the highlighted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub is_open: bool,
    /// Keyboard-focused position among loaded items, independent of
    /// selection state.
    pub highlighted: usize,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            is_open: false,
            highlighted: 0,
        }
    }
}

/// The dropdown navigation state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropdownNav {
    state: NavState,
}

impl DropdownNav {
    /// Create a closed dropdown with the highlight at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current navigation state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Apply an event against the current loaded item count.
    pub fn apply(&mut self, event: NavEvent, item_count: usize) -> NavOutcome {
        match event {
            NavEvent::ToggleOpen => {
                self.state.is_open = !self.state.is_open;
                NavOutcome::None
            }
            NavEvent::Open => {
                self.state.is_open = true;
                NavOutcome::None
            }
            NavEvent::Close | NavEvent::EscapeClose | NavEvent::Blur => {
                self.state.is_open = false;
                NavOutcome::None
            }
            NavEvent::MoveHighlight(delta) => {
                if self.state.is_open {
                    self.state.highlighted = Self::step(self.state.highlighted, delta, item_count);
                }
                NavOutcome::None
            }
            NavEvent::CommitSelection => {
                if !self.state.is_open {
                    return NavOutcome::None;
                }
                self.state.is_open = false;
                if self.state.highlighted < item_count {
                    NavOutcome::Commit(self.state.highlighted)
                } else {
                    NavOutcome::None
                }
            }
        }
    }

    /// Pointer hover: move the highlight to `index`, clamped, while open.
    pub fn hover(&mut self, index: usize, item_count: usize) {
        if self.state.is_open && item_count > 0 {
            self.state.highlighted = index.min(item_count - 1);
        }
    }

    /// Re-clamp the highlight after the item count changed.
    ///
    /// Growth never resets the highlight, so the user's position survives
    /// incremental page loads.
    pub fn clamp(&mut self, item_count: usize) {
        let max_index = item_count.saturating_sub(1);
        if self.state.highlighted > max_index {
            self.state.highlighted = max_index;
        }
    }

    fn step(current: usize, delta: isize, item_count: usize) -> usize {
        if item_count == 0 {
            return 0;
        }
        let max_index = (item_count - 1) as isize;
        (current as isize + delta).clamp(0, max_index) as usize
    }
}
