//! Controller configuration.

use crate::selection::SelectionMode;

/// Default page size per fetch.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Configuration for a [`crate::SelectController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectConfig {
    /// Page size per fetch.
    pub limit: usize,
    /// Selection cardinality, fixed for the controller's lifetime.
    pub mode: SelectionMode,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            mode: SelectionMode::Single,
        }
    }
}

impl SelectConfig {
    /// Single-select configuration with the default page size.
    pub fn single() -> Self {
        Self::default()
    }

    /// Multi-select configuration with the default page size.
    pub fn multi() -> Self {
        Self {
            mode: SelectionMode::Multi,
            ..Self::default()
        }
    }

    /// Set the page size per fetch.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }
}
