//! Error types for fetch operations.

/// Classified failure of a page fetch.
///
/// Both variants surface identically through `FetchState::error`; the split
/// exists for diagnostics. Variants are `Clone` so they can live inside
/// published snapshots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport or protocol-level failure reported by the remote side.
    #[error("remote request failed: {message}")]
    Remote {
        /// HTTP status, when one was received.
        status: Option<u16>,
        message: String,
    },

    /// Unexpected defect while processing a response (e.g. malformed payload).
    #[error("local processing error: {0}")]
    Local(String),
}

impl FetchError {
    /// Build a `Remote` error from an optional status and a message.
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Build a `Local` error from a message.
    pub fn local(message: impl Into<String>) -> Self {
        Self::Local(message.into())
    }

    /// Whether this error came from the remote side.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let remote = FetchError::remote(Some(500), "boom");
        let local = FetchError::local("bad payload");
        assert!(remote.is_remote());
        assert!(!local.is_remote());
    }

    #[test]
    fn test_display_includes_message() {
        let err = FetchError::remote(Some(404), "not found");
        assert!(err.to_string().contains("not found"));
    }
}
