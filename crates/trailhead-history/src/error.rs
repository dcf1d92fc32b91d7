use thiserror::Error;

/// Failures reported by a [`LocationSource`](crate::LocationSource)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The platform refuses further state changes
    #[error("history quota exceeded after {limit} state changes")]
    QuotaExceeded { limit: usize },

    #[error("`{operation}` is not supported by this location source")]
    Unsupported { operation: &'static str },

    #[error("cannot move {delta} entries from index {index}")]
    OutOfRange { index: usize, delta: isize },
}

/// History store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The store went away while a transition was still pending
    #[error("history store was dropped before the transition completed")]
    StoreDropped,

    #[error(transparent)]
    Source(#[from] SourceError),
}
