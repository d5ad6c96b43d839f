//! Error types for histogram operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistogramError {
    /// Operation invoked before `allocate`/`merge`, or a query on an empty histogram
    #[error("invalid histogram state: {0}")]
    InvalidState(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("bin index {index} out of range, histogram has {len} bins")]
    IndexOutOfRange { index: usize, len: usize },

    /// Serialized state that does not follow the `[target, (position, weight)*]` layout
    #[error("malformed serialized histogram: {0}")]
    MalformedInput(String),
}

pub type Result<T> = std::result::Result<T, HistogramError>;
