//! Error types for lclsearch

use thiserror::Error;

/// Main error type for lclsearch operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocalSearchError {
    /// A strategy was constructed with an out-of-domain value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A collaborator was used outside its expected lifecycle.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A move or problem dimension references an index outside the solution.
    #[error("Index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// An evaluation produced a value that invalidates the acceptance calculus.
    #[error("Computation failure: {0}")]
    ComputationFailure(String),
}

impl LocalSearchError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn computation_failure(msg: impl Into<String>) -> Self {
        Self::ComputationFailure(msg.into())
    }
}

/// Result type alias for lclsearch operations
pub type Result<T> = std::result::Result<T, LocalSearchError>;

/// Fails with [`LocalSearchError::OutOfRange`] unless `index < len`.
pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(LocalSearchError::OutOfRange { index, len })
    }
}
