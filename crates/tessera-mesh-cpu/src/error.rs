//! Error type for mesh building.

/// Failures reported back to callers. Broken internal invariants panic instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MeshError {
    pub fn invalid_argument<T: ToString>(msg: T) -> Self {
        MeshError::InvalidArgument(msg.to_string())
    }
}

pub type MeshResult<T> = Result<T, MeshError>;
