//! Core error type.

use thiserror::Error;

/// Errors produced by `evac-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sampling distribution: {0}")]
    InvalidDistribution(String),
}

/// Shorthand result type for `evac-core`.
pub type CoreResult<T> = Result<T, CoreError>;
