//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Deterministic business failures only. Store and transport failures are
/// modelled by the infrastructure crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The record already exists or changed underneath the caller.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
