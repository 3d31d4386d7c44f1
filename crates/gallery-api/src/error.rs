use gallery_types::EntityKind;
use thiserror::Error;

/// Errors attached to a single field of a query result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("source is not of type {expected}")]
    TypeMismatch { expected: EntityKind },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error generating schema: {0}")]
    Schema(String),
}
