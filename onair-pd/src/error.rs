//! Error types for onair-pd

use thiserror::Error;
use uuid::Uuid;

/// Result type for program director operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Program director error type
///
/// Only `TemplateNotFound` and `EmptyPattern` abort an hour resolution;
/// everything the selector cannot satisfy degrades to unresolved slots
/// instead of erroring, and per-checkpoint script failures are collected
/// rather than propagated.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Clock template id did not resolve (fatal for the requesting hour)
    #[error("Clock template not found: {0}")]
    TemplateNotFound(Uuid),

    /// Clock template exists but has no slots (fatal for the requesting hour)
    #[error("Clock template has no slots: {0}")]
    EmptyPattern(Uuid),

    /// Stored clock pattern violates template invariants
    #[error("Invalid clock pattern for template {template_id}: {reason}")]
    InvalidPattern { template_id: Uuid, reason: String },

    /// Hour playlist id did not resolve
    #[error("Hour playlist not found: {0}")]
    PlaylistNotFound(Uuid),

    /// DJ persona id did not resolve
    #[error("DJ persona not found: {0}")]
    PersonaNotFound(Uuid),

    /// Text-generation collaborator failure (caught per checkpoint)
    #[error("Script generation failed: {0}")]
    Generation(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// onair-common error
    #[error("Common error: {0}")]
    Common(#[from] onair_common::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
