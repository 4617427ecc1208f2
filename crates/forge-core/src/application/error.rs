//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! business rules. Business rule violations are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The prompter could not obtain an answer.
    #[error("Could not read an answer for '{key}': {reason}")]
    InputFailed { key: String, reason: String },

    /// The tracker refused or failed to record an event.
    #[error("Could not record the event: {reason}")]
    TrackingFailed { reason: String },

    /// The printer could not write.
    #[error("Could not print output: {reason}")]
    PrintFailed { reason: String },

    /// The HTTP listener could not bind or stopped with an error.
    #[error("Listener on {address} failed: {reason}")]
    ListenerFailed { address: String, reason: String },

    /// Template resolution failed.
    #[error("Template resolution failed: {reason}")]
    TemplateResolution { reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,

    /// A scaffolded file would overwrite an existing one.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// The manifest file could not be read or parsed.
    #[error("Could not read manifest {path}: {reason}")]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// The manifest parsed but broke one or more rules.
    #[error("Manifest {path} has {} problem(s)", .errors.len())]
    ManifestInvalid {
        path: PathBuf,
        errors: Vec<DomainError>,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InputFailed { key, .. } => vec![
                format!("Provide a value for '{key}'"),
                "Run interactively, or pipe the answer on stdin".into(),
            ],
            Self::TrackingFailed { .. } => vec![
                "Check that the tracking file is writable".into(),
                "Set tracking.path in your config to another location".into(),
            ],
            Self::ListenerFailed { address, .. } => vec![
                format!("Is something else already listening on {address}?"),
                "Pick another port with --port".into(),
            ],
            Self::TemplateResolution { reason } => vec![
                format!("Resolution failed: {reason}"),
                "Try: forge list to see available templates".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different output directory with --to".into(),
            ],
            Self::ManifestUnreadable { path, .. } => vec![
                format!("Check that {} exists and is valid YAML", path.display()),
            ],
            Self::ManifestInvalid { errors, .. } => errors.iter().map(|e| e.to_string()).collect(),
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputFailed { .. } | Self::ManifestInvalid { .. } => ErrorCategory::Validation,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::TemplateResolution { .. } | Self::ManifestUnreadable { .. } => {
                ErrorCategory::NotFound
            }
            Self::ListenerFailed { .. } => ErrorCategory::Configuration,
            Self::TrackingFailed { .. }
            | Self::PrintFailed { .. }
            | Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_manifest_lists_every_problem() {
        let err = ApplicationError::ManifestInvalid {
            path: "ops.yml".into(),
            errors: vec![DomainError::NameInvalid, DomainError::NoPublic],
        };
        assert_eq!(err.to_string(), "Manifest ops.yml has 2 problem(s)");
        assert_eq!(err.suggestions().len(), 2);
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
