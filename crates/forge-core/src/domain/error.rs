// ============================================================================
// domain/error.rs - business rule violations
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (collected into reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Input
    // ========================================================================
    #[error("An answer is required for '{key}'")]
    EmptyInput { key: String },

    // ========================================================================
    // Template resolution
    // ========================================================================
    #[error("Template kind '{kind}' not recognized")]
    KindNotRecognized { kind: String },

    #[error("Template '{from}' not found")]
    TemplateNotFound { from: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Manifest validation
    // ========================================================================
    #[error("Op name must be a non-empty string")]
    NameInvalid,

    #[error("Op description must be a non-empty string")]
    DescriptionInvalid,

    #[error("Each op must have a valid version string")]
    VersionInvalid,

    #[error(
        "Build manifest is missing the public field, add `public: false` to publish op as private"
    )]
    NoPublic,

    #[error("The run property must be included as a valid string for {item_type} {name}")]
    NoRun { name: String, item_type: String },

    #[error("Each pipeline requires at least one valid job")]
    PipelineJobsInvalid,

    #[error("Each pipeline job name should be a non-empty string")]
    PipelineJobNameInvalid,

    #[error("Each pipeline job description should be a non-empty string")]
    PipelineJobDescInvalid,

    #[error("Env variable ({entry}) is missing a key or value between its =")]
    EnvVarInvalid { entry: String },

    #[error(
        "The domain field ({domain}) doesn't match expected format, please provide just the domain without the scheme protocol"
    )]
    ServiceDomainInvalid { domain: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyInput { key } => vec![
                format!("'{}' cannot be left empty", key),
                "Run the command again and type an answer".into(),
            ],
            Self::KindNotRecognized { kind } => vec![
                format!("'{}' is not a template kind", kind),
                "Supported kinds: command, service".into(),
            ],
            Self::TemplateNotFound { from } => vec![
                format!("No template is close to '{}'", from),
                "Supported templates: node, golang, python, bash".into(),
                "List available templates: forge list".into(),
            ],
            Self::NoPublic => vec!["Add `public: false` to the op in ops.yml".into()],
            Self::EnvVarInvalid { .. } => {
                vec!["Env entries must look like KEY=VALUE with both sides non-empty".into()]
            }
            Self::ServiceDomainInvalid { .. } => {
                vec!["Use a bare host such as api.example.com (no https://)".into()]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::KindNotRecognized { .. } | Self::TemplateNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}
