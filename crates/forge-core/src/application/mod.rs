//! Application layer for Forge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (DeploymentService, ScaffoldService, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DeploymentService, InitRequest, Initialized, ManifestReport, ManifestService,
    ScaffoldService, TemplateInfo, TemplateService,
};

pub use ports::{
    Filesystem, InputOptions, ManifestSource, Printer, Prompter, TemplateRenderer, TemplateStore,
    Tracker,
};

pub use error::ApplicationError;
