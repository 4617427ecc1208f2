//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "record a deployment" or "scaffold a project".

pub mod deployment_service;
pub mod manifest_service;
pub mod scaffold_service;
pub mod template_service;

pub use deployment_service::DeploymentService;
pub use manifest_service::{ManifestReport, ManifestService};
pub use scaffold_service::{InitRequest, Initialized, ScaffoldService};
pub use template_service::{TemplateInfo, TemplateService};
