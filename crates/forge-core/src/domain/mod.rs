//! Core domain layer for Forge.
//!
//! Pure business rules: what a deployment event looks like, what the hello
//! service answers, which templates exist and how an `ops.yml` is judged.
//! All I/O (prompting, tracking, sockets, files) sits behind ports defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or terminal access
//! - **Small dependency surface**: std, thiserror, serde, tracing
//!
pub mod entities;
pub mod error;
pub mod event;
pub mod hello;
pub mod manifest;
pub mod matching;
pub mod value_objects;

mod validation;

pub use entities::{
    common::{Permissions, RelativePath},
    project_structure::{FileToWrite, ProjectStructure},
    template::{
        DEFAULT_VERSION, FileSpec, MANIFEST_FILE, RenderContext, Template, TemplateId,
        TemplateOrigin, TemplateSource,
    },
};

pub use error::DomainError;

pub use event::{DeploymentEvent, EventPayload, EventValue};

pub use hello::ServiceEndpoint;

pub use manifest::{ItemType, Manifest, ManifestItem, ManifestWarning, RawManifest};

pub use matching::resolve_target;

pub use value_objects::{TemplateKind, TemplateTarget};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn kind_and_fuzzy_target_make_an_id() {
        let kind = TemplateKind::from_str("service").unwrap();
        let target = resolve_target("nodejs").unwrap();
        assert_eq!(TemplateId::new(kind, target).to_string(), "service/node");
    }

    #[test]
    fn deployment_event_carries_fixed_fields() {
        let event = DeploymentEvent::new("api").unwrap();
        let payload = EventPayload::from(&event);
        assert_eq!(payload.get("repo"), Some(&EventValue::from("api")));
        assert_eq!(payload.get("event_name"), Some(&EventValue::from("deployment")));
        assert_eq!(payload.get("event_action"), Some(&EventValue::from("succeeded")));
        assert_eq!(payload.get("branch"), Some(&EventValue::from("main")));
    }

    #[test]
    fn rendered_structure_passes_validation() {
        let ctx = RenderContext::new("svc", None, "desc");
        let structure = ProjectStructure::new("/out").with_file(
            MANIFEST_FILE,
            ctx.render("name: {{name}}"),
            Permissions::default(),
        );
        assert!(DomainValidator::validate_project_structure(&structure).is_ok());
        assert_eq!(structure.files().next().unwrap().content, "name: svc:0.1.0");
    }
}
