use crate::domain::{
    entities::{ProjectStructure, Template},
    error::DomainError,
    manifest::Manifest,
};

/// Centralized domain validation.
///
/// Entities own their invariants; this is the single entry point services call.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    /// All manifest violations; `Ok` only when there are none.
    pub fn validate_manifest(manifest: &Manifest) -> Result<(), Vec<DomainError>> {
        let errors = manifest.validate();
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
