//! Simple variable substitution renderer.
//!
//! In `.yml`, `.yaml` and `.json` files values are escaped for a
//! double-quoted string, so placeholders there belong inside `"..."`.

use std::path::Path;

use forge_core::{
    application::ports::TemplateRenderer,
    domain::{DomainValidator as validator, ProjectStructure, RenderContext, Template},
    error::ForgeResult,
};
use tracing::{debug, instrument};

/// Renders every file through `{{variable}}` substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure> {
        validator::validate_template(template)?;

        let mut structure = ProjectStructure::new(output_root);
        for spec in &template.files {
            let content = if is_quoted_format(spec.path.as_path()) {
                context.render_with(spec.content.as_str(), escape_quoted)
            } else {
                context.render(spec.content.as_str())
            };
            structure.add_file(spec.path.as_path(), content, spec.permissions);
        }

        validator::validate_project_structure(&structure)?;
        debug!(files = structure.file_count(), "Template rendered");
        Ok(structure)
    }
}

fn is_quoted_format(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e, "yml" | "yaml" | "json"))
}

/// The inside of a JSON string literal. YAML double-quoted scalars take the
/// same escapes.
fn escape_quoted(value: &str) -> String {
    let literal = serde_json::Value::from(value).to_string();
    literal
        .strip_prefix('"')
        .and_then(|l| l.strip_suffix('"'))
        .unwrap_or(&literal)
        .to_string()
}
