//! Template entity and rendering context.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Template (Entity)                            │
//! │  ├── TemplateId  (kind × target)             │
//! │  ├── description                             │
//! │  └── files: Vec<FileSpec>                    │
//! │        ├── RelativePath                      │
//! │        ├── TemplateSource (Static | Owned)   │
//! │        └── Permissions                       │
//! ├──────────────────────────────────────────────┤
//! │ RenderContext (Value Object)                 │
//! │  └── {{pkg}} {{name}} {{version}} ...        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Built-in templates reference compile-time strings (`TemplateSource::Static`);
//! templates loaded from a local directory own their content.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
    value_objects::{TemplateKind, TemplateTarget},
};

/// Every template must ship a manifest with this name.
pub const MANIFEST_FILE: &str = "ops.yml";

/// Version used when the caller does not give one.
pub const DEFAULT_VERSION: &str = "0.1.0";

// ── TemplateId ────────────────────────────────────────────────────────────────

/// A template is identified by what it builds and what it builds it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId {
    pub kind: TemplateKind,
    pub target: TemplateTarget,
}

impl TemplateId {
    pub const fn new(kind: TemplateKind, target: TemplateTarget) -> Self {
        Self { kind, target }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.target)
    }
}

// ── Content ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: RelativePath,
    pub content: TemplateSource,
    pub permissions: Permissions,
}

impl FileSpec {
    pub fn new(path: RelativePath, content: TemplateSource) -> Self {
        Self {
            path,
            content,
            permissions: Permissions::default(),
        }
    }

    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }
}

// ── Template ──────────────────────────────────────────────────────────────────

/// Where a template came from; local templates shadow built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub description: String,
    pub origin: TemplateOrigin,
    pub files: Vec<FileSpec>,
}

impl Template {
    pub fn new(id: TemplateId, description: impl Into<String>, origin: TemplateOrigin) -> Self {
        Self {
            id,
            description: description.into(),
            origin,
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: FileSpec) -> Self {
        self.files.push(file);
        self
    }

    /// A template needs content, unique paths, and an `ops.yml`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "template '{}' has no files",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }

        if !self
            .files
            .iter()
            .any(|f| f.path.as_path() == std::path::Path::new(MANIFEST_FILE))
        {
            return Err(DomainError::InvalidTemplate(format!(
                "template '{}' is missing {MANIFEST_FILE}",
                self.id
            )));
        }

        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

// ── RenderContext ─────────────────────────────────────────────────────────────

/// Variables substituted into template content.
///
/// | Variable          | Example       |
/// |-------------------|---------------|
/// | `{{pkg}}`         | `test`        |
/// | `{{name}}`        | `test:1.2.3`  |
/// | `{{version}}`     | `1.2.3`       |
/// | `{{description}}` | `test desc`   |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(
        name: impl Into<String>,
        version: Option<&str>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let version = version.unwrap_or(DEFAULT_VERSION);
        let mut variables = BTreeMap::new();
        variables.insert("pkg".to_string(), name.clone());
        variables.insert("name".to_string(), format!("{name}:{version}"));
        variables.insert("version".to_string(), version.to_string());
        variables.insert("description".to_string(), description.into());
        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{key}}` with its value. Unknown placeholders stay as-is.
    pub fn render(&self, template: &str) -> String {
        self.render_with(template, str::to_string)
    }

    /// [`Self::render`], passing each value through `escape` first.
    pub fn render_with(&self, template: &str, escape: impl Fn(&str) -> String) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            if result.contains(&placeholder) {
                result = result.replace(&placeholder, &escape(value));
            }
        }
        result
    }
}
