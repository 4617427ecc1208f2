//! Driven (output) ports - implemented by infrastructure.
//!
//! Two families live here. The platform ports (`Prompter`, `Tracker`,
//! `Printer`) are the three capabilities the command template gets from the
//! platform client. The forge ports (`Filesystem`, `TemplateStore`,
//! `TemplateRenderer`, `ManifestSource`) back `init`, `list` and `validate`.
//! The `forge-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{
    EventPayload, ProjectStructure, RawManifest, RenderContext, Template, TemplateId,
    TemplateKind,
};
use crate::error::ForgeResult;

// ── Platform ──────────────────────────────────────────────────────────────────

/// Options for a single question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOptions {
    pub allow_empty: bool,
}

impl InputOptions {
    pub const fn required() -> Self {
        Self { allow_empty: false }
    }
}

/// Port for asking the user one question.
///
/// Implemented by:
/// - `forge_adapters::platform::TerminalPrompter` (dialoguer or stdin)
/// - `forge_adapters::platform::ScriptedPrompter` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask `question`, answer stored under `key`.
    fn input(&self, key: &str, question: &str, options: InputOptions) -> ForgeResult<String>;
}

/// Port for recording a structured event.
///
/// Implemented by:
/// - `forge_adapters::platform::JsonLinesTracker` (append-only file)
/// - `forge_adapters::platform::MemoryTracker` (testing)
pub trait Tracker: Send + Sync {
    /// An empty `recipients` and `None` destination mean "default routing".
    fn track(
        &self,
        recipients: &[String],
        destination: Option<&str>,
        payload: &EventPayload,
    ) -> ForgeResult<()>;
}

/// Port for showing one line of output to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Printer: Send + Sync {
    fn print(&self, text: &str) -> ForgeResult<()>;
}

// ── Forge ─────────────────────────────────────────────────────────────────────

/// Port for filesystem operations.
///
/// Implemented by:
/// - `forge_adapters::filesystem::LocalFilesystem` (production)
/// - `forge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Mark a file executable (no-op where unsupported).
    fn set_permissions(&self, path: &Path, executable: bool) -> ForgeResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> ForgeResult<String>;

    fn remove_file(&self, path: &Path) -> ForgeResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;
}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `forge_adapters::template_store::InMemoryStore` (built-ins plus local overrides)
pub trait TemplateStore: Send + Sync {
    /// Get the template for a `(kind, target)` pair.
    fn get(&self, id: &TemplateId) -> ForgeResult<Template>;

    /// All templates, ordered by id.
    fn list(&self) -> ForgeResult<Vec<Template>>;

    /// Templates of one kind, ordered by target.
    fn find_by_kind(&self, kind: TemplateKind) -> ForgeResult<Vec<Template>>;

    /// Insert or replace a template.
    fn insert(&self, template: Template) -> ForgeResult<()>;
}

/// Port for template rendering.
pub trait TemplateRenderer: Send + Sync {
    /// Render every file of `template` into a structure rooted at `output_root`.
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure>;
}

/// Port for reading an `ops.yml` from somewhere.
pub trait ManifestSource: Send + Sync {
    fn load(&self, path: &Path) -> ForgeResult<RawManifest>;
}
