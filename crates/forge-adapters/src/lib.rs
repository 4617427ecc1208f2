//! Infrastructure adapters for Forge.
//!
//! This crate implements the ports defined in `forge_core::application::ports`.
//! Every external dependency and I/O operation lives here.

pub mod builtin_templates;
pub mod filesystem;
pub mod http;
pub mod manifest_loader;
pub mod platform;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::{HelloServer, hello_router, shutdown_signal};
pub use manifest_loader::{YamlManifestSource, resolve_manifest_path};
pub use platform::{
    JsonLinesTracker, LinePrompter, MemoryPrinter, MemoryTracker, ScriptedPrompter,
    TerminalPrompter,
};
pub use renderer::SimpleRenderer;
pub use template_store::InMemoryStore;
