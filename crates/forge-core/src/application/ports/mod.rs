//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `forge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Prompter`, `Tracker`, `Printer`: the platform client's capabilities
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template storage/retrieval
//!   - `TemplateRenderer`: Template rendering
//!   - `ManifestSource`: `ops.yml` loading
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{
    Filesystem, InputOptions, ManifestSource, Printer, Prompter, TemplateRenderer, TemplateStore,
    Tracker,
};

#[cfg(test)]
pub use output::{MockPrinter, MockPrompter};
