//! Forge core: domain model, use cases and the ports adapters plug into.
//!
//! This crate provides the domain and application layers for Forge: the
//! command template (prompt, track, print), the service template's fixed
//! answers, and the template forge (`init`, `list`, `validate`).
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            forge-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Deployment, Scaffold, Template,       │
//! │   Manifest)                             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Prompter, Tracker, Printer, Store,    │
//! │   Filesystem, Renderer, Manifest)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     forge-adapters (Infrastructure)     │
//! │ (TerminalPrompter, JsonLinesTracker,    │
//! │  LocalFilesystem, InMemoryStore, HTTP)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (DeploymentEvent, Template, Manifest)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forge_core::application::DeploymentService;
//!
//! let service = DeploymentService::new(prompter, tracker, printer);
//! let event = service.record_deployment()?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        DeploymentService, InitRequest, ManifestService, ScaffoldService, TemplateService,
        ports::{
            Filesystem, InputOptions, ManifestSource, Printer, Prompter, TemplateRenderer,
            TemplateStore, Tracker,
        },
    };
    pub use crate::domain::{
        DeploymentEvent, EventPayload, EventValue, Manifest, ProjectStructure, RenderContext,
        ServiceEndpoint, Template, TemplateId, TemplateKind, TemplateTarget,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}
