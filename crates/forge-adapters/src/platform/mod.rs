//! Local stand-ins for the platform client's prompt and track capabilities.

pub mod memory;
mod prompt;
mod tracker;

pub use memory::{MemoryPrinter, MemoryTracker, ScriptedPrompter, TrackCall};
pub use prompt::{LinePrompter, TerminalPrompter};
pub use tracker::{JsonLinesTracker, TrackedEvent};
