//! `forge deploy`: ask which application was deployed, record it, confirm.

use tracing::{info, instrument};

use forge_adapters::{JsonLinesTracker, TerminalPrompter};
use forge_core::application::{
    DeploymentService,
    ports::{Printer, Prompter, Tracker},
};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let tracker = JsonLinesTracker::new(config.tracking_path());
    info!(events = %tracker.path().display(), "Tracking to local event log");
    record(
        Box::new(TerminalPrompter::new()),
        Box::new(tracker),
        Box::new(output),
    )
}

fn record(
    prompter: Box<dyn Prompter>,
    tracker: Box<dyn Tracker>,
    printer: Box<dyn Printer>,
) -> CliResult<()> {
    let event = DeploymentService::new(prompter, tracker, printer).record_deployment()?;
    info!(repo = event.repo(), "Deployment recorded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_adapters::{MemoryPrinter, ScriptedPrompter};
    use tempfile::TempDir;

    #[test]
    fn records_to_the_event_log() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("events.jsonl");
        let printer = MemoryPrinter::new();

        record(
            Box::new(ScriptedPrompter::new(["my-app"])),
            Box::new(JsonLinesTracker::new(&log)),
            Box::new(printer.clone()),
        )
        .unwrap();

        let events = JsonLinesTracker::new(&log).read_all().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload.get("repo").unwrap().to_string(), "my-app");
        assert_eq!(printer.lines().len(), 1);
        assert!(printer.lines()[0].contains("my-app"));
    }

    #[test]
    fn missing_answer_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("events.jsonl");

        let err = record(
            Box::new(ScriptedPrompter::new([""])),
            Box::new(JsonLinesTracker::new(&log)),
            Box::new(MemoryPrinter::new()),
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(!log.exists());
    }
}
