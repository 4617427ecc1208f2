//! In-memory doubles for the platform ports, shared by tests across crates.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use forge_core::{
    application::{
        ApplicationError,
        ports::{InputOptions, Printer, Prompter, Tracker},
    },
    domain::EventPayload,
    error::ForgeResult,
};

/// Replays canned answers in order and remembers the questions asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<String>>>,
    asked: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().map(Into::into).collect())),
            asked: Arc::default(),
        }
    }

    /// `(key, question)` pairs in the order they were asked.
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, key: &str, question: &str, options: InputOptions) -> ForgeResult<String> {
        let failed = |reason: &str| ApplicationError::InputFailed {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if let Ok(mut asked) = self.asked.lock() {
            asked.push((key.to_string(), question.to_string()));
        }
        let answer = self
            .answers
            .lock()
            .map_err(|_| failed("answers lock poisoned"))?
            .pop_front()
            .ok_or_else(|| failed("no scripted answer left"))?;

        if !options.allow_empty && answer.trim().is_empty() {
            return Err(failed("an answer is required").into());
        }
        Ok(answer)
    }
}

/// A tracked call, as the tracker saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCall {
    pub recipients: Vec<String>,
    pub destination: Option<String>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTracker {
    calls: Arc<Mutex<Vec<TrackCall>>>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<TrackCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Tracker for MemoryTracker {
    fn track(
        &self,
        recipients: &[String],
        destination: Option<&str>,
        payload: &EventPayload,
    ) -> ForgeResult<()> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(TrackCall {
                recipients: recipients.to_vec(),
                destination: destination.map(str::to_owned),
                payload: payload.clone(),
            });
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPrinter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl Printer for MemoryPrinter {
    fn print(&self, text: &str) -> ForgeResult<()> {
        self.lines
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use forge_core::application::DeploymentService;

    use super::*;

    #[test]
    fn deployment_flows_through_doubles() {
        let prompter = ScriptedPrompter::new(["checkout"]);
        let tracker = MemoryTracker::new();
        let printer = MemoryPrinter::new();
        let service = DeploymentService::new(
            Box::new(prompter.clone()),
            Box::new(tracker.clone()),
            Box::new(printer.clone()),
        );

        let event = service.record_deployment().unwrap();

        assert_eq!(event.repo(), "checkout");
        assert_eq!(prompter.asked()[0].0, "repo");
        let calls = tracker.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].recipients.is_empty());
        assert_eq!(calls[0].destination, None);
        assert_eq!(calls[0].payload.get("repo").unwrap().to_string(), "checkout");
        assert_eq!(
            printer.lines(),
            ["\u{1f680} checkout's successful deployment has been recorded!"]
        );
    }

    #[test]
    fn blank_answer_tracks_nothing() {
        let tracker = MemoryTracker::new();
        let printer = MemoryPrinter::new();
        let service = DeploymentService::new(
            Box::new(ScriptedPrompter::new(["   "])),
            Box::new(tracker.clone()),
            Box::new(printer.clone()),
        );

        assert!(service.record_deployment().is_err());
        assert!(tracker.calls().is_empty());
        assert!(printer.lines().is_empty());
    }

    #[test]
    fn running_out_of_answers_fails() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(prompter.input("repo", "?", InputOptions::required()).is_err());
    }
}
