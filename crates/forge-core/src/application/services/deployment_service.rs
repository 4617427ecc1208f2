//! Deployment Service - the command template's single use case.
//!
//! Ask which repo was deployed, record one `deployment/succeeded` event for
//! it, then confirm to the user. Any failing step aborts the rest.

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{InputOptions, Printer, Prompter, Tracker},
    domain::{
        DeploymentEvent,
        event::{REPO_PROMPT_KEY, REPO_PROMPT_QUESTION},
    },
    error::ForgeResult,
};

pub struct DeploymentService {
    prompter: Box<dyn Prompter>,
    tracker: Box<dyn Tracker>,
    printer: Box<dyn Printer>,
}

impl DeploymentService {
    pub fn new(
        prompter: Box<dyn Prompter>,
        tracker: Box<dyn Tracker>,
        printer: Box<dyn Printer>,
    ) -> Self {
        Self {
            prompter,
            tracker,
            printer,
        }
    }

    /// Prompt, track, print. Returns the event that was recorded.
    #[instrument(skip_all)]
    pub fn record_deployment(&self) -> ForgeResult<DeploymentEvent> {
        let answer =
            self.prompter
                .input(REPO_PROMPT_KEY, REPO_PROMPT_QUESTION, InputOptions::required())?;
        let event = DeploymentEvent::new(answer)?;
        debug!(repo = %event.repo(), "Answer received");

        self.tracker.track(&[], None, &event.to_payload())?;
        info!(repo = %event.repo(), "Deployment event recorded");

        self.printer.print(&event.confirmation())?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        application::{
            ApplicationError,
            ports::{MockPrinter, MockPrompter},
        },
        domain::{DomainError, EventPayload},
        error::ForgeError,
    };

    type Recorded = Arc<Mutex<Vec<(Vec<String>, Option<String>, EventPayload)>>>;

    struct RecordingTracker {
        events: Recorded,
        fail: bool,
    }

    impl Tracker for RecordingTracker {
        fn track(
            &self,
            recipients: &[String],
            destination: Option<&str>,
            payload: &EventPayload,
        ) -> ForgeResult<()> {
            if self.fail {
                return Err(ApplicationError::TrackingFailed {
                    reason: "sink closed".into(),
                }
                .into());
            }
            self.events.lock().unwrap().push((
                recipients.to_vec(),
                destination.map(str::to_string),
                payload.clone(),
            ));
            Ok(())
        }
    }

    fn tracker(fail: bool) -> (Box<RecordingTracker>, Recorded) {
        let events = Recorded::default();
        let tracker = Box::new(RecordingTracker {
            events: Arc::clone(&events),
            fail,
        });
        (tracker, events)
    }

    fn answering(answer: &'static str) -> MockPrompter {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_input()
            .withf(|key, question, options| {
                key == "repo"
                    && question == "Which application do you want to deploy?"
                    && !options.allow_empty
            })
            .times(1)
            .returning(move |_, _, _| Ok(answer.to_string()));
        prompter
    }

    #[test]
    fn records_one_event_then_confirms() {
        let (tracker, events) = tracker(false);
        let mut printer = MockPrinter::new();
        printer
            .expect_print()
            .withf(|text| text == "\u{1f680} my-app's successful deployment has been recorded!")
            .times(1)
            .returning(|_| Ok(()));

        let service = DeploymentService::new(Box::new(answering("my-app")), tracker, Box::new(printer));
        let event = service.record_deployment().unwrap();
        assert_eq!(event.repo(), "my-app");

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let (recipients, destination, payload) = &events[0];
        assert!(recipients.is_empty());
        assert_eq!(*destination, None);
        assert_eq!(payload, &event.to_payload());
    }

    #[test]
    fn prompt_failure_tracks_nothing() {
        let (tracker, events) = tracker(false);
        let mut prompter = MockPrompter::new();
        prompter.expect_input().returning(|key, _, _| {
            Err(ApplicationError::InputFailed {
                key: key.to_string(),
                reason: "closed".into(),
            }
            .into())
        });
        let mut printer = MockPrinter::new();
        printer.expect_print().never();

        let service = DeploymentService::new(Box::new(prompter), tracker, Box::new(printer));
        assert!(matches!(
            service.record_deployment(),
            Err(ForgeError::Application(ApplicationError::InputFailed { .. }))
        ));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_answer_is_rejected() {
        let (tracker, events) = tracker(false);
        let mut printer = MockPrinter::new();
        printer.expect_print().never();

        let service = DeploymentService::new(Box::new(answering("   ")), tracker, Box::new(printer));
        assert!(matches!(
            service.record_deployment(),
            Err(ForgeError::Domain(DomainError::EmptyInput { .. }))
        ));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn tracking_failure_skips_confirmation() {
        let (tracker, _) = tracker(true);
        let mut printer = MockPrinter::new();
        printer.expect_print().never();

        let service = DeploymentService::new(Box::new(answering("api")), tracker, Box::new(printer));
        assert!(matches!(
            service.record_deployment(),
            Err(ForgeError::Application(ApplicationError::TrackingFailed { .. }))
        ));
    }

    #[test]
    fn print_failure_is_reported() {
        let (tracker, events) = tracker(false);
        let mut printer = MockPrinter::new();
        printer.expect_print().returning(|_| {
            Err(ApplicationError::PrintFailed {
                reason: "broken pipe".into(),
            }
            .into())
        });

        let service = DeploymentService::new(Box::new(answering("api")), tracker, Box::new(printer));
        assert!(service.record_deployment().is_err());
        assert_eq!(events.lock().unwrap().len(), 1);
    }
}
