//! Tracking events.
//!
//! [`DeploymentEvent`] is the strongly typed record the deploy command emits.
//! Sinks never see it directly: they receive an [`EventPayload`], the generic
//! string-keyed map the platform's tracking capability accepts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub const DEPLOYMENT_EVENT_NAME: &str = "deployment";
pub const DEPLOYMENT_EVENT_ACTION: &str = "succeeded";
pub const DEPLOYMENT_BRANCH: &str = "main";

/// Prompt key and question used to collect the repository name.
pub const REPO_PROMPT_KEY: &str = "repo";
pub const REPO_PROMPT_QUESTION: &str = "Which application do you want to deploy?";

// ── EventValue ────────────────────────────────────────────────────────────────

/// A single payload value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EventValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for EventValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for EventValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for EventValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

// ── EventPayload ──────────────────────────────────────────────────────────────

/// Ordered mapping from string keys to [`EventValue`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventPayload(BTreeMap<String, EventValue>);

impl EventPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<EventValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&EventValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ── DeploymentEvent ───────────────────────────────────────────────────────────

/// The record of one successful deployment.
///
/// Only `repo` varies; the other three fields are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentEvent {
    event_name: &'static str,
    event_action: &'static str,
    branch: &'static str,
    repo: String,
}

impl DeploymentEvent {
    /// Build the event for `repo`. Blank answers are rejected.
    pub fn new(repo: impl Into<String>) -> Result<Self, DomainError> {
        let repo = repo.into();
        if repo.trim().is_empty() {
            return Err(DomainError::EmptyInput {
                key: REPO_PROMPT_KEY.into(),
            });
        }
        Ok(Self {
            event_name: DEPLOYMENT_EVENT_NAME,
            event_action: DEPLOYMENT_EVENT_ACTION,
            branch: DEPLOYMENT_BRANCH,
            repo,
        })
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn event_name(&self) -> &'static str {
        self.event_name
    }

    pub fn event_action(&self) -> &'static str {
        self.event_action
    }

    pub fn branch(&self) -> &'static str {
        self.branch
    }

    /// Line shown to the user once the event has been recorded.
    pub fn confirmation(&self) -> String {
        format!(
            "\u{1f680} {}'s successful deployment has been recorded!",
            self.repo
        )
    }

    pub fn to_payload(&self) -> EventPayload {
        EventPayload::from(self)
    }
}

impl From<&DeploymentEvent> for EventPayload {
    fn from(event: &DeploymentEvent) -> Self {
        EventPayload::new()
            .with("event_name", event.event_name)
            .with("event_action", event.event_action)
            .with("branch", event.branch)
            .with("repo", event.repo.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_event_has_fixed_fields() {
        let event = DeploymentEvent::new("billing").unwrap();
        assert_eq!(event.event_name(), "deployment");
        assert_eq!(event.event_action(), "succeeded");
        assert_eq!(event.branch(), "main");
        assert_eq!(event.repo(), "billing");
    }

    #[test]
    fn blank_repo_is_rejected() {
        assert_eq!(
            DeploymentEvent::new("   "),
            Err(DomainError::EmptyInput { key: "repo".into() })
        );
    }

    #[test]
    fn payload_carries_all_four_keys() {
        let payload = DeploymentEvent::new("billing").unwrap().to_payload();
        assert_eq!(payload.len(), 4);
        assert_eq!(payload.get("repo"), Some(&EventValue::from("billing")));
        assert_eq!(payload.get("branch"), Some(&EventValue::from("main")));
    }

    #[test]
    fn payload_serializes_as_flat_object() {
        let payload = DeploymentEvent::new("billing").unwrap().to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "branch": "main",
                "event_action": "succeeded",
                "event_name": "deployment",
                "repo": "billing",
            })
        );
    }

    #[test]
    fn untagged_values_round_trip_through_json() {
        let payload = EventPayload::new()
            .with("ok", true)
            .with("count", 3.0)
            .with("who", "me");
        let json = serde_json::to_string(&payload).unwrap();
        let back: EventPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn confirmation_mentions_repo() {
        let event = DeploymentEvent::new("billing").unwrap();
        assert_eq!(
            event.confirmation(),
            "\u{1f680} billing's successful deployment has been recorded!"
        );
    }
}
