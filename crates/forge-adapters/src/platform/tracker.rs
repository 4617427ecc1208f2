use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use forge_core::{
    application::{ApplicationError, ports::Tracker},
    domain::EventPayload,
    error::{ForgeError, ForgeResult},
};

/// One line of the tracking log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub payload: EventPayload,
}

impl TrackedEvent {
    pub fn new(recipients: &[String], destination: Option<&str>, payload: &EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            recipients: recipients.to_vec(),
            destination: destination.map(str::to_owned),
            payload: payload.clone(),
        }
    }
}

/// Appends every tracked event as a JSON line.
#[derive(Debug)]
pub struct JsonLinesTracker {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back everything recorded so far. A missing log is empty.
    pub fn read_all(&self) -> ForgeResult<Vec<TrackedEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(tracking_failed)?;
        raw.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(tracking_failed))
            .collect()
    }
}

impl Tracker for JsonLinesTracker {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn track(
        &self,
        recipients: &[String],
        destination: Option<&str>,
        payload: &EventPayload,
    ) -> ForgeResult<()> {
        let event = TrackedEvent::new(recipients, destination, payload);
        let mut line = serde_json::to_string(&event).map_err(tracking_failed)?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| tracking_failed("tracker lock poisoned"))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(tracking_failed)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(tracking_failed)?;

        debug!(id = %event.id, "Event recorded");
        Ok(())
    }
}

fn tracking_failed(reason: impl ToString) -> ForgeError {
    ApplicationError::TrackingFailed {
        reason: reason.to_string(),
    }
    .into()
}
