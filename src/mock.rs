//! Mock implementations for testing
//!
//! Provides scripted metric sources and a recording notifier for unit
//! testing the control loop without touching the host.

use crate::alerts::{AlertMessage, Notifier};
use crate::domain::{Reading, TrackedResource};
use crate::error::Result;
use crate::metrics::MetricSource;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A source that replays a fixed sequence of readings.
///
/// Once the script runs out, every further sample is unavailable.
pub struct ScriptedSource {
    resource: TrackedResource,
    readings: VecDeque<Reading>,
}

impl ScriptedSource {
    /// Create a scripted source
    pub fn new(resource: TrackedResource, readings: Vec<Reading>) -> Self {
        Self {
            resource,
            readings: readings.into(),
        }
    }
}

impl MetricSource for ScriptedSource {
    fn resource(&self) -> TrackedResource {
        self.resource
    }

    fn sample(&mut self) -> Reading {
        self.readings.pop_front().unwrap_or_else(Reading::unavailable)
    }
}

/// A permanently failing source
pub struct DeadSource {
    resource: TrackedResource,
}

impl DeadSource {
    /// Create a dead source
    pub fn new(resource: TrackedResource) -> Self {
        Self { resource }
    }
}

impl MetricSource for DeadSource {
    fn resource(&self) -> TrackedResource {
        self.resource
    }

    fn sample(&mut self) -> Reading {
        Reading::unavailable()
    }
}

/// A notifier that captures every delivered alert
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<AlertMessage>>>,
}

impl RecordingNotifier {
    /// Create a recording notifier
    pub fn new() -> Self {
        Self {
            alerts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the captured alerts
    pub fn alerts(&self) -> Arc<Mutex<Vec<AlertMessage>>> {
        Arc::clone(&self.alerts)
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, alert: &AlertMessage) -> Result<()> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
