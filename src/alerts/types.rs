//! Alert domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rendered alert ready for delivery.
///
/// Notification sinks take a plain (title, body) pair; no further structure
/// is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    /// Short headline, e.g. "High CPU usage"
    pub title: String,
    /// Explanatory body text
    pub body: String,
}

impl AlertMessage {
    /// Create a new alert message
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

/// Outcome of feeding one reading into a threshold monitor
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Nothing to report this tick
    Quiet,
    /// Sustained over-threshold condition, alert the user
    Fire(AlertMessage),
}

impl Verdict {
    /// Whether this verdict carries an alert
    pub fn is_fire(&self) -> bool {
        matches!(self, Self::Fire(_))
    }
}
