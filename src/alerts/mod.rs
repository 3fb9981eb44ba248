//! Alert and notification system
//!
//! Decides when a stream of noisy samples becomes a user-facing alert and
//! delivers that alert through one or more notification channels.

mod notifier;
mod threshold;
mod types;

pub use notifier::{DesktopNotifier, NotificationManager, Notifier, TerminalNotifier};
pub use threshold::{ThresholdMonitor, ThresholdPolicy};
pub use types::{AlertMessage, Verdict};
