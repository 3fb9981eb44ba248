//! Alert notification channels
//!
//! Delivery is best-effort: a failed channel is logged and the loop moves on.

use super::types::AlertMessage;
use crate::error::Result;
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Notification channel trait
pub trait Notifier: Send {
    /// Deliver an alert to the user
    fn notify(&self, alert: &AlertMessage) -> Result<()>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Terminal/console notifier
///
/// Writes alerts to stderr with ANSI coloring when the terminal supports it.
pub struct TerminalNotifier {
    use_colors: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier without colors
    pub fn no_color() -> Self {
        Self { use_colors: false }
    }

    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
    }

    fn format_alert(&self, alert: &AlertMessage) -> String {
        if self.use_colors {
            format!("\x1b[33m\x1b[1mALERT\x1b[0m {}: {}", alert.title, alert.body)
        } else {
            format!("ALERT {}: {}", alert.title, alert.body)
        }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, alert: &AlertMessage) -> Result<()> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle, "{}", self.format_alert(alert))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// Desktop notification via the platform's notification command.
///
/// The helper process is spawned and never waited on, so a slow notification
/// daemon cannot stall the sampling loop.
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Create a new desktop notifier
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "macos")]
    fn command(alert: &AlertMessage) -> Command {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            alert.body.replace('"', "\\\""),
            alert.title.replace('"', "\\\"")
        );
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(script);
        cmd
    }

    #[cfg(not(target_os = "macos"))]
    fn command(alert: &AlertMessage) -> Command {
        let mut cmd = Command::new("notify-send");
        cmd.arg(&alert.title).arg(&alert.body);
        cmd
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, alert: &AlertMessage) -> Result<()> {
        Self::command(alert)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "desktop"
    }
}

/// Notification manager
///
/// Fans an alert out to every registered channel.
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotificationManager {
    /// Create an empty notification manager
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    /// Add a notifier
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Send an alert to all channels, logging channel failures
    pub fn notify_all(&self, alert: &AlertMessage) {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(alert) {
                log::warn!("Failed to notify via {}: {}", notifier.name(), e);
            }
        }
    }

    /// Get number of registered notifiers
    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        let mut manager = Self::new();
        manager.add_notifier(Box::new(DesktopNotifier::new()));
        manager.add_notifier(Box::new(TerminalNotifier::new()));
        manager
    }
}
