//! The sampling control loop
//!
//! A single sequential loop: once per tick every selected resource is
//! sampled, its monitor updated, and any resulting alert dispatched before
//! the loop sleeps until the next tick. Monitors own their state exclusively,
//! so no synchronization is needed between resources.

use crate::alerts::{NotificationManager, ThresholdMonitor, Verdict};
use crate::domain::{Reading, TrackedResource};
use crate::metrics::MetricSource;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One tracked resource: its probe and its monitor state
struct MonitorEntry {
    source: Box<dyn MetricSource>,
    monitor: ThresholdMonitor,
}

/// Drives all monitors at a fixed cadence until shutdown is requested.
pub struct Scheduler {
    interval: Duration,
    entries: Vec<MonitorEntry>,
    notifications: NotificationManager,
    shutdown: Arc<AtomicBool>,
}

impl Scheduler {
    /// Granularity of the inter-tick sleep; bounds shutdown latency.
    const SLEEP_SLICE: Duration = Duration::from_millis(250);

    /// Create a scheduler with no tracked resources
    pub fn new(
        interval: Duration,
        notifications: NotificationManager,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            interval,
            entries: Vec::new(),
            notifications,
            shutdown,
        }
    }

    /// Register a resource. Resources are processed in registration order,
    /// so registering in canonical order keeps ticks deterministic.
    pub fn track(&mut self, source: Box<dyn MetricSource>, monitor: ThresholdMonitor) {
        self.entries.push(MonitorEntry { source, monitor });
    }

    /// Execute one sampling tick across all resources.
    ///
    /// Returns the readings taken, in processing order. A source that fails
    /// reports unavailable values and never prevents the remaining resources
    /// from being processed.
    pub fn tick(&mut self) -> Vec<(TrackedResource, Reading)> {
        let mut readings = Vec::with_capacity(self.entries.len());

        for entry in &mut self.entries {
            let resource = entry.source.resource();
            let reading = entry.source.sample();
            log::debug!(
                "{}: {}{}",
                resource,
                reading.primary,
                reading
                    .secondary
                    .map(|s| format!(" (secondary {s})"))
                    .unwrap_or_default()
            );

            if let Verdict::Fire(alert) = entry.monitor.observe(reading) {
                self.notifications.notify_all(&alert);
            }

            readings.push((resource, reading));
        }

        readings
    }

    /// Run the loop until the shutdown flag is set.
    pub fn run(&mut self) {
        log::info!(
            "Watchdog running on PID {} ({} resources, every {:?})",
            std::process::id(),
            self.entries.len(),
            self.interval
        );

        while !self.shutdown_requested() {
            self.tick();
            if !self.sleep_between_ticks() {
                break;
            }
        }

        log::info!("Shutdown requested, leaving the sampling loop");
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Sleep for the configured interval in slices, watching the shutdown
    /// flag. Returns false when shutdown was requested mid-sleep.
    fn sleep_between_ticks(&self) -> bool {
        let mut remaining = self.interval;
        while remaining > Duration::ZERO {
            if self.shutdown_requested() {
                return false;
            }
            let step = remaining.min(Self::SLEEP_SLICE);
            std::thread::sleep(step);
            remaining -= step;
        }
        true
    }
}
