//! Per-resource threshold monitor
//!
//! The monitor is a small state machine fed one reading per tick. It fires at
//! most once per episode of sustained over-threshold samples and raises its
//! own firing bar after each alert so a persistent condition cannot turn into
//! an alert storm. A long quiet stretch restores the original sensitivity.

use super::types::{AlertMessage, Verdict};
use crate::domain::{Reading, TrackedResource};
use serde::{Deserialize, Serialize};

/// Tuning knobs for one resource's monitor.
///
/// All fields are plain data so a policy can come from the built-in defaults
/// or from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    /// Trigger level for the primary metric
    pub primary_threshold: f64,
    /// Trigger level for the auxiliary metric, if the resource has one
    pub secondary_threshold: Option<f64>,
    /// Consecutive over-threshold ticks required before the first fire
    pub baseline_fire_count: u32,
    /// Added to the required tick count after each fire
    pub backoff_step: u32,
    /// Consecutive quiet ticks after which the firing bar resets to baseline
    pub quiet_reset_window: u32,
}

impl ThresholdPolicy {
    /// Default number of quiet ticks before sensitivity recovers
    pub const DEFAULT_QUIET_RESET_WINDOW: u32 = 15;

    /// Built-in policy for a resource.
    ///
    /// CPU keeps a fixed bar (step 0); RAM and disk back off by 2 after each
    /// fire. The quiet window applies uniformly, which is a no-op for
    /// resources whose bar never grows.
    pub fn for_resource(resource: TrackedResource) -> Self {
        match resource {
            TrackedResource::Cpu => Self {
                primary_threshold: 0.8,
                secondary_threshold: None,
                baseline_fire_count: 4,
                backoff_step: 0,
                quiet_reset_window: Self::DEFAULT_QUIET_RESET_WINDOW,
            },
            TrackedResource::Ram => Self {
                primary_threshold: 0.8,
                secondary_threshold: Some(0.6),
                baseline_fire_count: 3,
                backoff_step: 2,
                quiet_reset_window: Self::DEFAULT_QUIET_RESET_WINDOW,
            },
            TrackedResource::Disc => Self {
                primary_threshold: 0.9,
                secondary_threshold: None,
                baseline_fire_count: 1,
                backoff_step: 2,
                quiet_reset_window: Self::DEFAULT_QUIET_RESET_WINDOW,
            },
        }
    }
}

/// Threshold state machine for one tracked resource.
///
/// Owns all of its mutable state; instances are created once at startup and
/// live for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ThresholdMonitor {
    resource: TrackedResource,
    policy: ThresholdPolicy,
    /// Consecutive ticks where every required metric exceeded its threshold
    consecutive_over: u32,
    /// Current firing bar; grows by `backoff_step` after each fire
    fire_count_threshold: u32,
    /// Consecutive quiet ticks since the last over-threshold tick
    quiet_ticks: u32,
}

impl ThresholdMonitor {
    /// Create a monitor with the built-in policy for the resource
    pub fn new(resource: TrackedResource) -> Self {
        Self::with_policy(resource, ThresholdPolicy::for_resource(resource))
    }

    /// Create a monitor with an explicit policy
    pub fn with_policy(resource: TrackedResource, policy: ThresholdPolicy) -> Self {
        Self {
            resource,
            policy,
            consecutive_over: 0,
            fire_count_threshold: policy.baseline_fire_count,
            quiet_ticks: 0,
        }
    }

    /// Current number of consecutive over-threshold ticks required to fire
    pub fn fire_count_threshold(&self) -> u32 {
        self.fire_count_threshold
    }

    /// Feed one tick's reading into the state machine.
    ///
    /// An unavailable required metric counts as a quiet tick; a composite
    /// resource is over-threshold only when every component exceeds its own
    /// threshold.
    pub fn observe(&mut self, reading: Reading) -> Verdict {
        if !self.is_over(reading) {
            self.consecutive_over = 0;
            self.quiet_ticks += 1;
            if self.quiet_ticks > self.policy.quiet_reset_window {
                if self.fire_count_threshold != self.policy.baseline_fire_count {
                    log::debug!(
                        "{}: quiet for {} ticks, firing bar back to {}",
                        self.resource,
                        self.quiet_ticks,
                        self.policy.baseline_fire_count
                    );
                }
                self.fire_count_threshold = self.policy.baseline_fire_count;
                self.quiet_ticks = 0;
            }
            return Verdict::Quiet;
        }

        self.quiet_ticks = 0;
        self.consecutive_over += 1;
        if self.consecutive_over > self.fire_count_threshold {
            self.consecutive_over = 0;
            self.fire_count_threshold += self.policy.backoff_step;
            log::info!(
                "{}: sustained over-threshold condition, alerting (next bar: {})",
                self.resource,
                self.fire_count_threshold
            );
            return Verdict::Fire(self.message());
        }

        Verdict::Quiet
    }

    fn is_over(&self, reading: Reading) -> bool {
        if !reading.primary.exceeds(self.policy.primary_threshold) {
            return false;
        }
        match self.policy.secondary_threshold {
            Some(threshold) => reading
                .secondary
                .is_some_and(|sample| sample.exceeds(threshold)),
            None => true,
        }
    }

    fn message(&self) -> AlertMessage {
        let pct = self.policy.primary_threshold * 100.0;
        match self.resource {
            TrackedResource::Cpu => AlertMessage::new(
                "High CPU usage",
                format!("CPU usage above {pct:.0}% for a sustained period"),
            ),
            TrackedResource::Ram => {
                let swap_pct = self.policy.secondary_threshold.unwrap_or(0.0) * 100.0;
                AlertMessage::new(
                    "High RAM usage",
                    format!("Memory usage above {pct:.0}%, swap pressure above {swap_pct:.0}%"),
                )
            }
            TrackedResource::Disc => AlertMessage::new(
                "Disk almost full",
                format!("Disk usage above {pct:.0}%"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetricSample;

    fn over() -> Reading {
        Reading::single(MetricSample::Available(0.95))
    }

    fn under() -> Reading {
        Reading::single(MetricSample::Available(0.5))
    }

    fn ram(usage: f64, swap: f64) -> Reading {
        Reading::composite(MetricSample::Available(usage), MetricSample::Available(swap))
    }

    #[test]
    fn test_fires_exactly_on_baseline_plus_one() {
        // baseline 4: fires on the 5th consecutive over-threshold sample
        let mut monitor = ThresholdMonitor::new(TrackedResource::Cpu);
        for _ in 0..4 {
            assert_eq!(monitor.observe(over()), Verdict::Quiet);
        }
        assert!(monitor.observe(over()).is_fire());
    }

    #[test]
    fn test_never_fires_on_exactly_baseline_samples() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Cpu);
        for _ in 0..4 {
            assert_eq!(monitor.observe(over()), Verdict::Quiet);
        }
        // run broken before the firing sample
        assert_eq!(monitor.observe(under()), Verdict::Quiet);
        assert_eq!(monitor.observe(over()), Verdict::Quiet);
    }

    #[test]
    fn test_cpu_scenario_from_baseline_table() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Cpu);
        let samples = [0.9, 0.9, 0.9, 0.9, 0.9];
        let mut fired_at = None;
        for (i, v) in samples.iter().enumerate() {
            if monitor
                .observe(Reading::single(MetricSample::Available(*v)))
                .is_fire()
            {
                fired_at = Some(i);
            }
        }
        assert_eq!(fired_at, Some(4));
    }

    #[test]
    fn test_cpu_has_no_backoff() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Cpu);
        for _ in 0..4 {
            monitor.observe(over());
        }
        assert!(monitor.observe(over()).is_fire());
        assert_eq!(monitor.fire_count_threshold(), 4);
    }

    #[test]
    fn test_disc_fires_after_two_then_backs_off() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Disc);
        assert_eq!(monitor.observe(over()), Verdict::Quiet);
        assert!(monitor.observe(over()).is_fire());
        assert_eq!(monitor.fire_count_threshold(), 3);

        // second episode now needs 4 consecutive over samples
        for _ in 0..3 {
            assert_eq!(monitor.observe(over()), Verdict::Quiet);
        }
        assert!(monitor.observe(over()).is_fire());
        assert_eq!(monitor.fire_count_threshold(), 5);
    }

    #[test]
    fn test_single_under_sample_resets_run() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Disc);
        assert_eq!(monitor.observe(over()), Verdict::Quiet);
        assert_eq!(monitor.observe(under()), Verdict::Quiet);
        // would have fired here if the counter had survived
        assert_eq!(monitor.observe(over()), Verdict::Quiet);
        assert!(monitor.observe(over()).is_fire());
    }

    #[test]
    fn test_unavailable_sample_counts_as_quiet() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Disc);
        assert_eq!(monitor.observe(over()), Verdict::Quiet);
        assert_eq!(monitor.observe(Reading::unavailable()), Verdict::Quiet);
        assert_eq!(monitor.observe(over()), Verdict::Quiet);
        assert!(monitor.observe(over()).is_fire());
    }

    #[test]
    fn test_at_threshold_value_is_quiet() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Cpu);
        for _ in 0..10 {
            assert_eq!(
                monitor.observe(Reading::single(MetricSample::Available(0.8))),
                Verdict::Quiet
            );
        }
    }

    #[test]
    fn test_quiet_window_restores_baseline() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Disc);
        monitor.observe(over());
        assert!(monitor.observe(over()).is_fire());
        assert_eq!(monitor.fire_count_threshold(), 3);

        // 15 quiet ticks are not yet enough
        for _ in 0..15 {
            monitor.observe(under());
        }
        assert_eq!(monitor.fire_count_threshold(), 3);

        // the 16th quiet tick exceeds the window
        monitor.observe(under());
        assert_eq!(monitor.fire_count_threshold(), 1);
    }

    #[test]
    fn test_over_tick_resets_quiet_run() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Disc);
        monitor.observe(over());
        assert!(monitor.observe(over()).is_fire());

        // quiet run interrupted by a single over tick never reaches the window
        for _ in 0..12 {
            monitor.observe(under());
        }
        monitor.observe(over());
        for _ in 0..12 {
            monitor.observe(under());
        }
        assert_eq!(monitor.fire_count_threshold(), 3);
    }

    #[test]
    fn test_ram_requires_both_components_over() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Ram);

        // swap under its threshold keeps the tick quiet no matter the usage
        for _ in 0..10 {
            assert_eq!(monitor.observe(ram(0.95, 0.5)), Verdict::Quiet);
        }
        // usage under its threshold likewise
        for _ in 0..10 {
            assert_eq!(monitor.observe(ram(0.7, 0.9)), Verdict::Quiet);
        }

        // both over: baseline 3 fires on the 4th tick
        for _ in 0..3 {
            assert_eq!(monitor.observe(ram(0.9, 0.7)), Verdict::Quiet);
        }
        assert!(monitor.observe(ram(0.9, 0.7)).is_fire());
    }

    #[test]
    fn test_ram_missing_swap_sample_is_quiet() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Ram);
        let missing_swap = Reading::composite(
            MetricSample::Available(0.95),
            MetricSample::Unavailable,
        );
        for _ in 0..10 {
            assert_eq!(monitor.observe(missing_swap), Verdict::Quiet);
        }
    }

    #[test]
    fn test_one_fire_per_episode() {
        let mut monitor = ThresholdMonitor::new(TrackedResource::Cpu);
        let mut fires = 0;
        // 9 over ticks: bar 4 means fires on tick 5, counter restarts, and
        // ticks 6..9 only reach a count of 4
        for _ in 0..9 {
            if monitor.observe(over()).is_fire() {
                fires += 1;
            }
        }
        assert_eq!(fires, 1);
    }

    #[test]
    fn test_messages_are_resource_specific() {
        let mut cpu = ThresholdMonitor::new(TrackedResource::Cpu);
        let mut fired = Verdict::Quiet;
        for _ in 0..5 {
            fired = cpu.observe(over());
        }
        match fired {
            Verdict::Fire(msg) => {
                assert_eq!(msg.title, "High CPU usage");
                assert!(msg.body.contains("80%"));
            }
            Verdict::Quiet => panic!("expected a fire"),
        }
    }
}
