//! Metric samples and per-tick readings

use serde::{Deserialize, Serialize};
use std::fmt;

/// One measurement taken at a polling tick.
///
/// Available values are normalized utilization ratios in `[0, 1]`.
/// `Unavailable` is the sentinel for a failed or not-yet-primed measurement;
/// the monitors treat it as under-threshold so a broken probe can never raise
/// a false alarm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricSample {
    /// Measured utilization ratio in `[0, 1]`
    Available(f64),
    /// Measurement failed this tick
    Unavailable,
}

impl MetricSample {
    /// Build a sample from a raw ratio, clamping into `[0, 1]`.
    ///
    /// Non-finite input degrades to `Unavailable`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio.is_finite() {
            Self::Available(ratio.clamp(0.0, 1.0))
        } else {
            Self::Unavailable
        }
    }

    /// Whether the sample is available and strictly above the threshold
    pub fn exceeds(&self, threshold: f64) -> bool {
        matches!(self, Self::Available(v) if *v > threshold)
    }

    /// The measured value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Available(v) => Some(*v),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for MetricSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(v) => write!(f, "{:.0}%", v * 100.0),
            Self::Unavailable => write!(f, "n/a"),
        }
    }
}

/// Everything one resource reports on a single tick.
///
/// Most resources carry only a primary value; RAM also carries swap pressure
/// as a secondary signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Primary utilization ratio
    pub primary: MetricSample,
    /// Auxiliary signal (swap pressure for RAM)
    pub secondary: Option<MetricSample>,
}

impl Reading {
    /// A reading with only a primary value
    pub fn single(primary: MetricSample) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// A composite reading with a secondary signal
    pub fn composite(primary: MetricSample, secondary: MetricSample) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// A reading where every component failed
    pub fn unavailable() -> Self {
        Self::single(MetricSample::Unavailable)
    }
}
