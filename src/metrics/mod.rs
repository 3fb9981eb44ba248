//! Host metric acquisition layer
//!
//! Each tracked resource has one polling source behind the [`MetricSource`]
//! trait, so the control loop never knows how a value is obtained. Sources
//! degrade internal failures to [`MetricSample::Unavailable`] instead of
//! returning errors; the next tick is the natural retry.
//!
//! [`MetricSample::Unavailable`]: crate::domain::MetricSample::Unavailable

pub mod host;

pub use host::{CpuSource, DiscSource, RamSource};

use crate::domain::{Reading, TrackedResource};

/// A polling source for one tracked resource
pub trait MetricSource: Send {
    /// The resource this source measures
    fn resource(&self) -> TrackedResource;

    /// Take one measurement.
    ///
    /// Never fails; a broken probe reports unavailable components.
    fn sample(&mut self) -> Reading;
}

/// Build the host-backed source for a resource
pub fn host_source(resource: TrackedResource) -> Box<dyn MetricSource> {
    match resource {
        TrackedResource::Cpu => Box::new(CpuSource::new()),
        TrackedResource::Ram => Box::new(RamSource::new()),
        TrackedResource::Disc => Box::new(DiscSource::new()),
    }
}
