//! sysinfo-backed metric sources

use super::MetricSource;
use crate::domain::{MetricSample, Reading, TrackedResource};
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

/// Total CPU utilization (user + system) as a ratio of all cores.
///
/// CPU usage is a delta between two refreshes, so the constructor takes an
/// initial measurement and waits out sysinfo's minimum update interval before
/// the first real sample.
pub struct CpuSource {
    system: System,
}

impl CpuSource {
    /// Create and prime the CPU source
    pub fn new() -> Self {
        let mut system = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        system.refresh_cpu_usage();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        Self { system }
    }
}

impl Default for CpuSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for CpuSource {
    fn resource(&self) -> TrackedResource {
        TrackedResource::Cpu
    }

    fn sample(&mut self) -> Reading {
        self.system.refresh_cpu_usage();
        let usage = f64::from(self.system.global_cpu_usage()) / 100.0;
        Reading::single(MetricSample::from_ratio(usage))
    }
}

/// Physical memory usage plus swap pressure.
///
/// Swap pressure is unavailable on hosts without configured swap; the RAM
/// monitor then treats every tick as quiet, matching the composite firing
/// condition.
pub struct RamSource {
    system: System,
}

impl RamSource {
    /// Create the RAM source
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
        );
        Self { system }
    }
}

impl Default for RamSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for RamSource {
    fn resource(&self) -> TrackedResource {
        TrackedResource::Ram
    }

    fn sample(&mut self) -> Reading {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let usage = if total == 0 {
            log::warn!("ram: total memory reported as zero");
            MetricSample::Unavailable
        } else {
            MetricSample::from_ratio(self.system.used_memory() as f64 / total as f64)
        };

        let total_swap = self.system.total_swap();
        let swap = if total_swap == 0 {
            MetricSample::Unavailable
        } else {
            MetricSample::from_ratio(self.system.used_swap() as f64 / total_swap as f64)
        };

        Reading::composite(usage, swap)
    }
}

/// Filesystem usage across mounted disks.
///
/// Reports the fullest disk; an alert on any nearly-full filesystem is the
/// condition we care about.
pub struct DiscSource {
    disks: Disks,
}

impl DiscSource {
    /// Create the disk source
    pub fn new() -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Default for DiscSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for DiscSource {
    fn resource(&self) -> TrackedResource {
        TrackedResource::Disc
    }

    fn sample(&mut self) -> Reading {
        self.disks.refresh(true);

        let fullest = self
            .disks
            .list()
            .iter()
            .filter(|disk| disk.total_space() > 0)
            .map(|disk| {
                let total = disk.total_space() as f64;
                (total - disk.available_space() as f64) / total
            })
            .fold(None, |acc: Option<f64>, usage| {
                Some(acc.map_or(usage, |a| a.max(usage)))
            });

        match fullest {
            Some(usage) => Reading::single(MetricSample::from_ratio(usage)),
            None => {
                log::warn!("disc: no disks reported by the host");
                Reading::unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These touch the real host and only assert shape, not values.

    #[test]
    fn test_ram_source_reports_composite_reading() {
        let mut source = RamSource::new();
        let reading = source.sample();
        assert!(reading.secondary.is_some());
        if let Some(usage) = reading.primary.value() {
            assert!((0.0..=1.0).contains(&usage));
        }
    }

    #[test]
    fn test_disc_source_reports_single_reading() {
        let mut source = DiscSource::new();
        let reading = source.sample();
        assert!(reading.secondary.is_none());
        if let Some(usage) = reading.primary.value() {
            assert!((0.0..=1.0).contains(&usage));
        }
    }

    #[test]
    fn test_source_resources() {
        assert_eq!(RamSource::new().resource(), TrackedResource::Ram);
        assert_eq!(DiscSource::new().resource(), TrackedResource::Disc);
    }
}
