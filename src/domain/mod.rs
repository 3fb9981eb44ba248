//! Domain models for resmond
//!
//! This module contains the core vocabulary of the watchdog: which host
//! resources can be tracked and what a single measurement looks like.

pub mod resource;
pub mod sample;

pub use resource::TrackedResource;
pub use sample::{MetricSample, Reading};
