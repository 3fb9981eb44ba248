//! resmond - host resource watchdog library
//!
//! This library provides the core functionality for periodic host resource
//! sampling, threshold-based alerting with adaptive backoff, and best-effort
//! notification delivery.
//!
//! # Modules
//!
//! - [`alerts`]: Threshold monitors and notification channels
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models
//! - [`error`]: Error types
//! - [`metrics`]: Host metric acquisition layer
//! - [`services`]: The sampling control loop

pub mod alerts;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod services;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
