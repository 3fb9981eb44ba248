//! Service layer
//!
//! Hosts the scheduler that drives all monitors at a fixed cadence.

pub mod scheduler;

pub use scheduler::Scheduler;
