//! Tracked host resources

use serde::{Deserialize, Serialize};
use std::fmt;

/// A host resource the daemon can watch.
///
/// The variant order is the canonical processing order of the control loop,
/// so a run with the same selection always evaluates resources in the same
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackedResource {
    /// Total CPU utilization (user + system)
    Cpu,
    /// Physical memory usage combined with swap pressure
    Ram,
    /// Filesystem usage
    Disc,
}

impl TrackedResource {
    /// All resources in canonical order
    pub const ALL: [TrackedResource; 3] = [Self::Cpu, Self::Ram, Self::Disc];

    /// Parse a command-line token into a resource.
    ///
    /// Tokens are matched literally; `disc` is the historical spelling and
    /// the only one accepted.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "cpu" => Some(Self::Cpu),
            "ram" => Some(Self::Ram),
            "disc" => Some(Self::Disc),
            _ => None,
        }
    }

}

impl fmt::Display for TrackedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Ram => write!(f, "ram"),
            Self::Disc => write!(f, "disc"),
        }
    }
}
