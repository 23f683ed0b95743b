use serde::Serialize;
use std::fmt;

use crate::models::ServiceSpec;

/// Outcome of a single port probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    Running,
    Stopped,
}

impl Reachability {
    pub fn is_running(self) -> bool {
        self == Reachability::Running
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reachability::Running => write!(f, "running"),
            Reachability::Stopped => write!(f, "stopped"),
        }
    }
}

/// Status of one service for one run.
///
/// The probe result and the resolved PID are independent signals and are
/// reported side by side, even when they disagree.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRecord<'a> {
    pub service: &'a ServiceSpec,
    pub reachable: Reachability,
    pub pid: Option<u32>,
}

impl<'a> StatusRecord<'a> {
    pub fn new(service: &'a ServiceSpec, reachable: Reachability, pid: Option<u32>) -> Self {
        Self { service, reachable, pid }
    }

    pub fn is_running(&self) -> bool {
        self.reachable.is_running()
    }
}
