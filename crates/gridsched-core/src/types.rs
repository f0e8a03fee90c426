//! Identity and state types shared across gridsched crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a process in the cluster.
///
/// Opaque to the scheduling core: it is only ever used as a map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterMember(String);

impl ClusterMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterMember {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClusterMember {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identity of a long-running unit of work.
///
/// Two workloads are the same workload when their URNs are equal; a report
/// holds at most one entry per workload unless a caller double-stages it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workload(String);

impl Workload {
    pub fn new(urn: impl Into<String>) -> Self {
        Self(urn.into())
    }

    pub fn urn(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Workload {
    fn from(urn: &str) -> Self {
        Self::new(urn)
    }
}

impl From<String> for Workload {
    fn from(urn: String) -> Self {
        Self(urn)
    }
}

/// Last known execution status of a workload on one member.
///
/// Assigned by the execution layer. The scheduling core only ever writes
/// `NotStarted`, for workloads it has just staged onto a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningState {
    #[default]
    NotStarted,
    Starting,
    Running,
    Stopping,
    Stopped,
    Failed,
}

impl RunningState {
    /// Whether the workload has stopped executing, cleanly or not.
    pub fn is_terminated(&self) -> bool {
        matches!(self, RunningState::Stopped | RunningState::Failed)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunningState::Starting | RunningState::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunningState::NotStarted => "NOT_STARTED",
            RunningState::Starting => "STARTING",
            RunningState::Running => "RUNNING",
            RunningState::Stopping => "STOPPING",
            RunningState::Stopped => "STOPPED",
            RunningState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for RunningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminated_states() {
        assert!(RunningState::Stopped.is_terminated());
        assert!(RunningState::Failed.is_terminated());
        assert!(!RunningState::NotStarted.is_terminated());
        assert!(!RunningState::Running.is_terminated());
        assert!(!RunningState::Stopping.is_terminated());
        assert!(RunningState::Starting.is_running());
        assert!(!RunningState::Failed.is_running());
    }

    #[test]
    fn default_is_not_started() {
        assert_eq!(RunningState::default(), RunningState::NotStarted);
    }

    #[test]
    fn running_state_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&RunningState::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");
        let back: RunningState = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(back, RunningState::Failed);
    }

    #[test]
    fn identities_serialize_as_plain_strings() {
        let member = ClusterMember::from("node-a");
        assert_eq!(serde_json::to_string(&member).unwrap(), "\"node-a\"");
        assert_eq!(Workload::from("job/ingest").to_string(), "job/ingest");
    }

    #[test]
    fn members_order_by_name() {
        let mut members = vec![ClusterMember::from("b"), ClusterMember::from("a")];
        members.sort();
        assert_eq!(members[0].name(), "a");
    }
}
