//! Actions and instructions — the output side of a scheduling pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ClusterMember, Workload};

/// One batch of compiled instructions, keyed by the member that runs them.
pub type InstructionMap = BTreeMap<ClusterMember, WorkloadActionsInstruction>;

/// What a member should do with a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Add,
    Remove,
    Restart,
}

impl ActionType {
    /// Action types compiled into the first (stop) batch.
    pub const REMOVALS: &'static [ActionType] = &[ActionType::Remove];

    /// Action types compiled into the second (start) batch.
    pub const STARTS: &'static [ActionType] = &[ActionType::Add, ActionType::Restart];

    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Add => "add",
            ActionType::Remove => "remove",
            ActionType::Restart => "restart",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// An intended change: apply `action_type` to `workload`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchedulerAction {
    workload: Workload,
    action_type: ActionType,
}

impl SchedulerAction {
    pub fn new(workload: Workload, action_type: ActionType) -> Self {
        Self {
            workload,
            action_type,
        }
    }

    pub fn add(workload: Workload) -> Self {
        Self::new(workload, ActionType::Add)
    }

    pub fn remove(workload: Workload) -> Self {
        Self::new(workload, ActionType::Remove)
    }

    pub fn restart(workload: Workload) -> Self {
        Self::new(workload, ActionType::Restart)
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }
}

impl fmt::Display for SchedulerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action_type, self.workload)
    }
}

/// Ordered actions for a single member, handed to the dispatch layer as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkloadActionsInstruction {
    actions: Vec<SchedulerAction>,
}

impl WorkloadActionsInstruction {
    pub fn new(actions: Vec<SchedulerAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[SchedulerAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchedulerAction> {
        self.actions.iter()
    }

    pub fn into_actions(self) -> Vec<SchedulerAction> {
        self.actions
    }
}
