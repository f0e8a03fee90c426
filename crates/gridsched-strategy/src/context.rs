//! Strategy context — the working state of one scheduling pass.
//!
//! A context pairs the member → report mapping a strategy reasons about
//! with the actions it has staged so far. Staging helpers keep the two in
//! step: adding a workload puts a `NotStarted` entry into the member's
//! report, removing one drops its entries, so later decisions in the same
//! pass see the post-change view.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use gridsched_core::{
    ClusterMember, ConfigResult, PassConfig, ReportEntry, ReportMapping, SchedulerAction,
    StagedOperation, Workload, WorkloadReport,
};

/// Cluster member → actions staged for it, in staging order.
pub type ActionMapping = BTreeMap<ClusterMember, Vec<SchedulerAction>>;

/// Mutable state for a single scheduling pass.
///
/// Not meant to be shared: one flow of control builds it, stages into it,
/// and compiles it. Callers must not stage contradictory actions for the
/// same workload on the same member; nothing here reconciles them.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStrategyContext {
    mapping: ReportMapping,
    actions: ActionMapping,
}

impl SchedulerStrategyContext {
    /// Create a context over `mapping` with no staged actions.
    pub fn new(mapping: ReportMapping) -> Self {
        Self {
            mapping,
            actions: ActionMapping::new(),
        }
    }

    pub fn from_reports<I>(reports: I) -> Self
    where
        I: IntoIterator<Item = (ClusterMember, WorkloadReport)>,
    {
        Self::new(reports.into_iter().collect())
    }

    /// Build a context from a pass file and replay its stages in order.
    pub fn from_pass(config: &PassConfig) -> ConfigResult<Self> {
        let mut context = Self::new(config.reports()?);
        for op in config.operations()? {
            context.apply(&op);
        }
        Ok(context)
    }

    pub fn mapping(&self) -> &ReportMapping {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut ReportMapping {
        &mut self.mapping
    }

    pub fn report(&self, member: &ClusterMember) -> Option<&WorkloadReport> {
        self.mapping.get(member)
    }

    pub fn actions(&self) -> &ActionMapping {
        &self.actions
    }

    /// Actions staged for `member`, oldest first. Empty if none.
    pub fn actions_for(&self, member: &ClusterMember) -> &[SchedulerAction] {
        self.actions.get(member).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_actions(&self) -> bool {
        self.actions.values().any(|a| !a.is_empty())
    }

    pub fn into_parts(self) -> (ReportMapping, ActionMapping) {
        (self.mapping, self.actions)
    }

    /// Append an action to a member's list, creating the list on first use.
    ///
    /// Every staging helper goes through here.
    pub fn add_action(&mut self, member: &ClusterMember, action: SchedulerAction) {
        debug!(
            member = %member,
            workload = %action.workload(),
            action = %action.action_type(),
            "staged action"
        );
        self.actions.entry(member.clone()).or_default().push(action);
    }

    /// Stage `workload` onto `member`.
    ///
    /// The member's report gains a `NotStarted` entry. There is no check for
    /// an existing entry; staging the same workload twice on one member
    /// yields two entries and two `Add` actions.
    pub fn add_workload(&mut self, member: &ClusterMember, workload: &Workload) {
        self.mapping
            .entry(member.clone())
            .or_default()
            .push(ReportEntry::not_started(workload.clone()));
        self.add_action(member, SchedulerAction::add(workload.clone()));
    }

    /// Stage removal of `workload` from `member`.
    ///
    /// Every entry for the workload leaves the member's report before this
    /// returns. A member that does not hold it still gets the `Remove`.
    pub fn remove_workload(&mut self, member: &ClusterMember, workload: &Workload) {
        if let Some(report) = self.mapping.get_mut(member) {
            report.retain_without(workload);
        }
        self.add_action(member, SchedulerAction::remove(workload.clone()));
    }

    /// Stage removal of `workload` from every member whose report holds it.
    ///
    /// Returns the members a removal was staged for. More than one holder
    /// means the cluster briefly ran the workload twice; it is removed from
    /// all of them and a warning is logged.
    pub fn remove_workload_everywhere(&mut self, workload: &Workload) -> Vec<ClusterMember> {
        let holders: Vec<ClusterMember> = self
            .mapping
            .iter()
            .filter(|(_, report)| report.contains(workload))
            .map(|(member, _)| member.clone())
            .collect();

        if holders.len() > 1 {
            warn!(
                workload = %workload,
                members = ?holders.iter().map(ClusterMember::name).collect::<Vec<_>>(),
                "workload reported by more than one member; removing from all"
            );
        }

        for member in &holders {
            self.remove_workload(member, workload);
        }
        holders
    }

    /// Stage an in-place restart. The member's report is left untouched.
    pub fn restart_workload(&mut self, member: &ClusterMember, workload: &Workload) {
        self.add_action(member, SchedulerAction::restart(workload.clone()));
    }

    /// Apply one validated pass-file operation through the matching helper.
    pub fn apply(&mut self, op: &StagedOperation) {
        match op {
            StagedOperation::Add { member, workload } => self.add_workload(member, workload),
            StagedOperation::Remove {
                member: Some(member),
                workload,
            } => self.remove_workload(member, workload),
            StagedOperation::Remove {
                member: None,
                workload,
            } => {
                self.remove_workload_everywhere(workload);
            }
            StagedOperation::Restart { member, workload } => {
                self.restart_workload(member, workload)
            }
        }
    }
}
