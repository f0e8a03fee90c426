//! Instruction compiler — turns staged actions into ordered batches.
//!
//! Removals always come back as their own batch, ahead of adds and
//! restarts. The dispatch layer finishes (or at least gets acknowledgment
//! for) the first batch before issuing the second, so a workload moving
//! between members is stopped on the old one before it starts on the new
//! one and never runs on both.

use tracing::debug;

use gridsched_core::{ActionType, InstructionMap, SchedulerAction, WorkloadActionsInstruction};

use crate::context::{ActionMapping, SchedulerStrategyContext};

impl SchedulerStrategyContext {
    /// Compile the staged actions into at most two batches.
    ///
    /// The first batch holds removals, the second adds and restarts. Empty
    /// batches are omitted, so the result has 0, 1, or 2 elements.
    pub fn to_instruction_map(&self) -> Vec<InstructionMap> {
        let mut compiled = Vec::with_capacity(2);

        for filter in [ActionType::REMOVALS, ActionType::STARTS] {
            let instructions = compile_instructions(self.actions(), filter);
            if !instructions.is_empty() {
                debug!(
                    batch = compiled.len(),
                    members = instructions.len(),
                    filter = ?filter,
                    "compiled instruction batch"
                );
                compiled.push(instructions);
            }
        }

        compiled
    }
}

/// Build one instruction per member from the actions whose type is in `filter`.
///
/// Relative order of the kept actions is preserved. Members left with no
/// matching action get no instruction.
pub fn compile_instructions(actions: &ActionMapping, filter: &[ActionType]) -> InstructionMap {
    actions
        .iter()
        .filter(|(_, staged)| !staged.is_empty())
        .filter_map(|(member, staged)| {
            let kept: Vec<SchedulerAction> = staged
                .iter()
                .filter(|a| filter.contains(&a.action_type()))
                .cloned()
                .collect();
            (!kept.is_empty()).then(|| (member.clone(), WorkloadActionsInstruction::new(kept)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsched_core::{ClusterMember, ReportEntry, RunningState, Workload, WorkloadReport};

    fn member(name: &str) -> ClusterMember {
        ClusterMember::from(name)
    }

    fn workload(urn: &str) -> Workload {
        Workload::from(urn)
    }

    fn running(urns: &[&str]) -> WorkloadReport {
        urns.iter()
            .map(|u| ReportEntry::new(workload(u), RunningState::Running))
            .collect()
    }

    #[test]
    fn empty_context_compiles_to_nothing() {
        let context = SchedulerStrategyContext::from_reports([(member("n1"), running(&["a"]))]);
        assert!(context.to_instruction_map().is_empty());
    }

    #[test]
    fn only_removals_yield_one_batch() {
        let mut context = SchedulerStrategyContext::from_reports([(member("n1"), running(&["a"]))]);
        context.remove_workload(&member("n1"), &workload("a"));

        let batches = context.to_instruction_map();

        assert_eq!(batches.len(), 1);
        let instruction = &batches[0][&member("n1")];
        assert_eq!(instruction.actions(), &[SchedulerAction::remove(workload("a"))]);
    }

    #[test]
    fn only_starts_yield_one_batch() {
        let mut context = SchedulerStrategyContext::from_reports([(member("n1"), running(&["a"]))]);
        context.add_workload(&member("n1"), &workload("b"));
        context.restart_workload(&member("n1"), &workload("a"));

        let batches = context.to_instruction_map();

        assert_eq!(batches.len(), 1);
        assert_eq!(
            batches[0][&member("n1")].actions(),
            &[
                SchedulerAction::add(workload("b")),
                SchedulerAction::restart(workload("a")),
            ]
        );
    }

    #[test]
    fn removals_come_before_starts() {
        let mut context = SchedulerStrategyContext::from_reports([
            (member("old"), running(&["w"])),
            (member("new"), WorkloadReport::default()),
        ]);
        // Stage the add first; the compiler must still put the removal first.
        context.add_workload(&member("new"), &workload("w"));
        context.remove_workload(&member("old"), &workload("w"));

        let batches = context.to_instruction_map();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].keys().collect::<Vec<_>>(), vec![&member("old")]);
        assert_eq!(batches[1].keys().collect::<Vec<_>>(), vec![&member("new")]);
        assert!(batches[0]
            .values()
            .flat_map(WorkloadActionsInstruction::iter)
            .all(|a| a.action_type() == ActionType::Remove));
    }

    #[test]
    fn mixed_member_is_split_preserving_order() {
        let mut context = SchedulerStrategyContext::default();
        let n1 = member("n1");
        context.add_workload(&n1, &workload("a"));
        context.remove_workload(&n1, &workload("b"));
        context.restart_workload(&n1, &workload("c"));
        context.remove_workload(&n1, &workload("d"));
        context.add_workload(&n1, &workload("e"));

        let batches = context.to_instruction_map();

        let removed: Vec<&str> = batches[0][&n1].iter().map(|a| a.workload().urn()).collect();
        let started: Vec<&str> = batches[1][&n1].iter().map(|a| a.workload().urn()).collect();
        assert_eq!(removed, vec!["b", "d"]);
        assert_eq!(started, vec!["a", "c", "e"]);
    }

    #[test]
    fn members_without_matching_actions_are_omitted() {
        let mut context = SchedulerStrategyContext::default();
        context.add_workload(&member("adder"), &workload("a"));
        context.remove_workload(&member("remover"), &workload("b"));

        let batches = context.to_instruction_map();

        assert!(!batches[0].contains_key(&member("adder")));
        assert!(!batches[1].contains_key(&member("remover")));
    }

    #[test]
    fn conflicting_actions_land_in_both_batches() {
        let mut context = SchedulerStrategyContext::default();
        context.add_workload(&member("n1"), &workload("w"));
        context.remove_workload(&member("n1"), &workload("w"));

        let batches = context.to_instruction_map();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0][&member("n1")].len(), 1);
        assert_eq!(batches[1][&member("n1")].len(), 1);
    }

    #[test]
    fn compiling_does_not_consume_actions() {
        let mut context = SchedulerStrategyContext::default();
        context.add_workload(&member("n1"), &workload("w"));

        let first = context.to_instruction_map();
        let second = context.to_instruction_map();

        assert_eq!(first, second);
        assert!(context.has_actions());
    }

    #[test]
    fn empty_action_lists_are_skipped() {
        let mut actions = ActionMapping::new();
        actions.insert(member("idle"), Vec::new());

        assert!(compile_instructions(&actions, ActionType::STARTS).is_empty());
    }
}
