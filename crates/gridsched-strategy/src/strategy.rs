//! The seam concrete balancing strategies plug into.

use tracing::info;

use gridsched_core::{InstructionMap, ReportMapping, Workload};

use crate::context::SchedulerStrategyContext;
use crate::snapshot::copy_reports;

/// A placement policy.
///
/// Implementations decide *where* workloads go by staging changes through
/// the context helpers, then return `context.to_instruction_map()`. The
/// returned batches must be dispatched in order: every removal in batch 0
/// completes before anything in batch 1 is issued.
pub trait SchedulerStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Distribute `workloads` across the members in `context`.
    fn schedule(
        &self,
        workloads: &[Workload],
        context: &mut SchedulerStrategyContext,
    ) -> Vec<InstructionMap>;

    /// Redistribute what the members in `context` already run.
    fn rebalance(&self, context: &mut SchedulerStrategyContext) -> Vec<InstructionMap>;
}

/// Run a scheduling pass over a private copy of `reports`.
///
/// The caller's mapping is never touched; the returned context holds the
/// post-pass view and the staged actions.
pub fn schedule_pass<S>(
    strategy: &S,
    workloads: &[Workload],
    reports: &ReportMapping,
) -> (Vec<InstructionMap>, SchedulerStrategyContext)
where
    S: SchedulerStrategy + ?Sized,
{
    let mut context = SchedulerStrategyContext::new(copy_reports(reports));
    let batches = strategy.schedule(workloads, &mut context);
    log_pass(strategy.name(), "schedule", &batches);
    (batches, context)
}

/// Run a rebalancing pass over a private copy of `reports`.
pub fn rebalance_pass<S>(
    strategy: &S,
    reports: &ReportMapping,
) -> (Vec<InstructionMap>, SchedulerStrategyContext)
where
    S: SchedulerStrategy + ?Sized,
{
    let mut context = SchedulerStrategyContext::new(copy_reports(reports));
    let batches = strategy.rebalance(&mut context);
    log_pass(strategy.name(), "rebalance", &batches);
    (batches, context)
}

fn log_pass(strategy: &str, pass: &str, batches: &[InstructionMap]) {
    let instructions: usize = batches.iter().map(|b| b.len()).sum();
    info!(
        strategy,
        pass,
        batches = batches.len(),
        instructions,
        "scheduling pass compiled"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsched_core::{ClusterMember, ReportEntry, RunningState, WorkloadReport};

    /// Puts every workload on the first member and restarts anything failed.
    struct FirstMember;

    impl SchedulerStrategy for FirstMember {
        fn name(&self) -> &str {
            "first-member"
        }

        fn schedule(
            &self,
            workloads: &[Workload],
            context: &mut SchedulerStrategyContext,
        ) -> Vec<InstructionMap> {
            if let Some(first) = context.mapping().keys().next().cloned() {
                for workload in workloads {
                    context.add_workload(&first, workload);
                }
            }
            context.to_instruction_map()
        }

        fn rebalance(&self, context: &mut SchedulerStrategyContext) -> Vec<InstructionMap> {
            let failed: Vec<(ClusterMember, Workload)> = context
                .mapping()
                .iter()
                .flat_map(|(m, r)| {
                    r.terminated()
                        .map(move |e| (m.clone(), e.workload().clone()))
                })
                .collect();
            for (member, workload) in &failed {
                context.restart_workload(member, workload);
            }
            context.to_instruction_map()
        }
    }

    fn reports() -> ReportMapping {
        let mut reports = ReportMapping::new();
        reports.insert(
            ClusterMember::from("n1"),
            WorkloadReport::new(vec![ReportEntry::new(
                Workload::from("w0"),
                RunningState::Failed,
            )]),
        );
        reports.insert(ClusterMember::from("n2"), WorkloadReport::default());
        reports
    }

    #[test]
    fn schedule_pass_leaves_caller_mapping_untouched() {
        let source = reports();

        let (batches, context) =
            schedule_pass(&FirstMember, &[Workload::from("w1")], &source);

        assert_eq!(source, reports());
        assert_eq!(batches.len(), 1);
        assert!(context
            .report(&ClusterMember::from("n1"))
            .unwrap()
            .contains(&Workload::from("w1")));
    }

    #[test]
    fn rebalance_pass_restarts_terminated() {
        let (batches, _) = rebalance_pass(&FirstMember, &reports());

        assert_eq!(batches.len(), 1);
        let instruction = &batches[0][&ClusterMember::from("n1")];
        assert_eq!(instruction.len(), 1);
        assert_eq!(instruction.actions()[0].workload(), &Workload::from("w0"));
    }

    #[test]
    fn strategy_is_object_safe() {
        let strategy: Box<dyn SchedulerStrategy> = Box::new(FirstMember);
        let (batches, _) = schedule_pass(strategy.as_ref(), &[], &reports());
        assert!(batches.is_empty());
    }
}
