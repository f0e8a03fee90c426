//! Report snapshots.

use gridsched_core::ReportMapping;

use crate::context::SchedulerStrategyContext;

/// Deep-copy a member → report mapping.
///
/// The result has the same keys and equal reports, and shares no entries
/// with `reports`: changes to either side are invisible to the other.
pub fn copy_reports(reports: &ReportMapping) -> ReportMapping {
    reports
        .iter()
        .map(|(member, report)| (member.clone(), report.copy()))
        .collect()
}

impl SchedulerStrategyContext {
    /// Deep copy of the context's current reports.
    pub fn snapshot(&self) -> ReportMapping {
        copy_reports(self.mapping())
    }
}
