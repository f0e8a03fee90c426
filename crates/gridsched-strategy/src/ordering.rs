//! Report entry ordering.

use std::cmp::Ordering;

use gridsched_core::{ReportEntry, WorkloadReport};

/// Order terminated entries ahead of everything else.
///
/// This is not a total order: all terminated entries compare `Equal` to
/// each other, as do all non-terminated ones. Anything relying on the order
/// within a class must sort stably.
pub fn compare_by_running_state(a: &ReportEntry, b: &ReportEntry) -> Ordering {
    match (a.is_terminated(), b.is_terminated()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Stable-sort a report so terminated workloads come first.
pub fn sort_terminated_first(report: &mut WorkloadReport) {
    report.sort_by(compare_by_running_state);
}
