//! Workload reports — what a member says it is running.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ClusterMember, RunningState, Workload};

/// Cluster member → last known workload report.
pub type ReportMapping = BTreeMap<ClusterMember, WorkloadReport>;

/// One (workload, running state) pair in a report.
///
/// Entries are immutable values; a state change is a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportEntry {
    workload: Workload,
    state: RunningState,
}

impl ReportEntry {
    pub fn new(workload: Workload, state: RunningState) -> Self {
        Self { workload, state }
    }

    /// Entry for a workload that has been staged but not yet started.
    pub fn not_started(workload: Workload) -> Self {
        Self::new(workload, RunningState::NotStarted)
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn state(&self) -> RunningState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }
}

/// Ordered snapshot of the workloads on one cluster member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkloadReport {
    entries: Vec<ReportEntry>,
}

impl WorkloadReport {
    pub fn new(entries: Vec<ReportEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. No duplicate check is made.
    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn contains(&self, workload: &Workload) -> bool {
        self.entries.iter().any(|e| e.workload() == workload)
    }

    /// Drop every entry for `workload`, returning how many were removed.
    pub fn retain_without(&mut self, workload: &Workload) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.workload() != workload);
        before - self.entries.len()
    }

    /// Entries whose workload has stopped executing.
    pub fn terminated(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.is_terminated())
    }

    /// Stable sort of the entries; equal entries keep their relative order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&ReportEntry, &ReportEntry) -> Ordering,
    {
        self.entries.sort_by(compare);
    }

    /// Independent copy of this report.
    ///
    /// Entries are values, so the copy shares nothing with `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl FromIterator<ReportEntry> for WorkloadReport {
    fn from_iter<I: IntoIterator<Item = ReportEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WorkloadReport {
    type Item = &'a ReportEntry;
    type IntoIter = std::slice::Iter<'a, ReportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
