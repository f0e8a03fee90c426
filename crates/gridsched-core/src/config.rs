//! Pass file parser.
//!
//! A pass file is a TOML description of one scheduling pass: the reports
//! each member last sent, followed by the operations to stage against them.
//! It lets a pass be replayed offline for planning and diagnostics.
//!
//! ```toml
//! [[member]]
//! name = "node-a"
//! workloads = [{ workload = "job/ingest", state = "running" }]
//!
//! [[stage]]
//! op = "remove"
//! workload = "job/ingest"
//! ```

use std::collections::btree_map::Entry;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::ActionType;
use crate::error::{ConfigError, ConfigResult};
use crate::report::{ReportEntry, ReportMapping, WorkloadReport};
use crate::types::{ClusterMember, RunningState, Workload};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassConfig {
    #[serde(default, rename = "member")]
    pub members: Vec<MemberConfig>,
    #[serde(default, rename = "stage")]
    pub stages: Vec<StageConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberConfig {
    pub name: String,
    #[serde(default)]
    pub workloads: Vec<EntryConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryConfig {
    pub workload: String,
    #[serde(default)]
    pub state: RunningState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub op: ActionType,
    pub workload: String,
    /// Required for `add` and `restart`. A `remove` without a member
    /// removes the workload from every member holding it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}

/// A validated stage, ready to be applied to a strategy context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedOperation {
    Add {
        member: ClusterMember,
        workload: Workload,
    },
    Remove {
        member: Option<ClusterMember>,
        workload: Workload,
    },
    Restart {
        member: ClusterMember,
        workload: Workload,
    },
}

impl PassConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            members = config.members.len(),
            stages = config.stages.len(),
            "loaded pass file"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the member → report mapping declared by this pass.
    pub fn reports(&self) -> ConfigResult<ReportMapping> {
        let mut mapping = ReportMapping::new();
        for member in &self.members {
            let report: WorkloadReport = member
                .workloads
                .iter()
                .map(|e| ReportEntry::new(Workload::new(e.workload.as_str()), e.state))
                .collect();
            match mapping.entry(ClusterMember::new(member.name.as_str())) {
                Entry::Vacant(slot) => {
                    slot.insert(report);
                }
                Entry::Occupied(_) => {
                    return Err(ConfigError::DuplicateMember(member.name.clone()));
                }
            }
        }
        Ok(mapping)
    }

    /// The staged operations, in file order.
    pub fn operations(&self) -> ConfigResult<Vec<StagedOperation>> {
        self.stages
            .iter()
            .enumerate()
            .map(|(index, stage)| stage.to_operation(index))
            .collect()
    }
}

impl StageConfig {
    fn to_operation(&self, index: usize) -> ConfigResult<StagedOperation> {
        let workload = Workload::new(self.workload.as_str());
        let member = self.member.as_deref().map(ClusterMember::from);

        let required = |member: Option<ClusterMember>| {
            member.ok_or_else(|| ConfigError::MissingMember {
                index,
                op: self.op,
                workload: self.workload.clone(),
            })
        };

        Ok(match self.op {
            ActionType::Add => StagedOperation::Add {
                member: required(member)?,
                workload,
            },
            ActionType::Restart => StagedOperation::Restart {
                member: required(member)?,
                workload,
            },
            ActionType::Remove => StagedOperation::Remove { member, workload },
        })
    }
}
