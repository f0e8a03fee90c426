//! gridsched-core — value types for the gridsched scheduling substrate.
//!
//! Identities, running states, workload reports, actions and instructions,
//! plus the pass-file parser used to replay a scheduling pass offline.

pub mod action;
pub mod config;
pub mod error;
pub mod report;
pub mod types;

pub use action::{ActionType, InstructionMap, SchedulerAction, WorkloadActionsInstruction};
pub use config::{EntryConfig, MemberConfig, PassConfig, StageConfig, StagedOperation};
pub use error::{ConfigError, ConfigResult};
pub use report::{ReportEntry, ReportMapping, WorkloadReport};
pub use types::*;
