//! gridsched strategy layer — action staging and instruction compilation.
//!
//! Concrete balancing strategies decide *what* moves *where*. This crate is
//! the substrate they build on: a pass-scoped context that records staged
//! add/remove/restart actions per cluster member, and a compiler that turns
//! those actions into two ordered instruction batches (removals first, then
//! adds and restarts) so a workload never runs on two members at once.
//!
//! # Components
//!
//! - **`context`** — `SchedulerStrategyContext` and the staging helpers
//! - **`compile`** — two-phase instruction compiler
//! - **`snapshot`** — deep copies of report mappings
//! - **`ordering`** — terminated-first entry comparator
//! - **`strategy`** — `SchedulerStrategy` trait and pass runners

pub mod compile;
pub mod context;
pub mod ordering;
pub mod snapshot;
pub mod strategy;

pub use compile::compile_instructions;
pub use context::{ActionMapping, SchedulerStrategyContext};
pub use ordering::{compare_by_running_state, sort_terminated_first};
pub use snapshot::copy_reports;
pub use strategy::{SchedulerStrategy, rebalance_pass, schedule_pass};
