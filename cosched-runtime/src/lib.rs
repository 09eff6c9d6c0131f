//! Cosched Runtime - Core engine for cooperative tick scheduling
//!
//! This crate provides the scheduler engine: a fixed-capacity task list, the
//! per-cycle driver and the task-control API, plus the config, clock and
//! diagnostic plumbing around it.

mod clock;
mod config;
mod diagnostic;
mod error;
mod registry;
mod scheduler;
mod task;
mod time_unit;

// Re-export public API
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use self::config::{load_toml_config, load_yaml_config, resolve_config_value, SchedulerConfig};
pub use diagnostic::{Diagnostic, DiagnosticSink, NoBoundReason, TracingSink};
pub use error::{Result, SchedulerError};
pub use linkme;
pub use registry::DECLARED_TASKS;
pub use scheduler::{CycleReport, Scheduler, SchedulerBuilder, SchedulerHandle, TaskContext, Wake};
pub use task::{TaskDecl, TaskDeclBuilder, TaskFn, TaskId, TaskState, Ticks, MAX_DELAY};
pub use time_unit::TimeUnit;
