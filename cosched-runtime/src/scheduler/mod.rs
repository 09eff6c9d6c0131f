mod builder;
mod context;
mod handle;
mod list;
mod scheduler;

pub use builder::SchedulerBuilder;
pub use context::TaskContext;
pub use handle::SchedulerHandle;
pub use scheduler::{CycleReport, Scheduler, Wake};
