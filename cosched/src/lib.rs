//! # Cosched - Cooperative tick scheduling
//!
//! A non-preemptive scheduler for small targets. One execution context is
//! shared by a bounded set of tasks; each cycle counts down delays, runs the
//! due tasks in registration order and tells the caller how long it may sleep.
//!
//! ## Features
//!
//! - **Fixed capacity**: task storage is an `N`-slot arena, no allocation per task
//! - **Delayed, periodic and blocked tasks**: one-shot or re-armed after each run
//! - **Self control**: a task reschedules, blocks or removes itself through its context
//! - **Wrapping clocks**: elapsed time survives timestamp wraparound
//! - **Config support**: placeholders like `${app.led.period}` in task declarations
//! - **Host runner**: drive the cycle loop on the tokio timer
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cosched::{task, ManualClock, SchedulerBuilder, TaskContext};
//!
//! #[task(period = "500ms")]
//! fn blink(_ctx: &mut TaskContext<'_>) {
//!     println!("blink");
//! }
//!
//! #[task(delay = "${app.sensor.delay:1s}", period = "${app.sensor.period}")]
//! fn sample(ctx: &mut TaskContext<'_>) {
//!     if sensor_offline() {
//!         ctx.block_self().ok();
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scheduler = SchedulerBuilder::with_toml(rtc(), "config/application.toml")?
//!         .register_all()
//!         .build::<8>()?;
//!
//!     loop {
//!         let ticks = scheduler.run_cycle();
//!         sleep_ticks(ticks);
//!     }
//! }
//! ```
//!
//! ## Configuration
//!
//! Create `config/application.toml`:
//!
//! ```toml
//! [scheduler]
//! tick_hz = 1000
//! idle_sleep = 1000
//!
//! [app.sensor]
//! period = "250ms"
//! ```
//!
//! Any key can be overridden from the environment with the `APP_` prefix,
//! using `__` between path segments:
//!
//! ```bash
//! export APP_SCHEDULER__TICK_HZ=32768
//! export APP_APP__SENSOR__PERIOD=100ms
//! ```

// Re-export macros
pub use cosched_macro::task;

// Re-export core types
pub use cosched_runtime::{
    Clock, CycleReport, Diagnostic, DiagnosticSink, ManualClock, MonotonicClock, NoBoundReason,
    Result, Scheduler, SchedulerBuilder, SchedulerConfig, SchedulerError, SchedulerHandle,
    TaskContext, TaskDecl, TaskFn, TaskId, TaskState, Ticks, TimeUnit, TracingSink, Wake,
    MAX_DELAY,
};

// Make cosched_runtime available for macro expansion
pub use cosched_runtime;
