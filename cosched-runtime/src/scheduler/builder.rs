use super::scheduler::Scheduler;
use crate::clock::Clock;
use crate::config::{load_toml_config, load_yaml_config, resolve_config_value, SchedulerConfig};
use crate::diagnostic::DiagnosticSink;
use crate::error::{Result, SchedulerError};
use crate::registry::DECLARED_TASKS;
use crate::task::{TaskDecl, Ticks};
use crate::time_unit::TimeUnit;
use config::Config;
use std::path::Path;
use tracing::info;

/// Builder for the scheduler
pub struct SchedulerBuilder<C> {
    clock: C,
    config: Config,
    sink: Option<Box<dyn DiagnosticSink + Send>>,
    tasks: Vec<TaskDecl>,
}

impl<C: Clock> SchedulerBuilder<C> {
    /// Create a new scheduler builder with default config (empty)
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, Config::default())
    }

    /// Create with TOML config file
    pub fn with_toml<P: AsRef<Path>>(clock: C, path: P) -> Result<Self> {
        Ok(Self::with_config(clock, load_toml_config(path)?))
    }

    /// Create with YAML config file
    pub fn with_yaml<P: AsRef<Path>>(clock: C, path: P) -> Result<Self> {
        Ok(Self::with_config(clock, load_yaml_config(path)?))
    }

    /// Create with custom config
    pub fn with_config(clock: C, config: Config) -> Self {
        Self {
            clock,
            config,
            sink: None,
            tasks: Vec::new(),
        }
    }

    /// Report diagnostics somewhere other than `tracing`.
    pub fn sink<S>(mut self, sink: S) -> Self
    where
        S: DiagnosticSink + Send + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Register one declared task. Tasks are added in the order given.
    pub fn task(mut self, decl: TaskDecl) -> Self {
        self.tasks.push(decl);
        self
    }

    /// Register every function marked with `#[task]`.
    ///
    /// Declared tasks come after anything passed to [`Self::task`] so far;
    /// among themselves they follow link order.
    pub fn register_all(mut self) -> Self {
        self.tasks.extend(DECLARED_TASKS.iter().map(|declare| declare()));
        self
    }

    /// Build an initialised scheduler with every enabled task registered.
    ///
    /// This will:
    /// - Read the `[scheduler]` table (tick rate, sleep bounds)
    /// - Resolve `${...}` placeholders in each task declaration
    /// - Skip tasks whose `enabled` resolves to `false`
    /// - Convert delays and periods to ticks and add the tasks
    pub fn build<const N: usize>(self) -> Result<Scheduler<C, N>> {
        let scheduler_config = SchedulerConfig::from_config(&self.config)?;
        let tick_hz = scheduler_config.tick_hz;

        let mut scheduler = Scheduler::new(self.clock).with_config(scheduler_config);
        if let Some(sink) = self.sink {
            scheduler.replace_sink(sink);
        }
        scheduler.init();

        info!(
            declared_tasks = self.tasks.len(),
            capacity = N,
            tick_hz,
            "Building scheduler"
        );

        for decl in &self.tasks {
            let enabled = resolve_config_value(decl.enabled, &self.config)?;
            if enabled.eq_ignore_ascii_case("false") {
                info!(task = decl.name, "Task disabled by config");
                continue;
            }

            let (delay, period) = Self::resolve_timing(decl, &self.config, tick_hz)?;
            scheduler.add_named(decl.name, decl.handler, delay, period)?;
        }

        Ok(scheduler)
    }

    /// Resolve a declaration's delay and period to ticks
    fn resolve_timing(decl: &TaskDecl, config: &Config, tick_hz: u32) -> Result<(Ticks, Ticks)> {
        let time_unit_str = resolve_config_value(decl.time_unit, config)?;
        let time_unit: TimeUnit = time_unit_str
            .parse()
            .map_err(|_| SchedulerError::InvalidTimeUnit(time_unit_str.clone()))?;

        let delay = resolve_config_value(decl.delay, config)?;
        let period = resolve_config_value(decl.period, config)?;

        Ok((
            TimeUnit::parse_ticks(&delay, time_unit, tick_hz)?,
            TimeUnit::parse_ticks(&period, time_unit, tick_hz)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::scheduler::TaskContext;
    use crate::task::TaskState;

    fn heartbeat(_: &mut TaskContext<'_>) {}

    fn noop(_: &mut TaskContext<'_>) {}

    #[linkme::distributed_slice(DECLARED_TASKS)]
    fn declare_heartbeat() -> TaskDecl {
        TaskDecl::builder("heartbeat", heartbeat).period("1s").build()
    }

    fn config(pairs: &[(&str, &str)]) -> Config {
        pairs
            .iter()
            .fold(Config::builder(), |builder, (key, value)| {
                builder.set_override(*key, *value).unwrap()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn resolves_placeholders_and_units() {
        let cfg = config(&[
            ("scheduler.tick_hz", "100"),
            ("app.led.period", "500ms"),
        ]);
        let sched = SchedulerBuilder::with_config(ManualClock::new(0), cfg)
            .task(
                TaskDecl::builder("led", noop)
                    .delay("2")
                    .period("${app.led.period}")
                    .time_unit("seconds")
                    .build(),
            )
            .task(TaskDecl::builder("idle", noop).delay("${app.idle.delay:blocked}").build())
            .build::<4>()
            .unwrap();

        assert_eq!(sched.config().tick_hz, 100);
        let led = sched.find("led").unwrap();
        assert_eq!(sched.state(led), Some(TaskState::Delayed(200)));
        assert_eq!(sched.period(led), Some(50));
        let idle = sched.find("idle").unwrap();
        assert_eq!(sched.state(idle), Some(TaskState::Blocked));
    }

    #[test]
    fn short_periods_stay_periodic() {
        use crate::scheduler::Wake;

        let cfg = config(&[("scheduler.tick_hz", "100")]);
        let mut sched = SchedulerBuilder::with_config(ManualClock::new(0), cfg)
            .task(TaskDecl::builder("fast", noop).period("5ms").build())
            .build::<1>()
            .unwrap();
        let fast = sched.find("fast").unwrap();
        assert_eq!(sched.period(fast), Some(1));

        let report = sched.cycle();
        assert_eq!(report.executed, 1);
        assert_eq!(sched.state(fast), Some(TaskState::Delayed(1)));
        assert_eq!(report.wake, Wake::After(1));
    }

    #[test]
    fn disabled_tasks_are_skipped() {
        let cfg = config(&[("app.led.enabled", "false")]);
        let sched = SchedulerBuilder::with_config(ManualClock::new(0), cfg)
            .task(TaskDecl::builder("led", noop).enabled("${app.led.enabled}").build())
            .task(TaskDecl::builder("other", noop).build())
            .build::<4>()
            .unwrap();
        assert_eq!(sched.find("led"), None);
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn bad_declarations_fail_the_build() {
        let bad_duration = SchedulerBuilder::new(ManualClock::new(0))
            .task(TaskDecl::builder("led", noop).period("often").build())
            .build::<2>();
        assert!(matches!(bad_duration, Err(SchedulerError::InvalidDuration(_))));

        let bad_unit = SchedulerBuilder::new(ManualClock::new(0))
            .task(TaskDecl::builder("led", noop).time_unit("fortnights").build())
            .build::<2>();
        assert!(matches!(bad_unit, Err(SchedulerError::InvalidTimeUnit(_))));

        let too_many = SchedulerBuilder::new(ManualClock::new(0))
            .task(TaskDecl::builder("a", noop).build())
            .task(TaskDecl::builder("b", noop).build())
            .build::<1>();
        assert!(matches!(too_many, Err(SchedulerError::CapacityExhausted { .. })));
    }

    #[test]
    fn register_all_collects_declared_tasks() {
        let sched = SchedulerBuilder::new(ManualClock::new(0))
            .register_all()
            .build::<4>()
            .unwrap();
        let id = sched.find("heartbeat").unwrap();
        assert_eq!(sched.period(id), Some(1000));
        assert_eq!(sched.state(id), Some(TaskState::Ready));
    }

    #[test]
    fn custom_sink_receives_diagnostics() {
        use crate::diagnostic::{Diagnostic, NoBoundReason};
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            move |d: Diagnostic| seen.lock().unwrap().push(d)
        };
        let mut sched = SchedulerBuilder::new(ManualClock::new(0))
            .sink(sink)
            .build::<1>()
            .unwrap();
        sched.run_cycle();
        assert_eq!(*seen.lock().unwrap(), vec![Diagnostic::NoBound(NoBoundReason::Idle)]);
    }
}
