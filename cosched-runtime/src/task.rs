use crate::scheduler::TaskContext;

/// Unit of the monotonic timestamp source.
///
/// Timestamps wrap at `Ticks::MAX`; elapsed time is always derived with
/// wrapping subtraction, so a wrap between two cycles yields the small
/// positive delta rather than a huge one.
pub type Ticks = u32;

/// Largest delay a cycle can report. Also the value returned when no
/// delayed task bounds the next wake-up.
pub const MAX_DELAY: Ticks = Ticks::MAX - 1;

/// Task callback. The context identifies the running task and exposes the
/// control API, so a task can reschedule itself or its peers.
pub type TaskFn = fn(&mut TaskContext<'_>);

/// Scheduling state of a live task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Runs on the next cycle.
    Ready,
    /// Counting down; the payload is always in `1..Ticks::MAX`.
    Delayed(Ticks),
    /// Suspended until explicitly readied or delayed. Ignored by the
    /// countdown and by the next-wake computation.
    Blocked,
}

impl TaskState {
    /// State for a task that should wait `ticks` before running.
    ///
    /// `0` is `Ready` and `Ticks::MAX` is `Blocked`, matching the classic
    /// single-integer encoding (0 / countdown / sentinel).
    pub fn delayed(ticks: Ticks) -> Self {
        match ticks {
            0 => TaskState::Ready,
            Ticks::MAX => TaskState::Blocked,
            t => TaskState::Delayed(t),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TaskState::Ready)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, TaskState::Blocked)
    }

    /// Remaining ticks if the task is counting down.
    pub fn time_left(&self) -> Option<Ticks> {
        match self {
            TaskState::Delayed(t) => Some(*t),
            _ => None,
        }
    }

    /// Advance a countdown by `elapsed` ticks, flooring at `Ready`.
    pub(crate) fn count_down(self, elapsed: Ticks) -> Self {
        match self {
            TaskState::Delayed(t) if t > elapsed => TaskState::Delayed(t - elapsed),
            TaskState::Delayed(_) => TaskState::Ready,
            other => other,
        }
    }
}

/// Handle to a registered task.
///
/// Handles are generational: once a task is removed its handle stops
/// resolving, even if the slot is later reused by another task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl TaskId {
    /// Slot index inside the scheduler's task storage.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task#{}.{}", self.index, self.generation)
    }
}

/// Declared task, as produced by `#[task]` or assembled by hand
///
/// Every field except `handler` is a string so it can carry config
/// placeholders (`${app.led.period:500ms}`); they are resolved when the
/// scheduler is built.
#[derive(Debug, Clone)]
pub struct TaskDecl {
    pub name: &'static str,
    pub delay: &'static str,
    pub period: &'static str,
    pub enabled: &'static str,
    pub time_unit: &'static str,
    pub handler: TaskFn,
}

impl TaskDecl {
    /// Create a new builder for TaskDecl
    pub fn builder(name: &'static str, handler: TaskFn) -> TaskDeclBuilder {
        TaskDeclBuilder {
            name,
            delay: "0",
            period: "0",
            enabled: "true",
            time_unit: "ticks",
            handler,
        }
    }
}

/// Builder for TaskDecl
pub struct TaskDeclBuilder {
    name: &'static str,
    delay: &'static str,
    period: &'static str,
    enabled: &'static str,
    time_unit: &'static str,
    handler: TaskFn,
}

impl TaskDeclBuilder {
    pub fn delay(mut self, delay: &'static str) -> Self {
        self.delay = delay;
        self
    }

    pub fn period(mut self, period: &'static str) -> Self {
        self.period = period;
        self
    }

    pub fn enabled(mut self, enabled: &'static str) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn time_unit(mut self, time_unit: &'static str) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn build(self) -> TaskDecl {
        TaskDecl {
            name: self.name,
            delay: self.delay,
            period: self.period,
            enabled: self.enabled,
            time_unit: self.time_unit,
            handler: self.handler,
        }
    }
}
