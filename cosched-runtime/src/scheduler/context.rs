use super::list::Entry;
use crate::error::{Result, SchedulerError};
use crate::task::{TaskFn, TaskId, TaskState, Ticks};
use tracing::debug;

/// Operations a running task may perform on the task list.
pub(crate) trait Control {
    fn insert(&mut self, entry: Entry) -> Result<TaskId>;
    fn remove(&mut self, id: TaskId) -> bool;
    fn state(&self, id: TaskId) -> Option<TaskState>;
    fn set_state(&mut self, id: TaskId, state: TaskState) -> Result<()>;
    fn set_period(&mut self, id: TaskId, period: Ticks) -> Result<()>;
}

/// Execution context handed to a task callback
///
/// Carries the running task's own handle, so the `*_self` operations act on
/// exactly the task being executed. Everything done here is visible to the
/// cycle driver as soon as the callback returns: a task that delays, blocks
/// or removes itself is not re-armed with its period.
pub struct TaskContext<'a> {
    tasks: &'a mut dyn Control,
    id: TaskId,
    timestamp: Ticks,
}

impl<'a> TaskContext<'a> {
    pub(crate) fn new(tasks: &'a mut dyn Control, id: TaskId, timestamp: Ticks) -> Self {
        Self {
            tasks,
            id,
            timestamp,
        }
    }

    /// Handle of the running task.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Timestamp sampled at the start of the current cycle.
    pub fn timestamp(&self) -> Ticks {
        self.timestamp
    }

    /// Register a new task at the tail. It is first considered on the next
    /// cycle.
    pub fn add(&mut self, function: TaskFn, delay: Ticks, period: Ticks) -> Result<TaskId> {
        let id = self.tasks.insert(Entry::new(function, delay, period))?;
        debug!(task = %id, by = %self.id, delay, period, "Task added");
        Ok(id)
    }

    /// Remove any task. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(id);
        if removed {
            debug!(task = %id, by = %self.id, "Task removed");
        }
        removed
    }

    pub fn ready(&mut self, id: TaskId) -> Result<()> {
        self.tasks.set_state(id, TaskState::Ready)
    }

    pub fn delay(&mut self, id: TaskId, delay: Ticks) -> Result<()> {
        self.tasks.set_state(id, TaskState::delayed(delay))
    }

    pub fn block(&mut self, id: TaskId) -> Result<()> {
        self.tasks.set_state(id, TaskState::Blocked)
    }

    pub fn set_period(&mut self, id: TaskId, period: Ticks) -> Result<()> {
        self.tasks.set_period(id, period)
    }

    /// Remove the running task. It will not be re-armed or visited again.
    pub fn remove_self(&mut self) -> bool {
        self.remove(self.id)
    }

    /// Sleep for `delay` ticks instead of the task's period.
    pub fn delay_self(&mut self, delay: Ticks) -> Result<()> {
        self.delay(self.id, delay)
    }

    /// Suspend the running task until someone readies or delays it.
    pub fn block_self(&mut self) -> Result<()> {
        self.block(self.id)
    }

    /// Change the running task's period. Takes effect on this re-arm.
    pub fn set_period_self(&mut self, period: Ticks) -> Result<()> {
        self.set_period(self.id, period)
    }

    pub fn state(&self, id: TaskId) -> Option<TaskState> {
        self.tasks.state(id)
    }

    pub fn is_task(&self, id: TaskId) -> bool {
        self.tasks.state(id).is_some()
    }

    pub fn is_blocked(&self, id: TaskId) -> Result<bool> {
        self.tasks
            .state(id)
            .map(|state| state.is_blocked())
            .ok_or(SchedulerError::InvalidTask(id))
    }
}
