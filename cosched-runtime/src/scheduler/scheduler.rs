use super::context::{Control, TaskContext};
use super::list::{Entry, TaskList};
use crate::clock::Clock;
use crate::config::SchedulerConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink, NoBoundReason, TracingSink};
use crate::error::{Result, SchedulerError};
use crate::task::{TaskFn, TaskId, TaskState, Ticks, MAX_DELAY};
use tracing::{debug, info, trace};

/// When the caller should run the next cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// After at most this many ticks.
    After(Ticks),
    /// No delayed task bounds the wait.
    Unbounded(NoBoundReason),
    /// The walk stopped at a broken link before reaching any delayed task,
    /// so the bound over the whole list is unknown.
    Inconsistent,
}

/// Outcome of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Timestamp sampled at the start of the cycle.
    pub timestamp: Ticks,
    /// Ticks since the previous cycle.
    pub elapsed: Ticks,
    /// Callbacks run during the cycle.
    pub executed: usize,
    /// Tasks left ready when the cycle finished.
    pub ready: usize,
    pub wake: Wake,
}

impl CycleReport {
    /// Recommended sleep in ticks; `MAX_DELAY` when unbounded.
    pub fn next_wake(&self) -> Ticks {
        match self.wake {
            Wake::After(ticks) => ticks,
            Wake::Unbounded(_) | Wake::Inconsistent => MAX_DELAY,
        }
    }
}

/// Cooperative scheduler over at most `N` tasks
///
/// Tasks run in registration order, one cycle at a time, on the caller's
/// thread. Each cycle returns how long the caller may sleep before a
/// delayed task becomes due.
pub struct Scheduler<C, const N: usize> {
    tasks: TaskList<N>,
    clock: C,
    sink: Box<dyn DiagnosticSink + Send>,
    config: SchedulerConfig,
    timestamp: Ticks,
    previous_timestamp: Ticks,
}

impl<C: Clock, const N: usize> Scheduler<C, N> {
    /// Create a scheduler reporting diagnostics through `tracing`.
    ///
    /// Call [`Scheduler::init`] before the first cycle.
    pub fn new(clock: C) -> Self {
        Self {
            tasks: TaskList::new(),
            clock,
            sink: Box::new(TracingSink),
            config: SchedulerConfig::default(),
            timestamp: 0,
            previous_timestamp: 0,
        }
    }

    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: DiagnosticSink + Send + 'static,
    {
        self.sink = Box::new(sink);
        self
    }

    pub(crate) fn replace_sink(&mut self, sink: Box<dyn DiagnosticSink + Send>) {
        self.sink = sink;
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Clear the task list, start the clock and prime the elapsed-time
    /// baseline so the first cycle sees only time passed since now.
    pub fn init(&mut self) {
        self.tasks.reset();
        self.clock.start();
        let now = self.clock.now();
        self.timestamp = now;
        self.previous_timestamp = now;
        info!(capacity = N, timestamp = now, "Scheduler initialised");
    }

    /// Run one cycle and return the recommended sleep in ticks.
    pub fn run_cycle(&mut self) -> Ticks {
        self.cycle().next_wake()
    }

    /// Run one cycle: count down delayed tasks, run the ready ones in
    /// registration order and work out the next wake-up.
    ///
    /// The traversal order is fixed before any callback runs. Tasks removed
    /// by an earlier callback are skipped; tasks added during the cycle are
    /// first visited on the next one. If a callback changed another task,
    /// the wake-up is recomputed over the whole list afterwards.
    pub fn cycle(&mut self) -> CycleReport {
        let now = self.clock.now();
        let elapsed = now.wrapping_sub(self.previous_timestamp);
        self.previous_timestamp = now;
        self.timestamp = now;

        let mut order = [None; N];
        let snapshot = self.tasks.snapshot(&mut order);
        let broken = snapshot.broken_at.is_some();
        if let Some(index) = snapshot.broken_at {
            self.sink.report(Diagnostic::InvalidTask { index });
        }
        self.tasks.clear_touched();

        let mut min_delay: Option<Ticks> = None;
        let mut executed = 0;
        let mut ready = 0;

        for id in order[..snapshot.len].iter().flatten().copied() {
            let Some(state) = self.tasks.state(id) else {
                continue;
            };
            if state.is_blocked() {
                continue;
            }

            let state = state.count_down(elapsed);
            if let Some(entry) = self.tasks.get_mut(id) {
                entry.state = state;
            }

            if state.is_ready() {
                self.dispatch(id);
                executed += 1;
            }

            match self.tasks.state(id) {
                Some(TaskState::Delayed(left)) => {
                    min_delay = Some(min_delay.map_or(left, |min| min.min(left)));
                }
                Some(TaskState::Ready) => ready += 1,
                _ => {}
            }
        }

        if self.tasks.touched() {
            trace!("Task list changed behind the cursor, rescanning");
            (min_delay, ready) = self.scan();
        }

        let wake = match min_delay {
            Some(ticks) => Wake::After(ticks),
            // unreached tasks may be delayed or blocked; don't classify
            None if broken => Wake::Inconsistent,
            None => {
                let reason = if self.tasks.len() == 0 {
                    NoBoundReason::Idle
                } else if ready > 0 {
                    NoBoundReason::Busy
                } else {
                    NoBoundReason::Suspended
                };
                self.sink.report(Diagnostic::NoBound(reason));
                Wake::Unbounded(reason)
            }
        };

        trace!(timestamp = now, elapsed, executed, ready, ?wake, "Cycle complete");

        CycleReport {
            timestamp: now,
            elapsed,
            executed,
            ready,
            wake,
        }
    }

    /// Run one callback with `id` as the current task, then re-arm it if it
    /// is still ready and periodic.
    fn dispatch(&mut self, id: TaskId) {
        let Some(function) = self.tasks.get(id).map(|entry| entry.function) else {
            return;
        };

        self.tasks.set_current(Some(id));
        function(&mut TaskContext::new(&mut self.tasks, id, self.timestamp));
        self.tasks.set_current(None);

        if let Some(entry) = self.tasks.get_mut(id) {
            if entry.state.is_ready() && entry.period > 0 {
                entry.state = TaskState::delayed(entry.period);
            }
        }
    }

    /// Minimum pending delay and ready count over the whole list.
    fn scan(&self) -> (Option<Ticks>, usize) {
        self.tasks
            .iter()
            .fold((None, 0), |(min, ready), (_, entry)| match entry.state {
                TaskState::Delayed(left) => (Some(min.map_or(left, |m: Ticks| m.min(left))), ready),
                TaskState::Ready => (min, ready + 1),
                TaskState::Blocked => (min, ready),
            })
    }

    /// Register a task at the tail of the list.
    ///
    /// `delay` of 0 makes it ready for the next cycle and `Ticks::MAX`
    /// registers it blocked. `period` of 0 means it is not re-armed.
    pub fn add(&mut self, function: TaskFn, delay: Ticks, period: Ticks) -> Result<TaskId> {
        let id = self.tasks.insert(Entry::new(function, delay, period))?;
        debug!(task = %id, delay, period, "Task added");
        Ok(id)
    }

    /// Register a task carrying a name for logs and lookups.
    pub fn add_named(
        &mut self,
        name: &'static str,
        function: TaskFn,
        delay: Ticks,
        period: Ticks,
    ) -> Result<TaskId> {
        let id = self.tasks.insert(Entry {
            name: Some(name),
            ..Entry::new(function, delay, period)
        })?;
        debug!(task = %id, name, delay, period, "Task added");
        Ok(id)
    }

    /// Unlink a task. Returns `false` if it was already removed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(id);
        if removed {
            debug!(task = %id, "Task removed");
        }
        removed
    }

    /// Force the task to run on the next cycle.
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

    pub fn state(&self, id: TaskId) -> Option<TaskState> {
        self.tasks.state(id)
    }

    pub fn period(&self, id: TaskId) -> Option<Ticks> {
        self.tasks.get(id).map(|entry| entry.period)
    }

    pub fn name(&self, id: TaskId) -> Option<&'static str> {
        self.tasks.get(id).and_then(|entry| entry.name)
    }

    /// First live task registered under `name`.
    pub fn find(&self, name: &str) -> Option<TaskId> {
        self.tasks
            .iter()
            .find(|(_, entry)| entry.name == Some(name))
            .map(|(id, _)| id)
    }

    /// Whether `id` refers to a live task.
    pub fn is_task(&self, id: TaskId) -> bool {
        self.tasks.get(id).is_some()
    }

    pub fn is_blocked(&self, id: TaskId) -> Result<bool> {
        self.tasks
            .state(id)
            .map(|state| state.is_blocked())
            .ok_or(SchedulerError::InvalidTask(id))
    }

    /// Live tasks in registration (and execution) order.
    pub fn tasks(&self) -> impl Iterator<Item = (TaskId, TaskState)> + '_ {
        self.tasks.iter().map(|(id, entry)| (id, entry.state))
    }

    /// Timestamp sampled by the last cycle.
    pub fn timestamp(&self) -> Ticks {
        self.timestamp
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.len() == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    #[cfg(test)]
    pub(crate) fn task_list_mut(&mut self) -> &mut TaskList<N> {
        &mut self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::{Cell, RefCell};
    use std::sync::{Arc, Mutex};

    thread_local! {
        static LOG: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
        static PEER: Cell<Option<TaskId>> = const { Cell::new(None) };
    }

    fn log(name: &'static str) {
        LOG.with(|log| log.borrow_mut().push(name));
    }

    fn take_log() -> Vec<&'static str> {
        LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
    }

    fn peer() -> TaskId {
        PEER.with(|p| p.get()).expect("peer handle set by the test")
    }

    fn task_a(_: &mut TaskContext<'_>) {
        log("a");
    }

    fn task_b(_: &mut TaskContext<'_>) {
        log("b");
    }

    fn task_c(_: &mut TaskContext<'_>) {
        log("c");
    }

    type Recorded = Arc<Mutex<Vec<Diagnostic>>>;

    fn scheduler<const N: usize>(start: Ticks) -> (Scheduler<ManualClock, N>, ManualClock, Recorded) {
        let clock = ManualClock::new(start);
        let recorded: Recorded = Arc::default();
        let sink = {
            let recorded = recorded.clone();
            move |d: Diagnostic| recorded.lock().unwrap().push(d)
        };
        let mut sched = Scheduler::new(clock.clone()).with_sink(sink);
        sched.init();
        (sched, clock, recorded)
    }

    #[test]
    fn mixed_schedule_first_cycle() {
        let (mut sched, _clock, _) = scheduler::<4>(0);
        let a = sched.add(task_a, 0, 10).unwrap();
        let b = sched.add(task_b, 5, 0).unwrap();
        let c = sched.add(task_c, Ticks::MAX, 0).unwrap();

        assert_eq!(sched.run_cycle(), 5);
        assert_eq!(take_log(), vec!["a"]);
        assert_eq!(sched.state(a), Some(TaskState::Delayed(10)));
        assert_eq!(sched.state(b), Some(TaskState::Delayed(5)));
        assert_eq!(sched.state(c), Some(TaskState::Blocked));
    }

    #[test]
    fn returns_smallest_pending_delay() {
        let (mut sched, _clock, _) = scheduler::<4>(0);
        sched.add(task_a, 5, 0).unwrap();
        sched.add(task_b, 12, 0).unwrap();
        sched.add(task_c, 3, 0).unwrap();
        assert_eq!(sched.run_cycle(), 3);
        assert!(take_log().is_empty());
    }

    #[test]
    fn runs_in_registration_order_every_cycle() {
        let (mut sched, clock, _) = scheduler::<4>(0);
        sched.add(task_c, 0, 1).unwrap();
        sched.add(task_a, 0, 1).unwrap();
        sched.add(task_b, 0, 1).unwrap();

        for _ in 0..3 {
            sched.run_cycle();
            clock.advance(1);
        }
        assert_eq!(take_log(), vec!["c", "a", "b", "c", "a", "b", "c", "a", "b"]);
    }

    #[test]
    fn countdown_spans_cycles_and_fires_once() {
        let (mut sched, clock, _) = scheduler::<2>(0);
        let a = sched.add(task_a, 10, 0).unwrap();

        clock.advance(4);
        assert_eq!(sched.run_cycle(), 6);
        clock.advance(4);
        assert_eq!(sched.run_cycle(), 2);
        assert!(take_log().is_empty());

        clock.advance(7);
        let report = sched.cycle();
        assert_eq!(report.executed, 1);
        assert_eq!(take_log(), vec!["a"]);
        // one-shot task with no period stays ready
        assert_eq!(sched.state(a), Some(TaskState::Ready));
        assert_eq!(report.wake, Wake::Unbounded(NoBoundReason::Busy));
    }

    #[test]
    fn periodic_task_rearms_each_period() {
        let (mut sched, clock, _) = scheduler::<2>(0);
        sched.add(task_a, 0, 3).unwrap();

        for _ in 0..=9 {
            sched.run_cycle();
            clock.advance(1);
        }
        assert_eq!(take_log().len(), 4);
    }

    #[test]
    fn large_elapsed_runs_a_periodic_task_once() {
        let (mut sched, clock, _) = scheduler::<2>(0);
        let a = sched.add(task_a, 0, 3).unwrap();
        sched.run_cycle();
        clock.advance(100);
        assert_eq!(sched.run_cycle(), 3);
        assert_eq!(take_log(), vec!["a", "a"]);
        assert_eq!(sched.state(a), Some(TaskState::Delayed(3)));
    }

    #[test]
    fn blocked_tasks_never_run_or_bound_the_wake() {
        let (mut sched, clock, recorded) = scheduler::<3>(0);
        let a = sched.add(task_a, 0, 0).unwrap();
        sched.block(a).unwrap();
        sched.add(task_b, 7, 0).unwrap();

        clock.advance(2);
        assert_eq!(sched.run_cycle(), 5);
        clock.advance(1_000_000);
        sched.run_cycle();
        assert_eq!(take_log(), vec!["b"]);
        assert!(sched.is_blocked(a).unwrap());

        sched.ready(a).unwrap();
        sched.run_cycle();
        assert_eq!(take_log(), vec!["a", "b"]);
        assert!(recorded
            .lock()
            .unwrap()
            .contains(&Diagnostic::NoBound(NoBoundReason::Busy)));
    }

    #[test]
    fn only_blocked_tasks_is_reported_as_suspended() {
        let (mut sched, _clock, recorded) = scheduler::<2>(0);
        sched.add(task_a, Ticks::MAX, 0).unwrap();
        let report = sched.cycle();
        assert_eq!(report.wake, Wake::Unbounded(NoBoundReason::Suspended));
        assert_eq!(report.next_wake(), MAX_DELAY);
        assert_eq!(
            *recorded.lock().unwrap(),
            vec![Diagnostic::NoBound(NoBoundReason::Suspended)]
        );
    }

    #[test]
    fn empty_schedule_is_reported_as_idle() {
        let (mut sched, _clock, recorded) = scheduler::<2>(0);
        assert_eq!(sched.run_cycle(), MAX_DELAY);
        assert_eq!(
            *recorded.lock().unwrap(),
            vec![Diagnostic::NoBound(NoBoundReason::Idle)]
        );
    }

    #[test]
    fn removing_twice_is_a_no_op() {
        let (mut sched, _clock, _) = scheduler::<2>(0);
        let a = sched.add(task_a, 0, 0).unwrap();
        assert!(sched.remove(a));
        assert!(!sched.remove(a));
        assert!(!sched.is_task(a));
        assert!(sched.is_empty());
    }

    #[test]
    fn control_on_removed_task_is_rejected() {
        let (mut sched, _clock, _) = scheduler::<2>(0);
        let a = sched.add(task_a, 0, 0).unwrap();
        sched.remove(a);
        assert!(matches!(sched.ready(a), Err(SchedulerError::InvalidTask(id)) if id == a));
        assert!(sched.delay(a, 4).is_err());
        assert!(sched.block(a).is_err());
        assert!(sched.set_period(a, 4).is_err());
        assert!(sched.is_blocked(a).is_err());
    }

    #[test]
    fn capacity_is_enforced() {
        let (mut sched, _clock, _) = scheduler::<1>(0);
        sched.add(task_a, 0, 0).unwrap();
        assert!(matches!(
            sched.add(task_b, 0, 0),
            Err(SchedulerError::CapacityExhausted { capacity: 1 })
        ));
        assert_eq!(sched.capacity(), 1);
    }

    fn removes_itself(ctx: &mut TaskContext<'_>) {
        log("once");
        assert!(ctx.remove_self());
    }

    #[test]
    fn self_removal_is_not_rearmed() {
        let (mut sched, clock, _) = scheduler::<2>(0);
        let once = sched.add(removes_itself, 0, 5).unwrap();
        sched.add(task_b, 0, 5).unwrap();

        assert_eq!(sched.run_cycle(), 5);
        assert!(!sched.is_task(once));
        clock.advance(5);
        sched.run_cycle();
        assert_eq!(take_log(), vec!["once", "b", "b"]);
        assert_eq!(sched.len(), 1);
    }

    fn delays_itself(ctx: &mut TaskContext<'_>) {
        log("delay");
        ctx.delay_self(3).unwrap();
    }

    fn blocks_itself(ctx: &mut TaskContext<'_>) {
        log("block");
        ctx.block_self().unwrap();
    }

    #[test]
    fn self_delay_and_block_override_the_period() {
        let (mut sched, _clock, _) = scheduler::<2>(0);
        let d = sched.add(delays_itself, 0, 10).unwrap();
        let b = sched.add(blocks_itself, 0, 10).unwrap();

        assert_eq!(sched.run_cycle(), 3);
        assert_eq!(sched.state(d), Some(TaskState::Delayed(3)));
        assert_eq!(sched.state(b), Some(TaskState::Blocked));
        assert_eq!(take_log(), vec!["delay", "block"]);
    }

    fn stretches_own_period(ctx: &mut TaskContext<'_>) {
        ctx.set_period_self(40).unwrap();
    }

    #[test]
    fn period_changes_apply_on_rearm() {
        let (mut sched, _clock, _) = scheduler::<2>(0);
        let s = sched.add(stretches_own_period, 0, 10).unwrap();
        assert_eq!(sched.run_cycle(), 40);
        assert_eq!(sched.period(s), Some(40));

        let a = sched.add(task_a, 0, 10).unwrap();
        sched.set_period(a, 0).unwrap();
        sched.run_cycle();
        assert_eq!(sched.state(a), Some(TaskState::Ready));
    }

    fn readies_peer(ctx: &mut TaskContext<'_>) {
        log("waker");
        ctx.ready(peer()).unwrap();
        ctx.block_self().unwrap();
    }

    #[test]
    fn readying_a_later_task_runs_it_in_the_same_cycle() {
        let (mut sched, _clock, _) = scheduler::<2>(0);
        sched.add(readies_peer, 0, 0).unwrap();
        let b = sched.add(task_b, Ticks::MAX, 0).unwrap();
        PEER.with(|p| p.set(Some(b)));

        sched.run_cycle();
        assert_eq!(take_log(), vec!["waker", "b"]);
    }

    fn delays_peer(ctx: &mut TaskContext<'_>) {
        ctx.delay(peer(), 2).unwrap();
    }

    #[test]
    fn changes_behind_the_cursor_still_bound_the_wake() {
        let (mut sched, _clock, _) = scheduler::<2>(0);
        let a = sched.add(task_a, 50, 0).unwrap();
        sched.add(delays_peer, 0, 20).unwrap();
        PEER.with(|p| p.set(Some(a)));

        assert_eq!(sched.run_cycle(), 2);
        assert_eq!(sched.state(a), Some(TaskState::Delayed(2)));
    }

    fn removes_peer(ctx: &mut TaskContext<'_>) {
        log("remover");
        assert!(ctx.remove(peer()));
        ctx.block_self().unwrap();
    }

    #[test]
    fn removing_an_unvisited_task_skips_it() {
        let (mut sched, _clock, _) = scheduler::<3>(0);
        sched.add(removes_peer, 0, 0).unwrap();
        let b = sched.add(task_b, 0, 0).unwrap();
        sched.add(task_c, 0, 4).unwrap();
        PEER.with(|p| p.set(Some(b)));

        assert_eq!(sched.run_cycle(), 4);
        assert_eq!(take_log(), vec!["remover", "c"]);
        assert_eq!(sched.len(), 2);
    }

    fn spawns_task(ctx: &mut TaskContext<'_>) {
        log("spawner");
        let id = ctx.add(task_a, 0, 6).unwrap();
        PEER.with(|p| p.set(Some(id)));
        ctx.delay_self(30).unwrap();
    }

    #[test]
    fn tasks_added_mid_cycle_run_next_cycle() {
        let (mut sched, _clock, _) = scheduler::<3>(0);
        sched.add(spawns_task, 0, 0).unwrap();

        let report = sched.cycle();
        assert_eq!(take_log(), vec!["spawner"]);
        assert_eq!(report.ready, 1);
        assert_eq!(report.wake, Wake::After(30));

        assert_eq!(sched.run_cycle(), 6);
        assert_eq!(take_log(), vec!["a"]);
        assert_eq!(sched.state(peer()), Some(TaskState::Delayed(6)));
    }

    #[test]
    fn elapsed_time_survives_timestamp_wrap() {
        let (mut sched, clock, _) = scheduler::<2>(Ticks::MAX - 2);
        let a = sched.add(task_a, 10, 0).unwrap();

        clock.advance(5);
        let report = sched.cycle();
        assert_eq!(report.elapsed, 5);
        assert_eq!(report.timestamp, 2);
        assert_eq!(sched.timestamp(), 2);
        assert_eq!(sched.state(a), Some(TaskState::Delayed(5)));
    }

    #[test]
    fn broken_link_is_reported() {
        let (mut sched, _clock, recorded) = scheduler::<3>(0);
        sched.add(task_a, 0, 5).unwrap();
        let b = sched.add(task_b, 0, 5).unwrap();
        sched.add(task_c, 0, 5).unwrap();
        sched.task_list_mut().vacate_without_unlinking(b);

        assert_eq!(sched.run_cycle(), 5);
        assert_eq!(take_log(), vec!["a"]);
        assert_eq!(
            recorded.lock().unwrap().first(),
            Some(&Diagnostic::InvalidTask { index: b.index() })
        );
    }

    #[test]
    fn broken_head_leaves_the_wake_unclassified() {
        let (mut sched, _clock, recorded) = scheduler::<2>(0);
        let a = sched.add(task_a, 5, 0).unwrap();
        sched.add(task_b, 7, 0).unwrap();
        sched.task_list_mut().vacate_without_unlinking(a);

        let report = sched.cycle();
        assert_eq!(report.wake, Wake::Inconsistent);
        assert_eq!(report.next_wake(), MAX_DELAY);
        assert_eq!(report.executed, 0);
        assert_eq!(
            *recorded.lock().unwrap(),
            vec![Diagnostic::InvalidTask { index: a.index() }]
        );
    }

    #[test]
    fn init_clears_tasks_and_rebases_the_clock() {
        let (mut sched, clock, _) = scheduler::<2>(0);
        let a = sched.add_named("blink", task_a, 5, 0).unwrap();
        assert_eq!(sched.find("blink"), Some(a));
        assert_eq!(sched.name(a), Some("blink"));

        clock.set(1_000);
        sched.init();
        assert!(!sched.is_task(a));
        assert_eq!(sched.find("blink"), None);
        assert_eq!(sched.timestamp(), 1_000);
        assert_eq!(sched.cycle().elapsed, 0);
    }

    #[test]
    fn tasks_lists_live_tasks_in_order() {
        let (mut sched, _clock, _) = scheduler::<3>(0);
        let a = sched.add(task_a, 0, 0).unwrap();
        let b = sched.add(task_b, 4, 0).unwrap();
        let c = sched.add(task_c, Ticks::MAX, 0).unwrap();
        sched.remove(b);
        let listed: Vec<_> = sched.tasks().collect();
        assert_eq!(listed, vec![(a, TaskState::Ready), (c, TaskState::Blocked)]);
    }
}
