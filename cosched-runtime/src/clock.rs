//! Timestamp sources.

use crate::task::Ticks;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::time::Instant;

/// Monotonic tick counter consumed by the scheduler.
///
/// `now` may wrap at `Ticks::MAX`; the scheduler only ever looks at the
/// wrapping difference between consecutive samples.
pub trait Clock {
    /// Arm the underlying timer. Called once from `Scheduler::init`.
    fn start(&mut self) {}

    /// Current tick count.
    fn now(&mut self) -> Ticks;
}

impl<F> Clock for F
where
    F: FnMut() -> Ticks,
{
    fn now(&mut self) -> Ticks {
        self()
    }
}

/// Clock driven by hand
///
/// Clones share the same counter, so a test or simulation can keep one
/// copy and advance time while the scheduler owns the other.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    ticks: Arc<AtomicU32>,
}

impl ManualClock {
    pub fn new(start: Ticks) -> Self {
        Self {
            ticks: Arc::new(AtomicU32::new(start)),
        }
    }

    /// Move time forward by `ticks`, wrapping at `Ticks::MAX`.
    pub fn advance(&self, ticks: Ticks) {
        self.ticks.fetch_add(ticks, Ordering::SeqCst);
    }

    pub fn set(&self, ticks: Ticks) {
        self.ticks.store(ticks, Ordering::SeqCst);
    }

    pub fn get(&self) -> Ticks {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Ticks {
        self.get()
    }
}

/// Host clock scaled to `tick_hz` ticks per second.
///
/// Backed by `tokio::time::Instant`, so it follows a paused test runtime.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
    tick_hz: u32,
}

impl MonotonicClock {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            origin: Instant::now(),
            tick_hz,
        }
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }
}

impl Clock for MonotonicClock {
    fn start(&mut self) {
        self.origin = Instant::now();
    }

    fn now(&mut self) -> Ticks {
        let nanos = self.origin.elapsed().as_nanos();
        let ticks = nanos * u128::from(self.tick_hz) / 1_000_000_000;
        // Truncation is the wrap of a fixed-width hardware counter.
        ticks as Ticks
    }
}
