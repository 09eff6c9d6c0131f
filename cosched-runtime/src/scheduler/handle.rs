use super::scheduler::{CycleReport, Scheduler, Wake};
use crate::clock::Clock;
use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

/// Handle for a scheduler running on a tokio task
/// Used to stop the loop and take the scheduler back
pub struct SchedulerHandle<C, const N: usize> {
    shutdown: oneshot::Sender<()>,
    join: JoinHandle<Scheduler<C, N>>,
}

impl<C, const N: usize> SchedulerHandle<C, N> {
    /// Stop the loop and return the scheduler with its tasks intact.
    ///
    /// A callback that is running finishes first; callbacks are never
    /// interrupted.
    pub async fn shutdown(self) -> Result<Scheduler<C, N>> {
        // Err only means the loop is already gone; the join reports why.
        let _ = self.shutdown.send(());
        Ok(self.join.await?)
    }
}

impl<C: Clock, const N: usize> Scheduler<C, N> {
    /// Host time to wait after `report` before the next cycle.
    ///
    /// Zero while tasks are still ready; otherwise the reported wake-up (or
    /// `idle_sleep` when there is none), capped at `max_sleep`.
    pub fn sleep_after(&self, report: &CycleReport) -> Duration {
        if report.ready > 0 {
            return Duration::ZERO;
        }
        let config = self.config();
        let ticks = match report.wake {
            Wake::After(ticks) => ticks,
            Wake::Unbounded(_) | Wake::Inconsistent => config.idle_sleep,
        };
        config.ticks_to_duration(ticks.min(config.max_sleep))
    }

    /// Drive cycles until `shutdown` resolves, sleeping on the tokio timer
    /// between them. Returns the scheduler.
    pub async fn run_until<F: Future>(mut self, shutdown: F) -> Self {
        tokio::pin!(shutdown);
        info!(tasks = self.len(), capacity = N, "Scheduler loop started");

        loop {
            let report = self.cycle();
            let pause = self.sleep_after(&report);
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = sleep_or_yield(pause) => {}
            }
        }

        info!(timestamp = self.timestamp(), "Scheduler loop stopped");
        self
    }
}

impl<C, const N: usize> Scheduler<C, N>
where
    C: Clock + Send + 'static,
{
    /// Run the scheduler on a tokio task
    /// Returns a SchedulerHandle that can be used to stop it
    pub fn spawn(self) -> SchedulerHandle<C, N> {
        let (shutdown, stop) = oneshot::channel();
        let join = tokio::spawn(self.run_until(stop));
        SchedulerHandle { shutdown, join }
    }
}

async fn sleep_or_yield(pause: Duration) {
    if pause.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(pause).await;
    }
}
