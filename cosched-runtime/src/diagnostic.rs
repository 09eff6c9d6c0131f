//! Diagnostic reporting for invariant violations seen by the cycle driver.

use tracing::{debug, error, warn};

/// Why a cycle could not bound the next wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoBoundReason {
    /// Nothing is registered.
    Idle,
    /// At least one task is still ready after the pass (e.g. a one-shot
    /// task that never reschedules itself).
    Busy,
    /// Every registered task is blocked.
    Suspended,
}

/// Condition reported by the scheduler. None of them stop the scheduler;
/// what to do about them is up to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The task list links to a vacant slot at `index`. The traversal stops
    /// there for this cycle.
    InvalidTask { index: usize },
    /// No delayed task bounds the next wake-up.
    NoBound(NoBoundReason),
}

/// Receiver for scheduler diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(Diagnostic),
{
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Default sink: log through `tracing` and carry on.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::InvalidTask { index } => {
                error!(index, "Task list links to a vacant slot");
            }
            Diagnostic::NoBound(NoBoundReason::Idle) => {
                debug!("No tasks registered, next wake-up is unbounded");
            }
            Diagnostic::NoBound(reason) => {
                warn!(?reason, "No delayed task bounds the next wake-up");
            }
        }
    }
}
