//! Play outcomes.
//!
//! A play attempt terminates in exactly one of two states, delivered through
//! an [`OutcomeHandle`]: a clonable cell that settles once and can be either
//! polled (`outcome()`) from the host loop or awaited as a `Future`.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// Terminal state of a play attempt. Cancellation is a defined outcome, not
/// a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every entry reported finished.
    Finished,
    /// The run was cancelled; started entries were rolled back.
    Cancelled,
}

#[derive(Debug, Default)]
struct Shared {
    outcome: Option<PlayOutcome>,
    waker: Option<Waker>,
}

/// Handle to a play attempt's single terminal resolution.
#[derive(Debug, Clone, Default)]
pub struct OutcomeHandle {
    shared: Arc<Mutex<Shared>>,
}

impl OutcomeHandle {
    pub(crate) fn pending() -> Self {
        Self::default()
    }

    /// Settle the handle. Later calls are ignored; the first resolution
    /// wins.
    pub(crate) fn resolve(&self, outcome: PlayOutcome) {
        if let Ok(mut shared) = self.shared.lock() {
            if shared.outcome.is_none() {
                shared.outcome = Some(outcome);
                if let Some(waker) = shared.waker.take() {
                    waker.wake();
                }
            }
        }
    }

    /// The terminal outcome, or `None` while the run is still in flight.
    pub fn outcome(&self) -> Option<PlayOutcome> {
        self.shared.lock().ok().and_then(|shared| shared.outcome)
    }

    pub fn is_settled(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Future for OutcomeHandle {
    type Output = PlayOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Ok(mut shared) = self.shared.lock() {
            if let Some(outcome) = shared.outcome {
                return Poll::Ready(outcome);
            }
            shared.waker = Some(cx.waker().clone());
        }
        Poll::Pending
    }
}
