//! Typing delay — simulated latency before a bot reply is committed.
//!
//! Purely presentational pacing, not a correctness mechanism. The scheduled
//! completion is cancellable so a torn-down conversation can never be
//! mutated after the fact.

use std::time::Duration;

use rand::Rng;
use tokio::sync::oneshot;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// Bounded random delay source.
#[derive(Debug, Clone, Copy)]
pub struct TypingDelay {
    min: Duration,
    max: Duration,
}

impl TypingDelay {
    /// Create a delay source over `[min, max]`. Swaps the bounds if reversed.
    pub fn new(min: Duration, max: Duration) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Draw a duration uniformly from the range.
    pub fn draw(&self) -> Duration {
        rand::thread_rng().gen_range(self.min..=self.max)
    }

    /// Start a timer for a freshly drawn duration.
    pub fn schedule(&self) -> DelayHandle {
        let duration = self.draw();
        debug!(?duration, "Typing delay scheduled");
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(());
        });
        DelayHandle { task, fired: rx }
    }
}

/// A single scheduled delay. Resolves once, or never if cancelled.
#[derive(Debug)]
pub struct DelayHandle {
    task: JoinHandle<()>,
    fired: oneshot::Receiver<()>,
}

impl DelayHandle {
    /// A cancellation handle usable from outside the waiting task.
    pub fn canceller(&self) -> DelayCanceller {
        DelayCanceller {
            task: self.task.abort_handle(),
        }
    }

    /// Wait for the timer. Returns `true` once the drawn duration has
    /// elapsed, `false` if the delay was cancelled first.
    pub async fn elapsed(self) -> bool {
        self.fired.await.is_ok()
    }
}

/// Cancels a pending [`DelayHandle`].
#[derive(Debug)]
pub struct DelayCanceller {
    task: AbortHandle,
}

impl DelayCanceller {
    /// Cancel the pending delay. A cancelled delay never fires.
    pub fn cancel(&self) {
        self.task.abort();
    }
}
