//! Cancellation for in-flight evaluations
//!
//! A token moves from active to exactly one of cancelled or committed. The gate
//! commits before it applies any side effect, so once `cancel` has returned
//! `true` no redirect can follow.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::watch;

const ACTIVE: u8 = 0;
const CANCELLED: u8 = 1;
const COMMITTED: u8 = 2;

/// Handle used to abandon a single evaluation
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: AtomicU8,
    signal: watch::Sender<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                state: AtomicU8::new(ACTIVE),
                signal,
            }),
        }
    }

    /// Abandon the evaluation.
    ///
    /// Returns `false` when the evaluation already committed to its decision,
    /// in which case its side effects have been or are being applied.
    pub fn cancel(&self) -> bool {
        match self.inner.state.compare_exchange(
            ACTIVE,
            CANCELLED,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                self.inner.signal.send_replace(true);
                true
            }
            Err(state) => state == CANCELLED,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == CANCELLED
    }

    pub fn is_committed(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == COMMITTED
    }

    /// Claim the right to apply side effects. Fails if cancelled first.
    pub(crate) fn commit(&self) -> bool {
        match self.inner.state.compare_exchange(
            ACTIVE,
            COMMITTED,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => true,
            Err(state) => state == COMMITTED,
        }
    }

    /// Resolves once the token is cancelled; never resolves after a commit
    pub async fn cancelled(&self) {
        let mut rx = self.inner.signal.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
