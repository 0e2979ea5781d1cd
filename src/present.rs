//! Hand-off of redraw requests from any thread to the thread that presents frames.
//!
//! A [`PresentQueue`] lives on the presentation thread. [`RedrawRequester`] handles are cloned out to
//! whatever needs a redraw and post fire-and-forget requests; bursts collapse into one pending
//! request until the presentation side calls [`PresentQueue::drain`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Receiving end, owned by the presentation thread.
#[derive(Debug)]
pub struct PresentQueue {
    tx: Sender<()>,
    rx: Receiver<()>,
    pending: Arc<AtomicBool>,
}

/// Cloneable, thread-safe handle that asks for a redraw.
#[derive(Clone, Debug)]
pub struct RedrawRequester {
    tx: Sender<()>,
    pending: Arc<AtomicBool>,
}

impl Default for PresentQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentQueue {
    /// Empty queue with nothing pending.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// New handle that posts to this queue.
    pub fn requester(&self) -> RedrawRequester {
        RedrawRequester {
            tx: self.tx.clone(),
            pending: Arc::clone(&self.pending),
        }
    }

    /// Return `true` if a redraw was requested since the last drain.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consume all queued requests without blocking.
    ///
    /// Returns `true` when at least one request was queued; the caller should redraw once.
    pub fn drain(&self) -> bool {
        let mut requested = false;
        loop {
            match self.rx.try_recv() {
                Ok(()) => requested = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        // A request racing this store re-sends, so it is picked up by the next drain.
        self.pending.store(false, Ordering::Release);
        requested
    }

    /// Block up to `timeout` for a request, then drain.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => {
                self.drain();
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

impl RedrawRequester {
    /// Ask for a redraw. Repeated calls before the next drain are coalesced.
    pub fn request_redraw(&self) {
        if self.pending.swap(true, Ordering::AcqRel) {
            return;
        }
        if self.tx.send(()).is_err() {
            tracing::debug!("redraw requested after presentation queue was dropped");
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/present.rs"]
mod tests;
