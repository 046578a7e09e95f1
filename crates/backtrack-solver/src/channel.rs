//! Step channel between a running search and its consumer.
//!
//! Snapshots flow from the search to the consumer through an unbounded
//! channel, so emitting never blocks the producer. A shared cancellation
//! flag flows the other way and is polled by the search at every recursion
//! boundary.
//!
//! # Example
//!
//! ```
//! use backtrack_solver::channel::step_channel;
//!
//! let (sender, mut receiver) = step_channel::<u32>();
//! sender.emit(1);
//! sender.emit(2);
//!
//! receiver.cancel();
//! assert!(sender.is_cancelled());
//!
//! drop(sender);
//! assert_eq!(receiver.drain(), vec![1, 2]);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Creates a connected sender/receiver pair sharing one cancellation flag.
pub fn step_channel<T>() -> (StepSender<T>, StepReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = CancelHandle::new();

    let sender = StepSender {
        tx,
        cancel: cancel.clone(),
    };
    let receiver = StepReceiver { rx, cancel };

    (sender, receiver)
}

/// Shared cooperative cancellation flag.
///
/// Cloning shares the flag. Once set it stays set for the rest of the
/// search invocation.
#[derive(Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination; the search stops at its next checkpoint.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Debug for CancelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Producer side, owned by the search for its lifetime.
pub struct StepSender<T> {
    tx: UnboundedSender<T>,
    cancel: CancelHandle,
}

impl<T> StepSender<T> {
    /// Pushes a snapshot without blocking.
    ///
    /// Returns false if the consumer has dropped its receiver; the search
    /// keeps going regardless.
    pub fn emit(&self, snapshot: T) -> bool {
        self.tx.send(snapshot).is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

impl<T> Debug for StepSender<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSender")
            .field("closed", &self.tx.is_closed())
            .field("cancel", &self.cancel)
            .finish()
    }
}

/// Consumer side, drained on the consumer's own thread or event loop.
pub struct StepReceiver<T> {
    rx: UnboundedReceiver<T>,
    cancel: CancelHandle,
}

impl<T> StepReceiver<T> {
    /// Tries to receive a pending snapshot without blocking.
    ///
    /// Returns `None` when nothing is queued or the search has finished.
    pub fn try_recv(&mut self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks until the next snapshot arrives.
    ///
    /// Returns `None` once the search has finished and every snapshot has
    /// been received. Must not be called from inside an async runtime.
    pub fn blocking_recv(&mut self) -> Option<T> {
        self.rx.blocking_recv()
    }

    /// Waits for the next snapshot.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Takes every snapshot queued right now.
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(snapshot) = self.try_recv() {
            out.push(snapshot);
        }
        out
    }

    /// Requests cooperative termination of the producing search.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Number of snapshots waiting to be received.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<T> Debug for StepReceiver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepReceiver")
            .field("queued", &self.rx.len())
            .field("cancel", &self.cancel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_preserves_order() {
        let (sender, mut receiver) = step_channel();
        for i in 0..100 {
            assert!(sender.emit(i));
        }
        assert_eq!(receiver.len(), 100);
        assert_eq!(receiver.drain(), (0..100).collect::<Vec<_>>());
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_emit_after_receiver_dropped() {
        let (sender, receiver) = step_channel();
        drop(receiver);
        assert!(!sender.emit(1));
    }

    #[test]
    fn test_blocking_recv_ends_when_sender_dropped() {
        let (sender, mut receiver) = step_channel();
        let producer = std::thread::spawn(move || {
            sender.emit("a");
            sender.emit("b");
        });
        assert_eq!(receiver.blocking_recv(), Some("a"));
        assert_eq!(receiver.blocking_recv(), Some("b"));
        assert_eq!(receiver.blocking_recv(), None);
        producer.join().unwrap();
    }

    #[test]
    fn test_cancel_is_shared() {
        let (sender, receiver) = step_channel::<()>();
        let handle = receiver.cancel_handle();
        assert!(!sender.is_cancelled());
        handle.cancel();
        assert!(sender.is_cancelled());
        assert!(sender.cancel_handle().is_cancelled());
    }
}
