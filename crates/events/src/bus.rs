//! Publish/subscribe abstraction (mechanics only).
//!
//! The bus distributes notifications; it stores nothing. A subscriber that misses
//! a message recovers by re-fetching from the inventory service, which is the
//! source of truth, so delivery is best-effort and subscribers must tolerate
//! duplicates.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a bus. Each subscription receives its own copy of every
/// message published after it was created.
///
/// Meant to be drained by a single owner (typically one screen).
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Take everything queued right now without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Transport-agnostic pub/sub with broadcast semantics.
///
/// `publish()` can fail; the caller decides whether that matters. For catalog
/// refresh notifications it usually does not, because the next explicit refresh
/// picks up the change anyway.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
