//! Unbuffered handoff channel.
//!
//! `send` resolves only after the receiver has taken the value, so at most
//! one value is ever in flight per channel. Built on a single-slot tokio
//! `mpsc` with a `oneshot` acknowledgement per value.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// The other side of the handoff is gone.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("rendezvous peer dropped")]
pub struct HandoffError;

/// Create a connected sender/receiver pair.
pub fn channel<T>() -> (RendezvousSender<T>, RendezvousReceiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (RendezvousSender { tx }, RendezvousReceiver { rx })
}

/// Sending half. Cloneable; concurrent senders queue behind each other.
#[derive(Debug)]
pub struct RendezvousSender<T> {
    tx: mpsc::Sender<(T, oneshot::Sender<()>)>,
}

impl<T> Clone for RendezvousSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> RendezvousSender<T> {
    /// Hand `value` over, waiting until the receiver has taken it.
    pub async fn send(&self, value: T) -> Result<(), HandoffError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send((value, ack_tx))
            .await
            .map_err(|_| HandoffError)?;
        ack_rx.await.map_err(|_| HandoffError)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half.
#[derive(Debug)]
pub struct RendezvousReceiver<T> {
    rx: mpsc::Receiver<(T, oneshot::Sender<()>)>,
}

impl<T> RendezvousReceiver<T> {
    /// Take the next value, releasing its sender. `None` once every sender
    /// is dropped.
    pub async fn recv(&mut self) -> Option<T> {
        let (value, ack) = self.rx.recv().await?;
        // Sender may have given up waiting; the value is still ours.
        let _ = ack.send(());
        Some(value)
    }
}
