//! Producer side of the handoff channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::endpoints::Configuration;
use crate::reload::coordinator::Phase;
use crate::routing::SharedRoutes;

/// Error returned when a snapshot cannot be enqueued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Only returned by [`ReloadHandle::try_submit`].
    #[error("reload queue is full")]
    Full,

    #[error("reload coordinator has stopped")]
    Closed,
}

/// Cloneable handle used to submit configurations for publication.
#[derive(Debug, Clone)]
pub struct ReloadHandle {
    tx: mpsc::Sender<Configuration>,
    routes: SharedRoutes,
    applied: Arc<AtomicU64>,
    phase: watch::Receiver<Phase>,
}

impl ReloadHandle {
    pub(crate) fn new(
        tx: mpsc::Sender<Configuration>,
        routes: SharedRoutes,
        applied: Arc<AtomicU64>,
        phase: watch::Receiver<Phase>,
    ) -> Self {
        Self {
            tx,
            routes,
            applied,
            phase,
        }
    }

    /// Enqueue a snapshot, waiting while the queue is full.
    pub async fn submit(&self, config: Configuration) -> Result<(), SubmitError> {
        self.tx.send(config).await.map_err(|_| SubmitError::Closed)
    }

    /// Blocking variant for producers running outside the async runtime.
    ///
    /// Panics if called from within an async context, like
    /// [`mpsc::Sender::blocking_send`].
    pub fn blocking_submit(&self, config: Configuration) -> Result<(), SubmitError> {
        self.tx.blocking_send(config).map_err(|_| SubmitError::Closed)
    }

    /// Enqueue a snapshot only if there is room right now.
    pub fn try_submit(&self, config: Configuration) -> Result<(), SubmitError> {
        self.tx.try_send(config).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }

    /// Snapshots queued but not yet picked up by the coordinator.
    pub fn pending(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    /// Number of snapshots published since startup (the initial table excluded).
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Acquire)
    }

    /// What the coordinator is doing right now.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Receiver notified on every phase transition.
    pub fn watch_phase(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    /// The table the dispatcher reads from.
    pub fn routes(&self) -> &SharedRoutes {
        &self.routes
    }
}
