//! The reload worker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::endpoints::Configuration;
use crate::observability::metrics;
use crate::reload::handle::ReloadHandle;
use crate::routing::{RouteTable, SharedRoutes};

/// Pending snapshots the channel holds before producers start waiting.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 10;

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Building,
    Publishing,
}

/// Consumes snapshots in order and publishes a freshly built table for each.
#[derive(Debug)]
pub struct ReloadCoordinator {
    rx: mpsc::Receiver<Configuration>,
    routes: SharedRoutes,
    applied: Arc<AtomicU64>,
    phase: watch::Sender<Phase>,
}

/// Build and publish the initial table, and wire a handle to a coordinator.
///
/// A capacity of zero is raised to one.
pub fn reload_channel(initial: &Configuration, capacity: usize) -> (ReloadHandle, ReloadCoordinator) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let table = RouteTable::build(initial);
    metrics::record_endpoints(initial.len());
    tracing::info!(endpoints = initial.len(), paths = table.len(), "Initial routes built");

    let routes = SharedRoutes::new(table);
    let applied = Arc::new(AtomicU64::new(0));
    let (phase, phase_rx) = watch::channel(Phase::Idle);

    let handle = ReloadHandle::new(tx, routes.clone(), applied.clone(), phase_rx);
    let coordinator = ReloadCoordinator {
        rx,
        routes,
        applied,
        phase,
    };
    (handle, coordinator)
}

impl ReloadCoordinator {
    /// Run until every [`ReloadHandle`] has been dropped.
    pub async fn run(mut self) {
        tracing::info!("Reload coordinator started");
        while let Some(config) = self.rx.recv().await {
            self.apply(config);
        }
        tracing::info!("Reload channel closed, coordinator stopping");
    }

    fn apply(&mut self, config: Configuration) {
        self.enter(Phase::Building);
        let table = RouteTable::build(&config);
        let paths = table.len();
        let shadowed = table.shadowed();

        self.enter(Phase::Publishing);
        let superseded = self.routes.publish(table);
        self.applied.fetch_add(1, Ordering::AcqRel);
        // Old table is freed here unless an in-flight request still holds it.
        drop(superseded);

        self.enter(Phase::Idle);
        metrics::record_reload(config.len());
        tracing::info!(endpoints = config.len(), paths, shadowed, "Routes reloaded");
    }

    fn enter(&mut self, phase: Phase) {
        let from = self.phase.send_replace(phase);
        tracing::trace!(from = ?from, to = ?phase, "Reload phase");
    }
}
