//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the endpoints file and build the first route table
//! - Bind the listener and start the server and reload coordinator
//! - Run the editor, or wait for a signal when headless
//! - Tear everything down in order

use std::net::SocketAddr;

use thiserror::Error;
use tokio::io::BufReader;
use tokio::net::TcpListener;

use crate::config::{EndpointsWatcher, Settings};
use crate::editor::{console, Editor};
use crate::endpoints::{EndpointStore, StoreError};
use crate::http::MockServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::reload::reload_channel;

/// How endpoints get edited while the server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Console editor on stdin/stdout.
    Interactive,
    /// No editor; only the endpoints-file watcher (if enabled) changes routes.
    Headless,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load endpoints: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to watch endpoints file: {0}")]
    Watch(#[from] notify::Error),

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    #[error("console error: {0}")]
    Console(#[source] std::io::Error),
}

/// Run the mock server until the operator quits or a signal arrives.
pub async fn run(settings: Settings, mode: Mode) -> Result<(), StartupError> {
    if settings.observability.metrics_enabled {
        match settings.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!("Failed to start metrics endpoint: {}", e);
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %settings.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = EndpointStore::new(&settings.storage.endpoints_path);
    let initial = store.load()?;
    tracing::info!(path = ?store.path(), endpoints = initial.len(), "Endpoints loaded");

    let (handle, coordinator) = reload_channel(&initial, settings.reload.channel_capacity);

    let listener = TcpListener::bind(&settings.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: settings.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let coordinator_task = tokio::spawn(coordinator.run());
    let server = MockServer::new(&settings, handle.routes().clone());
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let watcher = if settings.reload.watch_file {
        Some(EndpointsWatcher::new(store.clone(), handle.clone()).run()?)
    } else {
        None
    };

    let console_result = match mode {
        Mode::Interactive => {
            let editor = Editor::new(initial, store, handle);
            let stdin = BufReader::new(tokio::io::stdin());
            tokio::select! {
                result = console::run(editor, stdin, tokio::io::stdout()) => result.map(drop),
                _ = signals::wait_for_signal() => Ok(()),
            }
        }
        Mode::Headless => {
            drop(handle);
            tracing::info!("Running headless, press Ctrl+C to stop");
            signals::wait_for_signal().await;
            Ok(())
        }
    };

    shutdown.trigger();
    let server_result = match server_task.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Server task failed: {}", e);
            Ok(())
        }
    };

    // Last handle goes with the watcher; the coordinator then drains and exits.
    drop(watcher);
    if let Err(e) = coordinator_task.await {
        tracing::error!("Reload coordinator failed: {}", e);
    }

    console_result.map_err(StartupError::Console)?;
    server_result.map_err(StartupError::Server)
}
