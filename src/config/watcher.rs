//! Endpoints file watcher for hot reload.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::endpoints::EndpointStore;
use crate::reload::ReloadHandle;

/// Watches the endpoints file and submits every readable revision.
pub struct EndpointsWatcher {
    store: EndpointStore,
    handle: ReloadHandle,
}

impl EndpointsWatcher {
    pub fn new(store: EndpointStore, handle: ReloadHandle) -> Self {
        Self { store, handle }
    }

    /// Start watching in notify's background thread.
    ///
    /// The parent directory is watched rather than the file itself, since
    /// saves replace the file through a rename. Keep the returned watcher
    /// alive for as long as reloads should happen.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = watch_dir(self.store.path());
        std::fs::create_dir_all(&dir).map_err(notify::Error::io)?;

        let file_name: Option<OsString> = self.store.path().file_name().map(OsString::from);
        let store = self.store.clone();
        let handle = self.handle;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_file = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == file_name.as_deref());
                    if !touches_file {
                        return;
                    }

                    tracing::info!(path = ?store.path(), "Endpoints file change detected, reloading...");
                    match store.load() {
                        Ok(config) => {
                            if handle.blocking_submit(config).is_err() {
                                tracing::warn!("Reload coordinator stopped, ignoring file change");
                            }
                        }
                        Err(e) => {
                            tracing::error!("Failed to reload endpoints: {}. Keeping current routes.", e);
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.store.path(), "Endpoints watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
