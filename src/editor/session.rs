//! The editor's working copy and its handoff to the reload coordinator.

use thiserror::Error;

use crate::endpoints::{Configuration, Endpoint, EndpointDraft, EndpointError, EndpointStore};
use crate::reload::{ReloadHandle, SubmitError};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("no endpoint matches {0}")]
    NotFound(String),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Owns the working Configuration and publishes every change.
#[derive(Debug)]
pub struct Editor {
    config: Configuration,
    store: EndpointStore,
    handle: ReloadHandle,
}

impl Editor {
    pub fn new(config: Configuration, store: EndpointStore, handle: ReloadHandle) -> Self {
        Self {
            config,
            store,
            handle,
        }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        self.config.endpoints()
    }

    /// Validate and append a new endpoint, then publish.
    ///
    /// The working copy only changes once the snapshot is accepted.
    pub async fn add(&mut self, draft: EndpointDraft) -> Result<Endpoint, EditorError> {
        let endpoint = draft.into_endpoint()?;
        let mut next = self.config.clone();
        next.add(endpoint.clone())?;
        self.commit(next).await?;
        tracing::debug!(id = %endpoint.id, method = %endpoint.method, path = %endpoint.path, "Endpoint added");
        Ok(endpoint)
    }

    /// Remove by id or by 1-based position in the list, then publish.
    pub async fn remove(&mut self, selector: &str) -> Result<Endpoint, EditorError> {
        let id = self
            .resolve(selector)
            .ok_or_else(|| EditorError::NotFound(selector.to_string()))?;
        let mut next = self.config.clone();
        let removed = next
            .remove(&id)
            .ok_or_else(|| EditorError::NotFound(selector.to_string()))?;
        self.commit(next).await?;
        tracing::debug!(id = %removed.id, path = %removed.path, "Endpoint removed");
        Ok(removed)
    }

    fn resolve(&self, selector: &str) -> Option<String> {
        let selector = selector.trim();
        if let Some(endpoint) = self.config.get(selector) {
            return Some(endpoint.id.clone());
        }
        let index: usize = selector.parse().ok()?;
        self.config
            .endpoints()
            .get(index.checked_sub(1)?)
            .map(|e| e.id.clone())
    }

    /// Hand `next` to the coordinator, adopt it, then persist it.
    ///
    /// A failed save is logged; the routes are already live by then.
    async fn commit(&mut self, next: Configuration) -> Result<(), SubmitError> {
        self.handle.submit(next.clone()).await?;
        self.config = next;

        let store = self.store.clone();
        let snapshot = self.config.clone();
        match tokio::task::spawn_blocking(move || store.save(&snapshot)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Failed to save endpoints: {}", e),
            Err(e) => tracing::error!("Endpoint save task failed: {}", e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::{reload_channel, DEFAULT_CHANNEL_CAPACITY};

    fn editor(dir: &tempfile::TempDir) -> (Editor, crate::reload::ReloadCoordinator) {
        let store = EndpointStore::new(dir.path().join("endpoints.json"));
        let (handle, coordinator) = reload_channel(&Configuration::new(), DEFAULT_CHANNEL_CAPACITY);
        (Editor::new(Configuration::new(), store, handle), coordinator)
    }

    #[tokio::test]
    async fn test_add_persists_and_submits() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, _coordinator) = editor(&dir);

        let endpoint = editor.add(EndpointDraft::new("get", "ping")).await.unwrap();
        assert_eq!(endpoint.path, "/ping");
        assert_eq!(editor.endpoints().len(), 1);
        assert_eq!(editor.handle.pending(), 1);

        let stored = EndpointStore::new(dir.path().join("endpoints.json")).load().unwrap();
        assert_eq!(stored.endpoints(), editor.endpoints());
    }

    #[tokio::test]
    async fn test_invalid_draft_not_submitted() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, _coordinator) = editor(&dir);

        let err = editor
            .add(EndpointDraft::new("GET", "/x").body("{broken"))
            .await
            .unwrap_err();
        assert!(matches!(err, EditorError::Endpoint(EndpointError::InvalidJson(_))));
        assert!(editor.endpoints().is_empty());
        assert_eq!(editor.handle.pending(), 0);
    }

    #[tokio::test]
    async fn test_remove_by_index_and_id() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, _coordinator) = editor(&dir);

        let a = editor.add(EndpointDraft::new("GET", "/a")).await.unwrap();
        let b = editor.add(EndpointDraft::new("GET", "/b")).await.unwrap();

        let removed = editor.remove("2").await.unwrap();
        assert_eq!(removed.id, b.id);

        let removed = editor.remove(&a.id).await.unwrap();
        assert_eq!(removed.path, "/a");
        assert!(editor.endpoints().is_empty());

        assert!(matches!(
            editor.remove("1").await.unwrap_err(),
            EditorError::NotFound(_)
        ));
        assert_eq!(editor.handle.pending(), 4);
    }

    #[tokio::test]
    async fn test_rejected_submit_leaves_working_copy_and_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let (mut editor, coordinator) = editor(&dir);
        let kept = editor.add(EndpointDraft::new("GET", "/kept")).await.unwrap();
        drop(coordinator);

        let err = editor.add(EndpointDraft::new("GET", "/late")).await.unwrap_err();
        assert!(matches!(err, EditorError::Submit(SubmitError::Closed)));
        let err = editor.remove(&kept.id).await.unwrap_err();
        assert!(matches!(err, EditorError::Submit(SubmitError::Closed)));

        assert_eq!(editor.endpoints().len(), 1);
        assert_eq!(editor.endpoints()[0].id, kept.id);
        let stored = EndpointStore::new(dir.path().join("endpoints.json")).load().unwrap();
        assert_eq!(stored.endpoints(), editor.endpoints());
    }
}
