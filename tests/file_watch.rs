//! Headless editing: changes to the endpoints file are picked up.

use std::time::Duration;

use mocksmith::config::EndpointsWatcher;
use mocksmith::endpoints::EndpointStore;
use mocksmith::reload::{reload_channel, DEFAULT_CHANNEL_CAPACITY};

mod common;

use common::{config, endpoint};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_file_change_reloads_routes() {
    let dir = tempfile::tempdir().unwrap();
    let store = EndpointStore::new(dir.path().join("data").join("endpoints.json"));
    store.save(&config(vec![endpoint("GET", "/before", 200, "{}")])).unwrap();

    let initial = store.load().unwrap();
    let (handle, coordinator) = reload_channel(&initial, DEFAULT_CHANNEL_CAPACITY);
    tokio::spawn(coordinator.run());
    assert!(handle.routes().resolve("/before").is_some());

    let _watcher = EndpointsWatcher::new(store.clone(), handle.clone()).run().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    store.save(&config(vec![endpoint("GET", "/after", 200, "{}")])).unwrap();

    let routes = handle.routes().clone();
    tokio::time::timeout(Duration::from_secs(10), async {
        while routes.resolve("/after").is_none() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("file change was not reloaded");

    assert!(routes.resolve("/before").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unparseable_file_keeps_current_routes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("endpoints.json");
    let store = EndpointStore::new(&path);
    store.save(&config(vec![endpoint("GET", "/kept", 200, "{}")])).unwrap();

    let (handle, coordinator) = reload_channel(&store.load().unwrap(), DEFAULT_CHANNEL_CAPACITY);
    tokio::spawn(coordinator.run());

    let _watcher = EndpointsWatcher::new(store.clone(), handle.clone()).run().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    std::fs::write(&path, "{ not json").unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(handle.applied(), 0);
    assert!(handle.routes().resolve("/kept").is_some());
}
