//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use mocksmith::config::Settings;
use mocksmith::endpoints::{Configuration, Endpoint, EndpointDraft};
use mocksmith::http::MockServer;
use mocksmith::lifecycle::Shutdown;
use mocksmith::reload::{reload_channel, ReloadHandle, DEFAULT_CHANNEL_CAPACITY};
use tokio::net::TcpListener;

/// A mock server bound to an ephemeral port, stopped on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    pub handle: ReloadHandle,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a configuration and wait until it is published.
    pub async fn reload(&self, config: Configuration) {
        let target = self.handle.applied() + 1;
        self.handle.submit(config).await.unwrap();
        wait_applied(&self.handle, target).await;
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start(config: Configuration) -> TestServer {
    let (handle, coordinator) = reload_channel(&config, DEFAULT_CHANNEL_CAPACITY);
    tokio::spawn(coordinator.run());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = MockServer::new(&Settings::default(), handle.routes().clone());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        handle,
        client,
        shutdown,
    }
}

pub async fn wait_applied(handle: &ReloadHandle, expected: u64) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while handle.applied() < expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("configuration was not published in time");
}

pub fn endpoint(method: &str, path: &str, status: u16, body: &str) -> Endpoint {
    EndpointDraft::new(method, path)
        .status(status.to_string())
        .body(body)
        .into_endpoint()
        .unwrap()
}

pub fn config(endpoints: Vec<Endpoint>) -> Configuration {
    Configuration::from_endpoints(endpoints)
}
