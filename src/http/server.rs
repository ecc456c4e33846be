//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all dispatcher
//! - Wire up middleware (request ID, tracing, CORS, panic recovery)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::http::cors;
use crate::http::dispatch::{dispatch, AppState};
use crate::routing::SharedRoutes;

/// HTTP server for the mock endpoints.
pub struct MockServer {
    router: Router,
}

impl MockServer {
    /// Create a server reading from the given shared route table.
    pub fn new(settings: &Settings, routes: SharedRoutes) -> Self {
        let state = AppState::new(routes).with_max_delay(settings.limits.max_delay());
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let [allow_origin, allow_methods, allow_headers] = cors::layers();

        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(CatchPanicLayer::new())
            .layer(allow_origin)
            .layer(allow_methods)
            .layer(allow_headers)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Mock API server running");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
