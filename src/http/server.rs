//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single catch-all handler
//! - Wire up middleware (tracing, request ID)
//! - Dispatch every request through the live route table
//! - Serve until a shutdown signal arrives
//!
//! # Design Decisions
//! - The route table sits behind `ArcSwap`; reloads never block requests
//! - Each request reads one snapshot, so a reload mid-dispatch is invisible
//! - Dispatch runs on the blocking pool; group expansion reads files

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::respond;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::routing::{Negotiation, Router as RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<ArcSwap<RouteTable>>,
}

/// HTTP front end for the router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server answering from `routes`.
    ///
    /// Keep a clone of `routes` to swap in a rebuilt table later.
    pub fn new(routes: Arc<ArcSwap<RouteTable>>) -> Self {
        let router = Self::build_router(AppState { routes });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The Axum router, for serving or in-process testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request against the current route table and answer it.
///
/// Dispatch may read route files from disk when it descends into a group,
/// so it runs on the blocking pool against a snapshot of the table.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);
    let method = request.method().as_str().to_lowercase();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    let routes = state.routes.load_full();
    let task = {
        let request_id = request_id.clone();
        let method = method.clone();
        let path = path.clone();
        tokio::task::spawn_blocking(move || {
            let mut negotiation = Negotiation::new();
            match routes.dispatch(&method, &path, (), &mut negotiation) {
                Ok(matched) => {
                    if !matched.is_found() {
                        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
                    }
                    respond(&matched, &negotiation)
                }
                Err(e) => {
                    tracing::error!(request_id = %request_id, path = %path, error = %e, "Dispatch failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
                }
            }
        })
    };

    let response = match task.await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Dispatch task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Dispatch failed").into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}
