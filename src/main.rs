//! uri-router server.
//!
//! Serves HTTP by dispatching every request through a route table loaded
//! from declarative route files.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http::server ──▶ routing::Router::dispatch
//!                           │                  │
//!                           │                  ├─ table lookup (first match)
//!                           │                  ├─ group? load source, recurse
//!                           │                  └─ negotiation
//!                           ▼
//!     Client Response ◀─ http::response (status, content type, headers)
//!
//!     config file ──▶ config::loader ──▶ lifecycle::startup::build_router
//!          ▲                                   │
//!          └──── config::watcher ──────────────┘ (ArcSwap on change)
//! ```
//!
//! The config path is the first argument, or `URI_ROUTER_CONFIG`, or
//! `router.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::net::TcpListener;

use uri_router::config::{load_config, ConfigWatcher};
use uri_router::http::HttpServer;
use uri_router::lifecycle::startup::{apply_updates, build_router};
use uri_router::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("URI_ROUTER_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("router.toml"));

    let config = load_config(&config_path)?;
    logging::init(&config.observability);

    tracing::info!("uri-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = %config_path.display(),
        bind_address = %config.listener.bind_address,
        root = %config.router.root,
        routes = %config.router.routes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let routes = Arc::new(ArcSwap::from_pointee(build_router(&config.router)?));

    let routes_path = PathBuf::from(&config.router.root).join(&config.router.routes);
    let (watcher, updates) = ConfigWatcher::new(&config_path);
    let _watcher = match watcher.also_watch(routes_path).run() {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            tracing::warn!(error = %e, "Config watcher unavailable, hot reload disabled");
            None
        }
    };
    tokio::spawn(apply_updates(routes.clone(), updates));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(routes).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
