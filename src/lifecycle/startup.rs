//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated configuration into a populated route table
//! - Rebuild the table when the configuration or route files change
//!
//! # Design Decisions
//! - Fail fast: a missing or malformed entry route source is fatal at startup
//! - On reload the same failure keeps the previous table in place

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;

use crate::config::{AppConfig, RouterConfig};
use crate::routing::{PathResolver, Router, RouterResult, TomlLoader};

/// Build a router from configuration, loading `router.routes`.
pub fn build_router(config: &RouterConfig) -> RouterResult<Router> {
    let mut router = Router::new()
        .with_settings(config.settings())
        .with_sources(PathResolver::new(&config.root), Arc::new(TomlLoader::new()));
    router.load(&config.routes)?;

    tracing::info!(
        root = %config.root,
        routes = %config.routes,
        registered = router.routes().len(),
        "Route table loaded"
    );
    Ok(router)
}

/// Swap in a freshly built router for every configuration update.
pub async fn apply_updates(
    routes: Arc<ArcSwap<Router>>,
    mut updates: mpsc::UnboundedReceiver<AppConfig>,
) {
    while let Some(config) = updates.recv().await {
        match build_router(&config.router) {
            Ok(router) => {
                routes.store(Arc::new(router));
                tracing::info!("Route table reloaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to rebuild route table. Keeping current routes.");
            }
        }
    }
}
