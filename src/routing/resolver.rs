//! Group expansion.
//!
//! # Responsibilities
//! - Load a group's source into a fresh, empty scope
//! - Fail hard when a file, file list entry or directory is missing
//!
//! # Design Decisions
//! - The live route table is never torn down; every expansion depth gets
//!   its own scope, dropped once the nested dispatch returns
//! - Dispatch scopes inherit the parent's catch-alls (a group may override
//!   them); trace scopes start without any

use std::path::Path;
use std::sync::Arc;

use crate::routing::error::{RouterError, RouterResult};
use crate::routing::handler::RouteSource;
use crate::routing::router::Router;

impl Router {
    /// Build the scope a group source registers into.
    pub(crate) fn expand(&self, source: &RouteSource, inherit_catchalls: bool) -> RouterResult<Router> {
        let mut scope = self.scope(inherit_catchalls);
        scope.load_source(source)?;
        tracing::debug!(
            source = %source.describe(),
            routes = scope.routes.len(),
            "Group expanded"
        );
        Ok(scope)
    }

    /// Register the routes of `source` into this router.
    pub fn load_source(&mut self, source: &RouteSource) -> RouterResult<()> {
        match source {
            RouteSource::File(path) => self.load_file(path),
            RouteSource::Files(paths) => {
                for path in paths {
                    self.load_file(path)?;
                }
                Ok(())
            }
            RouteSource::Dir(dir) => {
                let loader = Arc::clone(&self.sources.loader);
                if !loader.exists(dir) {
                    return Err(RouterError::RouteSourceNotFound { path: dir.clone() });
                }
                for path in loader.files(dir)? {
                    self.load_file(&path)?;
                }
                Ok(())
            }
            RouteSource::Callable(callback) => {
                callback(self);
                Ok(())
            }
        }
    }

    fn load_file(&mut self, path: &Path) -> RouterResult<()> {
        let loader = Arc::clone(&self.sources.loader);
        if !loader.exists(path) {
            return Err(RouterError::RouteSourceNotFound { path: path.to_path_buf() });
        }
        if let Some(callback) = loader.load(path)? {
            callback(self);
        }
        Ok(())
    }
}
