//! Shared utilities for integration tests.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use uri_router::routing::{PathResolver, Router, TomlLoader};

/// A temporary directory of route files.
pub struct RouteTree {
    dir: TempDir,
}

impl RouteTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to the root-relative `path`, creating directories.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        let path = self.dir.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    #[allow(dead_code)]
    pub fn remove(&self, path: &str) {
        fs::remove_file(self.dir.path().join(path)).unwrap();
    }

    /// An empty router whose group sources resolve inside this tree.
    pub fn router(&self) -> Router {
        Router::new().with_sources(
            PathResolver::new(self.dir.path()),
            Arc::new(TomlLoader::new()),
        )
    }

    /// A router with `entry` loaded.
    #[allow(dead_code)]
    pub fn load(&self, entry: &str) -> Router {
        let mut router = self.router();
        router.load(entry).unwrap();
        router
    }
}

/// Name of the matched handler, if it is a named one.
#[allow(dead_code)]
pub fn handler_name(router: &Router, method: &str, uri: &str) -> Option<String> {
    router
        .find(method, uri)
        .unwrap()
        .handler()
        .and_then(|h| h.name())
        .map(str::to_string)
}
