//! Route source loading.
//!
//! # Responsibilities
//! - Answer existence questions about route source paths
//! - Enumerate the files of a `dir` source
//! - Turn one source into a callback that registers routes
//!
//! # Design Decisions
//! - Paths reaching a loader are already absolute (see [`PathResolver`])
//! - Loading a path may legitimately produce nothing (e.g. a README next
//!   to route files); only a missing path is an error
//! - Directory traversal order is sorted by file name for reproducible
//!   registration order
//!
//! [`PathResolver`]: crate::routing::PathResolver

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::routing::declaration::RouteFile;
use crate::routing::error::{RouterError, RouterResult};
use crate::routing::handler::RouteCallback;
use crate::routing::router::Router;

/// Resolves route source paths to route-registering callbacks.
pub trait RouteLoader: Send + Sync {
    /// Returns true if `path` exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Returns true if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Every regular file under `dir`, recursively, in traversal order.
    fn files(&self, dir: &Path) -> RouterResult<Vec<PathBuf>>;

    /// Load one source. `Ok(None)` means the source registers nothing.
    fn load(&self, path: &Path) -> RouterResult<Option<RouteCallback>>;
}

/// Loads declarative TOML route files from disk.
#[derive(Debug, Clone, Default)]
pub struct TomlLoader;

impl TomlLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a route file without registering it.
    pub fn parse(path: &Path) -> RouterResult<RouteFile> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RouterError::RouteSourceNotFound { path: path.to_path_buf() }
            } else {
                RouterError::RouteSourceIo { path: path.to_path_buf(), source }
            }
        })?;

        toml::from_str(&content).map_err(|e| RouterError::RouteSourceParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl RouteLoader for TomlLoader {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn files(&self, dir: &Path) -> RouterResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| RouterError::RouteSourceIo {
                path: dir.to_path_buf(),
                source: e.into(),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn load(&self, path: &Path) -> RouterResult<Option<RouteCallback>> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            tracing::debug!(path = %path.display(), "Ignoring non-TOML route source");
            return Ok(None);
        }

        let file = Self::parse(path)?;
        tracing::debug!(path = %path.display(), declarations = file.routes.len(), "Route file loaded");
        Ok(Some(Arc::new(move |router: &mut Router| file.apply(router))))
    }
}

/// Route sources compiled into the binary, keyed by path.
///
/// A path is a directory when other registered paths live under it.
#[derive(Clone, Default)]
pub struct RegistryLoader {
    sources: IndexMap<PathBuf, RouteCallback>,
}

impl RegistryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source under `path`.
    pub fn register<F>(mut self, path: impl Into<PathBuf>, f: F) -> Self
    where
        F: Fn(&mut Router) + Send + Sync + 'static,
    {
        self.sources.insert(path.into(), Arc::new(f));
        self
    }
}

impl RouteLoader for RegistryLoader {
    fn exists(&self, path: &Path) -> bool {
        self.sources.contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.sources
            .keys()
            .any(|key| key != path && key.starts_with(path))
    }

    fn files(&self, dir: &Path) -> RouterResult<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self
            .sources
            .keys()
            .filter(|key| *key != dir && key.starts_with(dir))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }

    fn load(&self, path: &Path) -> RouterResult<Option<RouteCallback>> {
        self.sources
            .get(path)
            .cloned()
            .map(Some)
            .ok_or_else(|| RouterError::RouteSourceNotFound { path: path.to_path_buf() })
    }
}
