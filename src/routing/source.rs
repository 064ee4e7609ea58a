//! Group sources: metadata, classification and path resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::routing::handler::{RouteCallback, RouteSource};
use crate::routing::loader::RouteLoader;

/// Kind of sub-router a group is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    File,
    Files,
    Dir,
    Callable,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::File => "file",
            SourceType::Files => "files",
            SourceType::Dir => "dir",
            SourceType::Callable => "callable",
        }
    }
}

/// The `group` record carried in a group route's options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMetadata {
    /// Prefix expression, anchored at the start only.
    pub start: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

/// Unclassified group context as handed to [`Router::group`](crate::routing::Router::group).
#[derive(Clone)]
pub enum GroupContext {
    /// A file or directory, relative to the router root.
    Path(String),
    /// An explicit list of files, relative to the router root.
    Paths(Vec<String>),
    Callable(RouteCallback),
}

impl GroupContext {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&mut crate::routing::Router) + Send + Sync + 'static,
    {
        GroupContext::Callable(std::sync::Arc::new(f))
    }

    /// Resolve the context into a typed source.
    ///
    /// Lists keep only entries that exist as files. A path that is neither an
    /// existing file nor a directory is kept as a `file` source so expansion
    /// reports it as missing.
    pub fn classify(self, resolver: &PathResolver, loader: &dyn RouteLoader) -> RouteSource {
        match self {
            GroupContext::Paths(paths) => {
                let files = paths
                    .iter()
                    .map(|path| resolver.absolute(path))
                    .filter(|path| {
                        let keep = loader.exists(path) && !loader.is_dir(path);
                        if !keep {
                            tracing::warn!(path = %path.display(), "Skipping missing route file in group list");
                        }
                        keep
                    })
                    .collect();
                RouteSource::Files(files)
            }
            GroupContext::Path(path) => {
                let path = resolver.absolute(&path);
                if loader.is_dir(&path) {
                    RouteSource::Dir(path)
                } else {
                    RouteSource::File(path)
                }
            }
            GroupContext::Callable(callback) => RouteSource::Callable(callback),
        }
    }
}

impl From<&str> for GroupContext {
    fn from(path: &str) -> Self {
        GroupContext::Path(path.to_string())
    }
}

impl From<String> for GroupContext {
    fn from(path: String) -> Self {
        GroupContext::Path(path)
    }
}

impl From<Vec<String>> for GroupContext {
    fn from(paths: Vec<String>) -> Self {
        GroupContext::Paths(paths)
    }
}

impl From<Vec<&str>> for GroupContext {
    fn from(paths: Vec<&str>) -> Self {
        GroupContext::Paths(paths.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for GroupContext {
    fn from(paths: [&str; N]) -> Self {
        GroupContext::Paths(paths.iter().map(|p| p.to_string()).collect())
    }
}

impl RouteSource {
    pub fn source_type(&self) -> SourceType {
        match self {
            RouteSource::File(_) => SourceType::File,
            RouteSource::Files(_) => SourceType::Files,
            RouteSource::Dir(_) => SourceType::Dir,
            RouteSource::Callable(_) => SourceType::Callable,
        }
    }
}

/// Maps route source paths between root-relative and absolute form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute paths pass through; relative ones are joined to the root.
    pub fn absolute(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Root-relative form, or the path unchanged when outside the root.
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(".")
    }
}
