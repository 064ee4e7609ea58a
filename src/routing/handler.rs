//! Handler references stored in the route table.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::routing::matched::MatchResult;
use crate::routing::router::Router;

/// Application endpoint invoked by the HTTP adapter with the final match.
pub type Endpoint = Arc<dyn Fn(&MatchResult) -> Value + Send + Sync>;

/// Registers routes against the scope a group is expanded into.
pub type RouteCallback = Arc<dyn Fn(&mut Router) + Send + Sync>;

/// What a route resolves to.
///
/// The router never invokes handlers itself; it only hands them back in the
/// [`MatchResult`]. The one exception is [`Handler::Source`], which the
/// dispatcher consumes while expanding a group.
#[derive(Clone)]
pub enum Handler {
    /// Reference resolved by the caller, e.g. `Controller@action`.
    Named(String),
    /// In-process endpoint.
    Endpoint(Endpoint),
    /// Error value installed in place of a target, e.g. by an exception handler.
    Failure(String),
    /// Sub-router source of a group registration.
    Source(RouteSource),
}

/// Where a group's routes come from.
#[derive(Clone)]
pub enum RouteSource {
    File(PathBuf),
    Files(Vec<PathBuf>),
    Dir(PathBuf),
    Callable(RouteCallback),
}

impl Handler {
    /// Wrap a closure as an endpoint.
    pub fn endpoint<F>(f: F) -> Self
    where
        F: Fn(&MatchResult) -> Value + Send + Sync + 'static,
    {
        Handler::Endpoint(Arc::new(f))
    }

    /// Returns the name for [`Handler::Named`].
    pub fn name(&self) -> Option<&str> {
        match self {
            Handler::Named(name) => Some(name),
            _ => None,
        }
    }

    /// One-line description used by traces and logs.
    pub fn describe(&self) -> String {
        match self {
            Handler::Named(name) => name.clone(),
            Handler::Endpoint(_) => "<endpoint>".to_string(),
            Handler::Failure(message) => format!("<failure: {}>", message),
            Handler::Source(source) => source.describe(),
        }
    }
}

impl RouteSource {
    /// Wrap a closure as a callable group source.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&mut Router) + Send + Sync + 'static,
    {
        RouteSource::Callable(Arc::new(f))
    }

    pub fn describe(&self) -> String {
        match self {
            RouteSource::File(path) | RouteSource::Dir(path) => path.display().to_string(),
            RouteSource::Files(paths) => {
                let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                format!("[{}]", listed.join(", "))
            }
            RouteSource::Callable(_) => "<callable>".to_string(),
        }
    }
}

impl From<&str> for Handler {
    fn from(name: &str) -> Self {
        Handler::Named(name.to_string())
    }
}

impl From<String> for Handler {
    fn from(name: String) -> Self {
        Handler::Named(name)
    }
}

impl From<RouteSource> for Handler {
    fn from(source: RouteSource) -> Self {
        Handler::Source(source)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Handler::Endpoint(_) => f.write_str("Endpoint(..)"),
            Handler::Failure(message) => f.debug_tuple("Failure").field(message).finish(),
            Handler::Source(source) => f.debug_tuple("Source").field(source).finish(),
        }
    }
}

impl fmt::Debug for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSource::File(path) => f.debug_tuple("File").field(path).finish(),
            RouteSource::Files(paths) => f.debug_tuple("Files").field(paths).finish(),
            RouteSource::Dir(path) => f.debug_tuple("Dir").field(path).finish(),
            RouteSource::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl Serialize for Handler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.describe())
    }
}
