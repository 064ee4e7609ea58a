//! Routing error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a dispatch or a trace walk.
///
/// A request that matches nothing is *not* an error: it produces a
/// [`MatchResult`](crate::routing::MatchResult) without a handler.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A `file`, `files` or `dir` group source is missing at expansion time.
    #[error("The route source `{}` was not found", path.display())]
    RouteSourceNotFound { path: PathBuf },

    /// A route source exists but could not be read.
    #[error("Failed to read route source `{}`: {source}", path.display())]
    RouteSourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A route source was read but its declarations are malformed.
    #[error("Invalid route source `{}`: {message}", path.display())]
    RouteSourceParse { path: PathBuf, message: String },

    /// The `group` record attached to a route is unusable.
    #[error("Invalid group on `{uri}`: {reason}")]
    InvalidGroup { uri: String, reason: String },

    /// Groups kept expanding past the configured depth.
    #[error("Group expansion exceeded {limit} levels while resolving `{uri}`")]
    GroupDepthExceeded { uri: String, limit: usize },
}

/// Result type for routing operations.
pub type RouterResult<T> = Result<T, RouterError>;
