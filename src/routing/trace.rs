//! Flat route listing, groups included.

use serde::Serialize;

use crate::routing::error::{RouterError, RouterResult};
use crate::routing::handler::{Handler, RouteSource};
use crate::routing::options::Options;
use crate::routing::router::Router;

/// URI shown for catch-all entries.
pub const OTHERWISE_URI: &str = "/other-wise";

/// One line of a route listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub method: String,
    pub uri: String,
    pub options: Options,
    pub handler: String,
}

impl TraceEntry {
    /// Returns true if this entry is a group registration.
    pub fn is_group(&self) -> bool {
        self.options.get("group").is_some_and(|group| !group.is_null())
    }
}

impl Router {
    /// List every route, every catch-all and, recursively, every route
    /// registered by a group.
    ///
    /// Each level lists its routes, then its catch-alls, then descends into
    /// its groups in registration order. Groups are expanded into throwaway
    /// scopes; this router is left untouched.
    pub fn trace(&self) -> RouterResult<Vec<TraceEntry>> {
        let mut trace = Vec::new();
        self.trace_into(&mut trace, 0)?;
        Ok(trace)
    }

    fn trace_into(&self, trace: &mut Vec<TraceEntry>, depth: usize) -> RouterResult<()> {
        let mut groups: Vec<&RouteSource> = Vec::new();

        for (method, route) in self.routes.iter() {
            let entry = TraceEntry {
                method: method.to_string(),
                uri: route.uri.clone(),
                options: route.options.clone(),
                handler: self.describe(&route.handler),
            };
            if entry.is_group() {
                if let Handler::Source(source) = &route.handler {
                    groups.push(source);
                }
            }
            trace.push(entry);
        }

        for (method, catchall) in self.otherwise.iter() {
            trace.push(TraceEntry {
                method: method.to_string(),
                uri: OTHERWISE_URI.to_string(),
                options: catchall.options.clone(),
                handler: self.describe(&catchall.handler),
            });
        }

        for source in groups {
            if depth >= self.settings.max_group_depth {
                return Err(RouterError::GroupDepthExceeded {
                    uri: source.describe(),
                    limit: self.settings.max_group_depth,
                });
            }
            let scope = self.expand(source, false)?;
            scope.trace_into(trace, depth + 1)?;
        }

        Ok(())
    }

    /// Handler description with source paths shown root-relative.
    fn describe(&self, handler: &Handler) -> String {
        let resolver = &self.sources.resolver;
        match handler {
            Handler::Source(RouteSource::File(path)) | Handler::Source(RouteSource::Dir(path)) => {
                resolver.relative(path).display().to_string()
            }
            Handler::Source(RouteSource::Files(paths)) => {
                let listed: Vec<String> = paths
                    .iter()
                    .map(|path| resolver.relative(path).display().to_string())
                    .collect();
                format!("[{}]", listed.join(", "))
            }
            other => other.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::source::GroupContext;

    #[test]
    fn test_trace_order() {
        let mut router = Router::new();
        router
            .get("/a", "A@get", ())
            .group(
                "get",
                "/admin",
                GroupContext::callable(|r| {
                    r.get("/users", "Admin@users", ());
                    r.otherwise("get", "Admin@missing", ());
                }),
                (),
            )
            .post("/a", "A@post", ())
            .otherwise("get", "Missing@x", ());

        let trace = router.trace().unwrap();
        let lines: Vec<_> = trace
            .iter()
            .map(|e| (e.method.as_str(), e.uri.as_str(), e.handler.as_str()))
            .collect();

        assert_eq!(
            lines,
            [
                ("get", "/a", "A@get"),
                ("get", "/admin*", "<callable>"),
                ("post", "/a", "A@post"),
                ("get", OTHERWISE_URI, "Missing@x"),
                ("get", "/users", "Admin@users"),
                ("get", OTHERWISE_URI, "Admin@missing"),
            ]
        );
        assert!(trace[1].is_group());
        assert!(!trace[0].is_group());

        // The live table is untouched by the walk.
        assert_eq!(router.routes().len(), 3);
        assert!(!router.catchalls().is_empty());
    }
}
