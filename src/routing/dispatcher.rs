//! Request dispatch.
//!
//! # Responsibilities
//! - Find the first route whose pattern matches the URI (registration order)
//! - Merge declaration options with caller options
//! - Fall back to the method's catch-all
//! - Follow group matches into nested scopes until a terminal route is found
//! - Fill in the caller's negotiation context from the terminal match
//!
//! # Design Decisions
//! - No specificity scoring: the first structural match wins
//! - A miss is a `MatchResult` without handler, not an error
//! - Dispatch borrows the router immutably; expansion scopes are owned
//!   locally, one per depth

use regex::Regex;

use crate::observability::metrics;
use crate::routing::error::{RouterError, RouterResult};
use crate::routing::handler::Handler;
use crate::routing::matched::{MatchResult, Parameters};
use crate::routing::negotiation::Negotiation;
use crate::routing::options::{merge_recursive, merge_shallow, IntoOptions, Options};
use crate::routing::router::Router;
use crate::routing::source::GroupMetadata;

/// Outcome of one table lookup, before group handling.
struct Resolution {
    path: String,
    handler: Option<Handler>,
    parameters: Parameters,
    options: Options,
}

impl Router {
    /// Resolve `method` and `uri` to a handler.
    ///
    /// `options` are merged into the matched route's options (arrays
    /// accumulate). Content type and headers of the terminal match are
    /// written to `negotiation`.
    pub fn dispatch(
        &self,
        method: &str,
        uri: &str,
        options: impl IntoOptions,
        negotiation: &mut Negotiation,
    ) -> RouterResult<MatchResult> {
        let method = method.to_lowercase();
        let original = uri.to_string();
        let mut uri = original.clone();
        let mut options = options.into_options();
        let mut scope: Option<Router> = None;
        let mut depth = 0;

        loop {
            let router = scope.as_ref().unwrap_or(self);
            let mut resolution = router.resolve(&method, &uri, options);

            let Some(group) = take_group(&mut resolution.options, &uri)? else {
                negotiation.apply(
                    &resolution.options,
                    self.settings.content_type.as_deref(),
                    self.settings.headers.as_ref(),
                );
                return Ok(MatchResult::new(
                    method,
                    original,
                    resolution.path,
                    resolution.handler,
                    resolution.parameters,
                    resolution.options,
                ));
            };

            depth += 1;
            if depth > self.settings.max_group_depth {
                return Err(RouterError::GroupDepthExceeded {
                    uri,
                    limit: self.settings.max_group_depth,
                });
            }

            let source = match resolution.handler {
                Some(Handler::Source(source)) => source,
                _ => {
                    return Err(RouterError::InvalidGroup {
                        uri,
                        reason: "handler is not a route source".to_string(),
                    })
                }
            };

            let next = router.expand(&source, true)?;
            metrics::record_group_expansion(group.source_type.as_str());
            let remainder = strip_start(&group, &uri)?;
            tracing::info!(
                method = %method,
                uri = %uri,
                remainder = %remainder,
                depth = depth,
                "Descending into group"
            );

            uri = remainder;
            options = resolution.options;
            scope = Some(next);
        }
    }

    /// [`dispatch`](Self::dispatch) without caller options or negotiation.
    pub fn find(&self, method: &str, uri: &str) -> RouterResult<MatchResult> {
        self.dispatch(method, uri, (), &mut Negotiation::new())
    }

    fn resolve(&self, method: &str, uri: &str, options: Options) -> Resolution {
        let data = self.settings.data.clone();

        let found = self
            .routes
            .routes(method)
            .find_map(|route| route.pattern.captures(uri).map(|captures| (route, captures)));

        if let Some((route, captures)) = found {
            tracing::debug!(method = %method, uri = %uri, path = %route.pattern.key(), "Route matched");
            return Resolution {
                path: route.pattern.key().to_string(),
                handler: Some(route.handler.clone()),
                parameters: Parameters::extract(&route.pattern, captures, self.settings.labels, data),
                options: merge_recursive(route.options.clone(), options),
            };
        }

        match self.otherwise.get(method) {
            Some(catchall) => {
                tracing::debug!(method = %method, uri = %uri, "Falling back to catch-all");
                Resolution {
                    path: String::new(),
                    handler: Some(catchall.handler.clone()),
                    parameters: Parameters::new(data),
                    options: merge_shallow(catchall.options.clone(), options),
                }
            }
            None => Resolution {
                path: String::new(),
                handler: None,
                parameters: Parameters::new(data),
                options,
            },
        }
    }
}

/// Remove and decode the `group` record, if any.
fn take_group(options: &mut Options, uri: &str) -> RouterResult<Option<GroupMetadata>> {
    let Some(record) = options.shift_remove("group") else {
        return Ok(None);
    };
    if record.is_null() {
        return Ok(None);
    }
    serde_json::from_value::<GroupMetadata>(record)
        .map(Some)
        .map_err(|e| RouterError::InvalidGroup {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
}

/// Strip the group prefix from `uri`, keeping a leading slash.
fn strip_start(group: &GroupMetadata, uri: &str) -> RouterResult<String> {
    let start = Regex::new(&group.start).map_err(|e| RouterError::InvalidGroup {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;
    let end = start.replace(uri, "");
    Ok(if end.starts_with('/') {
        end.into_owned()
    } else {
        format!("/{}", end)
    })
}
