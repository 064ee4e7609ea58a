//! Route registration surface.
//!
//! # Responsibilities
//! - Own the route table, the catch-all table and router-level settings
//! - Funnel every registration helper into [`Router::on`]
//! - Hand out empty scopes sharing settings and sources for group expansion
//!
//! # Design Decisions
//! - Registration methods return `&mut Self` for chaining
//! - Method shorthands are plain functions delegating to `on`
//! - Settings are shared between scopes via `Arc` and copied on write

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::routing::error::RouterResult;
use crate::routing::handler::{Handler, RouteSource};
use crate::routing::loader::{RouteLoader, TomlLoader};
use crate::routing::negotiation::{Headers, CONTENT_TYPE_API, CONTENT_TYPE_PLAIN};
use crate::routing::options::{merge_shallow, IntoOptions, Options};
use crate::routing::pattern::{normalize, start_pattern, CompiledPattern};
use crate::routing::source::{GroupContext, GroupMetadata, PathResolver};
use crate::routing::table::{Catchall, Methods, OtherwiseTable, RouteDefinition, RouteTable, Uris};

/// Router-level behaviour shared by every scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Re-key captures under their template labels.
    pub labels: bool,

    /// Content type negotiated when a route declares none.
    pub content_type: Option<String>,

    /// Headers added to every negotiation.
    pub headers: Option<Headers>,

    /// Joins a target and an action in `resource` / `api` handler names.
    pub separator: String,

    /// Contextual data exposed under the `data` parameter.
    pub data: Value,

    /// Maximum group nesting followed by dispatch and trace.
    pub max_group_depth: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            labels: false,
            content_type: Some(CONTENT_TYPE_PLAIN.to_string()),
            headers: None,
            separator: "@".to_string(),
            data: Value::Array(Vec::new()),
            max_group_depth: 32,
        }
    }
}

/// Where group sources are resolved and loaded from.
#[derive(Clone)]
pub struct Sources {
    pub resolver: PathResolver,
    pub loader: Arc<dyn RouteLoader>,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            resolver: PathResolver::default(),
            loader: Arc::new(TomlLoader::new()),
        }
    }
}

/// The HTTP request router.
///
/// ```
/// use uri_router::routing::Router;
///
/// let mut router = Router::new().with_labels(true);
/// router.get("/users/:id", "Users@show", ());
///
/// let matched = router.find("GET", "/users/42").unwrap();
/// assert_eq!(matched.parameters().get("id"), Some("42"));
/// ```
#[derive(Clone, Default)]
pub struct Router {
    pub(crate) routes: RouteTable,
    pub(crate) otherwise: OtherwiseTable,
    pub(crate) settings: Arc<RouterSettings>,
    pub(crate) sources: Sources,
}

/// Canonical `resource` routes: (methods, sub-path, action).
const RESOURCE_ROUTES: [(&str, &str, &str); 8] = [
    ("get", "index", "index"),
    ("get", "", "index"),
    ("get", "create", "create"),
    ("get", ":id", "show"),
    ("get", ":id/edit", "edit"),
    ("post", "", "store"),
    ("put,patch", ":id", "update"),
    ("delete", ":id", "destroy"),
];

/// Canonical `api` routes: (methods, sub-path, action).
const API_ROUTES: [(&str, &str, &str); 8] = [
    ("get", "", "search"),
    ("get", ":id", "get"),
    ("post", "", "post"),
    ("put", ":id", "put"),
    ("delete", ":id", "delete"),
    ("delete", ":id/undo", "recycle"),
    ("get", ":id/previous", "previous"),
    ("get", ":id/next", "next"),
];

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: RouterSettings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    pub fn with_labels(mut self, labels: bool) -> Self {
        Arc::make_mut(&mut self.settings).labels = labels;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.set_content_type(content_type);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        Arc::make_mut(&mut self.settings).headers = Some(headers);
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.settings).separator = separator.into();
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        Arc::make_mut(&mut self.settings).data = data;
        self
    }

    pub fn with_sources(mut self, resolver: PathResolver, loader: Arc<dyn RouteLoader>) -> Self {
        self.sources = Sources { resolver, loader };
        self
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn catchalls(&self) -> &OtherwiseTable {
        &self.otherwise
    }

    pub fn content_type(&self) -> Option<&str> {
        self.settings.content_type.as_deref()
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        Arc::make_mut(&mut self.settings).content_type = Some(content_type.into());
    }

    /// Add a header to every negotiation made by this router.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        Arc::make_mut(&mut self.settings)
            .headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
    }

    /// Drop every registered route. Catch-alls are kept.
    pub fn clear(&mut self) -> &mut Self {
        self.routes.clear();
        self
    }

    /// An empty router sharing settings and sources with this one.
    pub(crate) fn scope(&self, inherit_catchalls: bool) -> Router {
        Router {
            routes: RouteTable::new(),
            otherwise: if inherit_catchalls {
                self.otherwise.clone()
            } else {
                OtherwiseTable::default()
            },
            settings: Arc::clone(&self.settings),
            sources: self.sources.clone(),
        }
    }

    /// Register `handler` for each template in `uris` under every method in
    /// `methods`.
    pub fn on(
        &mut self,
        methods: impl Into<Methods>,
        uris: impl Into<Uris>,
        handler: impl Into<Handler>,
        options: impl IntoOptions,
    ) -> &mut Self {
        let methods = methods.into();
        let handler = handler.into();
        let options = options.into_options();

        for uri in uris.into().iter() {
            let pattern = CompiledPattern::compile(uri);
            for method in methods.iter() {
                tracing::trace!(method = %method, uri = %uri, key = %pattern.key(), "Route registered");
                self.routes.insert(
                    method,
                    RouteDefinition {
                        uri: uri.to_string(),
                        handler: handler.clone(),
                        options: options.clone(),
                        pattern: pattern.clone(),
                    },
                );
            }
        }
        self
    }

    pub fn get(&mut self, uris: impl Into<Uris>, handler: impl Into<Handler>, options: impl IntoOptions) -> &mut Self {
        self.on("get", uris, handler, options)
    }

    pub fn post(&mut self, uris: impl Into<Uris>, handler: impl Into<Handler>, options: impl IntoOptions) -> &mut Self {
        self.on("post", uris, handler, options)
    }

    pub fn put(&mut self, uris: impl Into<Uris>, handler: impl Into<Handler>, options: impl IntoOptions) -> &mut Self {
        self.on("put", uris, handler, options)
    }

    pub fn patch(&mut self, uris: impl Into<Uris>, handler: impl Into<Handler>, options: impl IntoOptions) -> &mut Self {
        self.on("patch", uris, handler, options)
    }

    pub fn delete(&mut self, uris: impl Into<Uris>, handler: impl Into<Handler>, options: impl IntoOptions) -> &mut Self {
        self.on("delete", uris, handler, options)
    }

    /// Bind the prefix `start` to a sub-router.
    ///
    /// `context` is a root-relative file or directory, a list of files, or
    /// a [`GroupContext::callable`]. The routes it registers are matched
    /// against the URI with `start` removed.
    pub fn group(
        &mut self,
        methods: impl Into<Methods>,
        start: &str,
        context: impl Into<GroupContext>,
        options: impl IntoOptions,
    ) -> &mut Self {
        let start = normalize(start);
        let start = start.strip_suffix('/').unwrap_or(&start).to_string();

        let source = context
            .into()
            .classify(&self.sources.resolver, self.sources.loader.as_ref());
        let group = GroupMetadata {
            start: start_pattern(&start),
            source_type: source.source_type(),
        };

        let mut record = Map::new();
        record.insert("start".to_string(), Value::String(group.start));
        record.insert("type".to_string(), Value::String(group.source_type.as_str().to_string()));

        let mut options = options.into_options();
        options.insert("group".to_string(), Value::Object(record));

        self.on(methods, &format!("{}*", start), Handler::Source(source), options)
    }

    /// Register the catch-all for `methods`, replacing any previous one.
    pub fn otherwise(
        &mut self,
        methods: impl Into<Methods>,
        handler: impl Into<Handler>,
        options: impl IntoOptions,
    ) -> &mut Self {
        let handler = handler.into();
        let options = options.into_options();
        for method in methods.into().iter() {
            self.otherwise.set(
                method,
                Catchall {
                    handler: handler.clone(),
                    options: options.clone(),
                },
            );
        }
        self
    }

    /// Register the CRUD routes of `target` under `uri`.
    pub fn resource(&mut self, uri: &str, target: &str, options: impl IntoOptions) -> &mut Self {
        let options = options.into_options();
        for (methods, path, action) in RESOURCE_ROUTES {
            let handler = format!("{}{}{}", target, self.settings.separator, action);
            self.on(methods, &format!("{}/{}", uri, path), handler, options.clone());
        }
        self
    }

    /// Register the API routes of `target` under `uri`.
    ///
    /// Every route gets `settings` plus the API content type; `actions` maps
    /// an action name to extra options for that route only.
    pub fn api(
        &mut self,
        uri: &str,
        target: &str,
        settings: impl IntoOptions,
        actions: impl IntoOptions,
    ) -> &mut Self {
        let settings = settings.into_options();
        let actions = actions.into_options();

        let mut marker = Options::new();
        marker.insert("type".to_string(), Value::String(CONTENT_TYPE_API.to_string()));

        for (methods, path, action) in API_ROUTES {
            let handler = format!("{}{}{}", target, self.settings.separator, action);
            let mut options = merge_shallow(settings.clone(), marker.clone());
            if let Some(Value::Object(extra)) = actions.get(action) {
                options = merge_shallow(options, extra.clone());
            }
            self.on(methods, &format!("{}/{}", uri, path), handler, options);
        }
        self
    }

    /// Load a root-relative route source (file or directory) into this router.
    pub fn load(&mut self, path: impl AsRef<Path>) -> RouterResult<&mut Self> {
        let path = self.sources.resolver.absolute(path);
        let source = if self.sources.loader.is_dir(&path) {
            RouteSource::Dir(path)
        } else {
            RouteSource::File(path)
        };
        self.load_source(&source)?;
        Ok(self)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("otherwise", &self.otherwise)
            .field("settings", &self.settings)
            .field("root", &self.sources.resolver.root())
            .finish()
    }
}
