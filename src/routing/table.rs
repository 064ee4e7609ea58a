//! Per-method route storage.
//!
//! # Design Decisions
//! - Methods are stored lower-cased, in first-registration order
//! - Routes keep registration order; re-registering a key replaces the
//!   definition in place instead of appending
//! - One catch-all per method, last registration wins

use indexmap::IndexMap;

use crate::routing::handler::Handler;
use crate::routing::options::Options;
use crate::routing::pattern::CompiledPattern;

/// Methods `*` expands to.
pub const ALL_METHODS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

/// A normalized list of HTTP methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Methods(Vec<String>);

impl Methods {
    /// Every method `*` stands for.
    pub fn all() -> Self {
        Methods(ALL_METHODS.iter().map(|m| m.to_string()).collect())
    }

    /// Parse `*`, a single method or a comma-separated list.
    pub fn parse(list: &str) -> Self {
        Self::from_items([list])
    }

    fn from_items<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        let mut methods: Vec<String> = Vec::new();
        for item in items.into_iter().flat_map(|item| item.split(',')) {
            let item = item.trim();
            if item == "*" {
                methods.extend(ALL_METHODS.iter().map(|m| m.to_string()));
            } else if !item.is_empty() {
                methods.push(item.to_lowercase());
            }
        }
        Methods(methods)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Methods {
    fn from(list: &str) -> Self {
        Methods::parse(list)
    }
}

impl From<String> for Methods {
    fn from(list: String) -> Self {
        Methods::parse(&list)
    }
}

impl From<Vec<&str>> for Methods {
    fn from(items: Vec<&str>) -> Self {
        Methods::from_items(items)
    }
}

impl From<Vec<String>> for Methods {
    fn from(items: Vec<String>) -> Self {
        Methods::from_items(items.iter().map(String::as_str))
    }
}

impl<const N: usize> From<[&str; N]> for Methods {
    fn from(items: [&str; N]) -> Self {
        Methods::from_items(items)
    }
}

/// One or more URI templates registered under the same handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uris(Vec<String>);

impl Uris {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Uris {
    fn from(uri: &str) -> Self {
        Uris(vec![uri.to_string()])
    }
}

impl From<&String> for Uris {
    fn from(uri: &String) -> Self {
        Uris(vec![uri.clone()])
    }
}

impl From<String> for Uris {
    fn from(uri: String) -> Self {
        Uris(vec![uri])
    }
}

impl From<Vec<&str>> for Uris {
    fn from(uris: Vec<&str>) -> Self {
        Uris(uris.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Uris {
    fn from(uris: Vec<String>) -> Self {
        Uris(uris)
    }
}

impl<const N: usize> From<[&str; N]> for Uris {
    fn from(uris: [&str; N]) -> Self {
        Uris(uris.iter().map(|uri| uri.to_string()).collect())
    }
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    /// Template as declared.
    pub uri: String,
    pub handler: Handler,
    pub options: Options,
    pub pattern: CompiledPattern,
}

impl RouteDefinition {
    pub fn labels(&self) -> &[String] {
        self.pattern.labels()
    }
}

/// Ordered method → key → definition mapping.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    methods: IndexMap<String, IndexMap<String, RouteDefinition>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route` under its compiled key, replacing any previous
    /// definition at the same position.
    pub fn insert(&mut self, method: &str, route: RouteDefinition) {
        let key = route.pattern.key().to_string();
        self.methods
            .entry(method.to_string())
            .or_default()
            .insert(key, route);
    }

    /// Routes for `method` in registration order.
    pub fn routes<'a>(&'a self, method: &str) -> impl Iterator<Item = &'a RouteDefinition> + 'a {
        self.methods
            .get(method)
            .into_iter()
            .flat_map(|routes| routes.values())
    }

    /// Every (method, route) pair, methods in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteDefinition)> {
        self.methods
            .iter()
            .flat_map(|(method, routes)| routes.values().map(move |route| (method.as_str(), route)))
    }

    pub fn get(&self, method: &str, key: &str) -> Option<&RouteDefinition> {
        self.methods.get(method).and_then(|routes| routes.get(key))
    }

    pub fn len(&self) -> usize {
        self.methods.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.methods.clear();
    }
}

/// Per-method fallback handler.
#[derive(Debug, Clone)]
pub struct Catchall {
    pub handler: Handler,
    pub options: Options,
}

/// One [`Catchall`] per method.
#[derive(Debug, Clone, Default)]
pub struct OtherwiseTable {
    methods: IndexMap<String, Catchall>,
}

impl OtherwiseTable {
    pub fn set(&mut self, method: &str, catchall: Catchall) {
        self.methods.insert(method.to_string(), catchall);
    }

    pub fn get(&self, method: &str) -> Option<&Catchall> {
        self.methods.get(method)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Catchall)> {
        self.methods.iter().map(|(method, catchall)| (method.as_str(), catchall))
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn clear(&mut self) {
        self.methods.clear();
    }
}
