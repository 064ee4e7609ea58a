//! The outcome of a dispatch.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::routing::handler::Handler;
use crate::routing::options::Options;
use crate::routing::pattern::CompiledPattern;

/// Key under which router-level contextual data is exposed.
pub const DATA_KEY: &str = "data";

/// Parameters extracted from a matched URI.
///
/// Positional captures are always present. Named captures appear when the
/// router has label extraction enabled. The [`DATA_KEY`] entry carries the
/// router's contextual data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    captures: Vec<String>,
    named: IndexMap<String, String>,
    data: Value,
}

impl Parameters {
    /// Parameters with no captures.
    pub fn new(data: Value) -> Self {
        Self {
            captures: Vec::new(),
            named: IndexMap::new(),
            data,
        }
    }

    pub(crate) fn extract(
        pattern: &CompiledPattern,
        captures: Vec<String>,
        labels: bool,
        data: Value,
    ) -> Self {
        let named = if labels {
            pattern
                .label_values(&captures)
                .map(|(label, value)| (label.to_string(), value.to_string()))
                .collect()
        } else {
            IndexMap::new()
        };

        Self {
            captures,
            named,
            data,
        }
    }

    /// Look up a named capture, then a positional one (`"0"`, `"1"`, ...).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named
            .get(key)
            .map(String::as_str)
            .or_else(|| key.parse::<usize>().ok().and_then(|i| self.positional(i)))
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }

    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    pub fn named(&self) -> &IndexMap<String, String> {
        &self.named
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Add or replace a named parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.named.insert(name.into(), value.into());
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.captures.len() + self.named.len() + 1))?;
        for (index, value) in self.captures.iter().enumerate() {
            map.serialize_entry(&index.to_string(), value)?;
        }
        for (name, value) in &self.named {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(DATA_KEY, &self.data)?;
        map.end()
    }
}

/// Result of resolving a (method, URI) pair.
///
/// An empty `path` with no handler means nothing matched; an empty `path`
/// with a handler means the method's catch-all was used.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    method: String,
    uri: String,
    path: String,
    handler: Option<Handler>,
    parameters: Parameters,
    options: Options,
}

impl MatchResult {
    pub fn new(
        method: impl Into<String>,
        uri: impl Into<String>,
        path: impl Into<String>,
        handler: Option<Handler>,
        parameters: Parameters,
        options: Options,
    ) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            path: path.into(),
            handler,
            parameters,
            options,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The URI as passed to dispatch, before any group prefix was stripped.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Key of the matched pattern, empty for catch-alls and misses.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Returns true if a handler (route or catch-all) was resolved.
    pub fn is_found(&self) -> bool {
        self.handler.is_some()
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_handler(mut self, handler: impl Into<Handler>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Plain key/value snapshot for logging and inspection.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
