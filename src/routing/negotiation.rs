//! Content type and header negotiation.
//!
//! A [`Negotiation`] is handed to every dispatch and filled in from the
//! terminal match: the route's `type` option (or the router default) and the
//! router's default headers extended by the route's `headers` option.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::routing::options::Options;

pub const CONTENT_TYPE_PLAIN: &str = "text/plain";
pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_API: &str = "application/json";

/// Response headers as a name → value list.
pub type Headers = IndexMap<String, String>;

/// Content type and headers negotiated for one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Negotiation {
    content_type: Option<String>,
    headers: Option<Headers>,
}

impl Negotiation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    pub fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    pub fn set_headers(&mut self, headers: Headers) {
        self.headers = Some(headers);
    }

    /// Apply the resolved `options` on top of the router defaults.
    pub(crate) fn apply(
        &mut self,
        options: &Options,
        default_type: Option<&str>,
        default_headers: Option<&Headers>,
    ) {
        match options.get("type") {
            Some(value) => self.set_content_type(scalar(value)),
            None => {
                if let Some(default_type) = default_type {
                    self.set_content_type(default_type);
                }
            }
        }

        let route_headers = options.get("headers").and_then(Value::as_object);
        if route_headers.is_some() || default_headers.is_some() {
            let mut headers = default_headers.cloned().unwrap_or_default();
            for (name, value) in route_headers.into_iter().flatten() {
                headers.insert(name.clone(), scalar(value));
            }
            self.set_headers(headers);
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
