//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::negotiation::{Headers, CONTENT_TYPE_PLAIN};
use crate::routing::RouterSettings;

/// Root configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Router settings and route source locations.
    pub router: RouterConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Directory route source paths are relative to.
    /// A relative root is resolved against the config file's directory.
    pub root: String,

    /// Entry route source (file or directory), relative to `root`.
    pub routes: String,

    /// Expose captures under their template labels.
    pub labels: bool,

    /// Default negotiated content type.
    pub content_type: Option<String>,

    /// Headers added to every negotiation.
    pub headers: Headers,

    /// Separator between target and action in generated handler names.
    pub separator: String,

    /// Maximum group nesting.
    pub max_group_depth: usize,

    /// Contextual data exposed to every match under `data`.
    pub data: Value,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            routes: "routes".to_string(),
            labels: false,
            content_type: Some(CONTENT_TYPE_PLAIN.to_string()),
            headers: Headers::new(),
            separator: "@".to_string(),
            max_group_depth: 32,
            data: Value::Array(Vec::new()),
        }
    }
}

impl RouterConfig {
    /// Router-level settings described by this configuration.
    pub fn settings(&self) -> RouterSettings {
        RouterSettings {
            labels: self.labels,
            content_type: self.content_type.clone(),
            headers: (!self.headers.is_empty()).then(|| self.headers.clone()),
            separator: self.separator.clone(),
            data: self.data.clone(),
            max_group_depth: self.max_group_depth,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint address (Prometheus format).
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.router.routes, "routes");
        assert_eq!(config.router.separator, "@");
        assert!(!config.router.labels);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.observability.metrics_enabled);
        assert_eq!(config.observability.metrics_address, "0.0.0.0:9090");
    }

    #[test]
    fn test_router_settings() {
        let config: AppConfig = toml::from_str(
            r#"
            [router]
            labels = true
            content_type = "text/html"
            separator = "::"

            [router.headers]
            X-Frame-Options = "DENY"

            [router.data]
            app = "shop"
            "#,
        )
        .unwrap();

        let settings = config.router.settings();
        assert!(settings.labels);
        assert_eq!(settings.content_type.as_deref(), Some("text/html"));
        assert_eq!(settings.separator, "::");
        assert_eq!(settings.headers.unwrap()["X-Frame-Options"], "DENY");
        assert_eq!(settings.data["app"], "shop");
    }

    #[test]
    fn test_no_headers_means_none() {
        assert!(RouterConfig::default().settings().headers.is_none());
    }
}
