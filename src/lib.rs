//! HTTP request router with declarative, lazily loaded route groups.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use http::HttpServer;
pub use routing::{Handler, MatchResult, Negotiation, Router, RouterError};
