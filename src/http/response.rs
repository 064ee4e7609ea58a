//! Response construction from a dispatch outcome.
//!
//! # Responsibilities
//! - Map the matched handler to a status code and body
//! - Apply the negotiated content type and headers
//!
//! # Design Decisions
//! - No handler → 404, failure handler → 500
//! - Named handlers have no in-process target; they answer with the
//!   exported match so the route can be inspected over HTTP
//! - Header values that are not valid HTTP are logged and skipped

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::routing::{Handler, MatchResult, Negotiation};

/// Body for requests no route or catch-all claims.
pub const NOT_FOUND_BODY: &str = "No matching route found";

/// Build the response for a completed dispatch.
pub fn respond(matched: &MatchResult, negotiation: &Negotiation) -> Response {
    let (status, body) = match matched.handler() {
        None => return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response(),
        Some(Handler::Endpoint(endpoint)) => (StatusCode::OK, render(endpoint(matched))),
        Some(Handler::Named(_)) => (StatusCode::OK, render(matched.to_value())),
        Some(Handler::Failure(message)) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        Some(Handler::Source(source)) => {
            tracing::error!(source = %source.describe(), "Dispatch ended on an unexpanded group");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Route group could not be resolved".to_string(),
            )
        }
    };

    let mut response = (status, Body::from(body)).into_response();
    negotiate(&mut response, negotiation);
    response
}

/// Strings are sent as-is; everything else as JSON.
fn render(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn negotiate(response: &mut Response, negotiation: &Negotiation) {
    let headers = response.headers_mut();

    if let Some(content_type) = negotiation.content_type() {
        match HeaderValue::from_str(content_type) {
            Ok(value) => {
                headers.insert(header::CONTENT_TYPE, value);
            }
            Err(_) => tracing::warn!(content_type = %content_type, "Invalid negotiated content type"),
        }
    }

    for (name, value) in negotiation.headers().into_iter().flatten() {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Invalid negotiated header skipped"),
        }
    }
}
