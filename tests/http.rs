//! HTTP adapter tests, driven in-process with `oneshot`.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uri_router::http::{HttpServer, X_REQUEST_ID};
use uri_router::routing::{Handler, Headers, Router};

mod common;
use common::RouteTree;

fn server(router: Router) -> (HttpServer, Arc<ArcSwap<Router>>) {
    let routes = Arc::new(ArcSwap::from_pointee(router));
    (HttpServer::new(routes.clone()), routes)
}

async fn send(server: &HttpServer, method: &str, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = server.app().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_unmatched_is_404() {
    let (server, _) = server(Router::new());
    let (status, headers, _) = send(&server, "GET", "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    // Generated ids are hyphenated UUIDs.
    assert_eq!(headers[X_REQUEST_ID].len(), 36);
}

#[tokio::test]
async fn test_endpoint_is_invoked() {
    let mut router = Router::new().with_labels(true);
    router.get(
        "/hello/:name",
        Handler::endpoint(|matched| {
            let name = matched.parameters().get("name").unwrap_or("nobody");
            Value::String(format!("hello {}", name))
        }),
        (),
    );

    let (server, _) = server(router);
    let (status, headers, body) = send(&server, "GET", "/hello/ada").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello ada");
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
}

#[tokio::test]
async fn test_named_handler_exports_match() {
    let mut headers = Headers::new();
    headers.insert("X-Frame-Options".into(), "DENY".into());
    let mut router = Router::new().with_headers(headers);
    router.api("/users", "Users", (), ());

    let (server, _) = server(router);
    let (status, headers, body) = send(&server, "DELETE", "/users/5/undo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers["x-frame-options"], "DENY");

    let exported: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(exported["method"], json!("delete"));
    assert_eq!(exported["uri"], json!("/users/5/undo"));
    assert_eq!(exported["handler"], json!("Users@recycle"));
}

#[tokio::test]
async fn test_failure_handler_is_500() {
    let mut router = Router::new();
    router.otherwise("*", Handler::Failure("maintenance".into()), ());

    let (server, _) = server(router);
    let (status, _, body) = send(&server, "POST", "/anything").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "maintenance");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (server, _) = server(Router::new());
    let request = Request::builder()
        .uri("/")
        .header(X_REQUEST_ID, "req-123")
        .body(Body::empty())
        .unwrap();
    let response = server.app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[X_REQUEST_ID], "req-123");
}

#[tokio::test]
async fn test_swapped_table_is_served() {
    let (server, routes) = server(Router::new());
    assert_eq!(send(&server, "GET", "/new").await.0, StatusCode::NOT_FOUND);

    let mut router = Router::new();
    router.get("/new", "New@show", ());
    routes.store(Arc::new(router));

    assert_eq!(send(&server, "GET", "/new").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_file_group_served_from_blocking_dispatch() {
    let tree = RouteTree::new();
    tree.write(
        "admin.toml",
        "[[routes]]\nkind = \"route\"\nuri = \"/users\"\nhandler = \"Admin@users\"\n",
    );
    let mut router = tree.router();
    router.group("get", "/admin", "admin.toml", ());

    let (server, _) = server(router);
    let (status, _, body) = send(&server, "GET", "/admin/users").await;
    assert_eq!(status, StatusCode::OK);
    let exported: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(exported["handler"], json!("Admin@users"));

    tree.remove("admin.toml");
    let (status, _, body) = send(&server, "GET", "/admin/users").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("admin.toml"));
}
