//! End-to-end routing behavior: registration, dispatch, groups and traces.

use serde_json::json;
use uri_router::routing::{GroupContext, Negotiation, Router, RouterError};

mod common;
use common::{handler_name, RouteTree};

#[test]
fn test_labels_round_trip() {
    let mut router = Router::new().with_labels(true);
    router.get("/shops/:shop/items/{item}", "Items@show", ());

    let matched = router.find("get", "/shops/acme/items/42").unwrap();
    let params = matched.parameters();
    assert_eq!(params.get("shop"), Some("acme"));
    assert_eq!(params.get("item"), Some("42"));
    assert_eq!(params.get("0"), Some("acme"));
    assert_eq!(params.get("1"), Some("42"));
}

#[test]
fn test_labels_off_keeps_positional_only() {
    let mut router = Router::new();
    router.get("/users/:id", "Users@show", ());

    let matched = router.find("get", "/users/7").unwrap();
    assert_eq!(matched.parameters().get("id"), None);
    assert_eq!(matched.parameters().get("0"), Some("7"));
}

#[test]
fn test_registration_order_precedence() {
    let mut router = Router::new();
    router
        .get("/posts/:id", "Posts@show", ())
        .get("/posts/new", "Posts@create", ());

    assert_eq!(handler_name(&router, "get", "/posts/new").as_deref(), Some("Posts@show"));
}

#[test]
fn test_any_method_expands_to_every_verb() {
    let mut star = Router::new();
    star.on("*", "/ping", "Ping@any", ());

    let mut listed = Router::new();
    listed.on("get,post,put,patch,delete", "/ping", "Ping@any", ());

    for method in ["GET", "post", "Put", "PATCH", "delete"] {
        assert_eq!(handler_name(&star, method, "/ping"), handler_name(&listed, method, "/ping"));
        assert_eq!(handler_name(&star, method, "/ping").as_deref(), Some("Ping@any"));
    }
}

#[test]
fn test_catchall_fallback() {
    let mut router = Router::new();
    router
        .get("/", "Home@index", ())
        .otherwise("get", "Errors@missing", json!({"status": 404}));

    let matched = router.find("get", "/nope").unwrap();
    assert_eq!(matched.handler().and_then(|h| h.name()), Some("Errors@missing"));
    assert_eq!(matched.option("status"), Some(&json!(404)));

    // No catch-all for POST: a miss.
    assert!(!router.find("post", "/nope").unwrap().is_found());
}

#[test]
fn test_trailing_slash_is_optional() {
    let mut router = Router::new();
    router.get("/about", "Pages@about", ());

    assert!(router.find("get", "/about").unwrap().is_found());
    assert!(router.find("get", "/about/").unwrap().is_found());
    assert!(!router.find("get", "/about/us").unwrap().is_found());
}

#[test]
fn test_reregistration_replaces_in_place() {
    let mut router = Router::new();
    router
        .get("/a", "First@a", ())
        .get("/b", "B@b", ())
        .get("/a", "Second@a", ());

    assert_eq!(router.routes().len(), 2);
    assert_eq!(handler_name(&router, "get", "/a").as_deref(), Some("Second@a"));
    let order: Vec<_> = router.routes().routes("get").map(|r| r.uri.as_str()).collect();
    assert_eq!(order, ["/a", "/b"]);
}

#[test]
fn test_file_group_is_transparent() {
    let tree = RouteTree::new();
    tree.write(
        "routes.toml",
        r#"
        [[routes]]
        kind = "group"
        start = "/admin"
        source = "admin.toml"
        options = { middleware = ["auth"] }
        "#,
    )
    .write(
        "admin.toml",
        r#"
        [[routes]]
        kind = "route"
        uri = "/users/:id"
        handler = "Admin@user"
        options = { middleware = ["audit"] }
        "#,
    );

    let router = tree.load("routes.toml").with_labels(true);
    let matched = router.find("get", "/admin/users/9").unwrap();

    assert_eq!(matched.handler().and_then(|h| h.name()), Some("Admin@user"));
    assert_eq!(matched.uri(), "/admin/users/9");
    assert_eq!(matched.parameters().get("id"), Some("9"));
    assert_eq!(matched.option("middleware"), Some(&json!(["audit", "auth"])));
    assert_eq!(matched.option("group"), None);
}

#[test]
fn test_directory_group_loads_every_file() {
    let tree = RouteTree::new();
    tree.write(
        "routes.toml",
        "[[routes]]\nkind = \"group\"\nstart = \"/shop\"\nsource = \"shop\"\n",
    )
    .write("shop/a.toml", "[[routes]]\nkind = \"route\"\nuri = \"/cart\"\nhandler = \"Cart@show\"\n")
    .write("shop/b.toml", "[[routes]]\nkind = \"route\"\nuri = \"/orders\"\nhandler = \"Orders@index\"\n")
    .write("shop/README.md", "not routes");

    let router = tree.load("routes.toml");
    assert_eq!(handler_name(&router, "get", "/shop/cart").as_deref(), Some("Cart@show"));
    assert_eq!(handler_name(&router, "get", "/shop/orders").as_deref(), Some("Orders@index"));
}

#[test]
fn test_nested_groups_and_inherited_catchall() {
    let mut router = Router::new();
    router
        .group(
            "*",
            "/api",
            GroupContext::callable(|api| {
                api.group(
                    "*",
                    "/v1",
                    GroupContext::callable(|v1| {
                        v1.get("/status", "Status@show", ());
                    }),
                    (),
                );
            }),
            (),
        )
        .otherwise("get", "Errors@missing", ());

    assert_eq!(handler_name(&router, "get", "/api/v1/status").as_deref(), Some("Status@show"));
    assert_eq!(handler_name(&router, "get", "/api/v1/other").as_deref(), Some("Errors@missing"));
}

#[test]
fn test_missing_group_file_is_an_error() {
    let tree = RouteTree::new();
    tree.write("admin.toml", "");
    let mut router = tree.router();
    router.group("get", "/admin", "admin.toml", ());
    tree.remove("admin.toml");

    let err = router.find("get", "/admin/users").unwrap_err();
    assert!(matches!(err, RouterError::RouteSourceNotFound { .. }));
}

#[test]
fn test_file_list_group_skips_missing_entries() {
    let tree = RouteTree::new();
    tree.write(
        "exists.toml",
        "[[routes]]\nkind = \"route\"\nuri = \"/report\"\nhandler = \"Reports@show\"\n",
    );
    let mut router = tree.router();
    router.group("get", "/reports", ["exists.toml", "missing.toml"], ());

    let matched = router.find("get", "/reports/report").unwrap();
    assert_eq!(matched.handler().and_then(|h| h.name()), Some("Reports@show"));
    assert_eq!(
        router.routes().routes("get").next().unwrap().options["group"]["type"],
        json!("files")
    );
}

#[test]
fn test_file_list_group_from_route_file() {
    let tree = RouteTree::new();
    tree.write(
        "routes.toml",
        r#"
        [[routes]]
        kind = "group"
        start = "/docs"
        source = ["guide.toml", "gone.toml"]
        "#,
    )
    .write(
        "guide.toml",
        "[[routes]]\nkind = \"route\"\nuri = \"/guide\"\nhandler = \"Docs@guide\"\n",
    );

    let router = tree.load("routes.toml");
    assert_eq!(handler_name(&router, "get", "/docs/guide").as_deref(), Some("Docs@guide"));
    assert!(router.trace().is_ok());
}

#[test]
fn test_malformed_route_file_is_reported() {
    let tree = RouteTree::new();
    tree.write("broken.toml", "[[routes]]\nkind = \"teleport\"\n");
    let mut router = tree.router();
    router.group("get", "/x", "broken.toml", ());

    let err = router.find("get", "/x/y").unwrap_err();
    assert!(matches!(err, RouterError::RouteSourceParse { .. }));
}

#[test]
fn test_negotiation_follows_route_type() {
    let mut router = Router::new().with_content_type("text/html");
    router
        .api("/api/users", "Users", (), ())
        .get("/", "Home@index", ());

    let mut negotiation = Negotiation::new();
    router.dispatch("get", "/", (), &mut negotiation).unwrap();
    assert_eq!(negotiation.content_type(), Some("text/html"));

    let mut negotiation = Negotiation::new();
    let matched = router.dispatch("get", "/api/users/3", (), &mut negotiation).unwrap();
    assert!(matched.is_found());
    assert_eq!(negotiation.content_type(), Some("application/json"));
}

#[test]
fn test_trace_walks_file_groups() {
    let tree = RouteTree::new();
    tree.write(
        "routes.toml",
        r#"
        [[routes]]
        kind = "route"
        uri = "/"
        handler = "Home@index"

        [[routes]]
        kind = "group"
        methods = "get"
        start = "/blog"
        source = "blog.toml"

        [[routes]]
        kind = "otherwise"
        methods = "get"
        handler = "Errors@missing"
        "#,
    )
    .write(
        "blog.toml",
        "[[routes]]\nkind = \"route\"\nuri = \"/:slug\"\nhandler = \"Blog@show\"\n",
    );

    let router = tree.load("routes.toml");
    let trace = router.trace().unwrap();
    let lines: Vec<_> = trace
        .iter()
        .map(|e| (e.method.as_str(), e.uri.as_str(), e.handler.as_str()))
        .collect();

    assert_eq!(
        lines,
        [
            ("get", "/", "Home@index"),
            ("get", "/blog*", "blog.toml"),
            ("get", "/other-wise", "Errors@missing"),
            ("get", "/:slug", "Blog@show"),
        ]
    );
    assert!(trace[1].is_group());
}
