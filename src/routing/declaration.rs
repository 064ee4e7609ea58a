//! Declarative route file format.
//!
//! A route file is an ordered `[[routes]]` array. Each entry names its
//! `kind`; entries are registered top to bottom, so file order is match
//! order.
//!
//! ```toml
//! [[routes]]
//! kind = "route"
//! methods = "get"
//! uri = "/users/:id"
//! handler = "Users@show"
//! options = { middleware = ["auth"] }
//!
//! [[routes]]
//! kind = "group"
//! start = "/admin"
//! source = "routes/admin"
//!
//! [[routes]]
//! kind = "otherwise"
//! handler = "Errors@missing"
//! ```

use serde::{Deserialize, Serialize};

use crate::routing::options::Options;
use crate::routing::router::Router;
use crate::routing::source::GroupContext;
use crate::routing::table::Methods;

/// Parsed route file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteFile {
    #[serde(default)]
    pub routes: Vec<Declaration>,
}

/// One or many strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn items(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(item) => vec![item.as_str()],
            OneOrMany::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

fn any_method() -> OneOrMany {
    OneOrMany::One("*".to_string())
}

fn get_method() -> OneOrMany {
    OneOrMany::One("get".to_string())
}

/// A single entry of a route file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Route {
        #[serde(default = "get_method")]
        methods: OneOrMany,
        uri: OneOrMany,
        handler: String,
        #[serde(default)]
        options: Options,
    },
    Group {
        #[serde(default = "any_method")]
        methods: OneOrMany,
        start: String,
        source: OneOrMany,
        #[serde(default)]
        options: Options,
    },
    Otherwise {
        #[serde(default = "any_method")]
        methods: OneOrMany,
        handler: String,
        #[serde(default)]
        options: Options,
    },
    Resource {
        uri: String,
        target: String,
        #[serde(default)]
        options: Options,
    },
    Api {
        uri: String,
        target: String,
        #[serde(default)]
        settings: Options,
        #[serde(default)]
        actions: Options,
    },
}

impl RouteFile {
    /// Register every declaration against `router`, in order.
    pub fn apply(&self, router: &mut Router) {
        for declaration in &self.routes {
            declaration.apply(router);
        }
    }
}

impl Declaration {
    pub fn apply(&self, router: &mut Router) {
        match self {
            Declaration::Route { methods, uri, handler, options } => {
                router.on(
                    Methods::from(methods.items()),
                    uri.items(),
                    handler.as_str(),
                    options.clone(),
                );
            }
            Declaration::Group { methods, start, source, options } => {
                let context = match source {
                    OneOrMany::One(path) => GroupContext::Path(path.clone()),
                    OneOrMany::Many(paths) => GroupContext::Paths(paths.clone()),
                };
                router.group(Methods::from(methods.items()), start, context, options.clone());
            }
            Declaration::Otherwise { methods, handler, options } => {
                router.otherwise(Methods::from(methods.items()), handler.as_str(), options.clone());
            }
            Declaration::Resource { uri, target, options } => {
                router.resource(uri, target, options.clone());
            }
            Declaration::Api { uri, target, settings, actions } => {
                router.api(uri, target, settings.clone(), actions.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_file() {
        let file: RouteFile = toml::from_str(
            r#"
            [[routes]]
            kind = "route"
            methods = "get,post"
            uri = ["/a", "/b"]
            handler = "Pages@show"
            options = { middleware = ["auth"] }

            [[routes]]
            kind = "group"
            start = "/admin"
            source = ["routes/admin/users.toml", "routes/admin/posts.toml"]

            [[routes]]
            kind = "otherwise"
            handler = "Errors@missing"

            [[routes]]
            kind = "api"
            uri = "/api/widgets"
            target = "Widgets"
            [routes.actions.search]
            cache = 60
            "#,
        )
        .unwrap();

        assert_eq!(file.routes.len(), 4);
        match &file.routes[0] {
            Declaration::Route { methods, uri, options, .. } => {
                assert_eq!(methods, &OneOrMany::One("get,post".into()));
                assert_eq!(uri.items(), ["/a", "/b"]);
                assert_eq!(options["middleware"], serde_json::json!(["auth"]));
            }
            other => panic!("unexpected declaration: {:?}", other),
        }
        match &file.routes[2] {
            Declaration::Otherwise { methods, .. } => assert_eq!(methods, &any_method()),
            other => panic!("unexpected declaration: {:?}", other),
        }
        match &file.routes[3] {
            Declaration::Api { actions, .. } => assert_eq!(actions["search"]["cache"], 60),
            other => panic!("unexpected declaration: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let parsed = toml::from_str::<RouteFile>("[[routes]]\nkind = \"redirect\"\nuri = \"/\"\n");
        assert!(parsed.is_err());
    }
}
