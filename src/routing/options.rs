//! Route options and their merge rules.
//!
//! Options are an open JSON object. Two keys are understood by the router
//! itself: `group` (attached by [`Router::group`](crate::routing::Router::group))
//! and `type` / `headers` (content negotiation). Everything else is carried
//! through untouched for the caller.
//!
//! # Merge rules
//! - [`merge_recursive`]: objects merge key by key, arrays concatenate
//!   (base values first), anything else is replaced by the overlay.
//! - [`merge_shallow`]: top-level keys of the overlay replace the base.

use serde_json::{Map, Value};

/// Options attached to a route declaration or passed to a dispatch.
pub type Options = Map<String, Value>;

/// Conversion into [`Options`] so registration calls accept `()`, a JSON
/// object built with `json!`, or a ready map.
pub trait IntoOptions {
    fn into_options(self) -> Options;
}

impl IntoOptions for Options {
    fn into_options(self) -> Options {
        self
    }
}

impl IntoOptions for () {
    fn into_options(self) -> Options {
        Options::new()
    }
}

impl IntoOptions for Value {
    /// Non-object values carry no options.
    fn into_options(self) -> Options {
        match self {
            Value::Object(map) => map,
            _ => Options::new(),
        }
    }
}

impl IntoOptions for Option<Options> {
    fn into_options(self) -> Options {
        self.unwrap_or_default()
    }
}

/// Merge `overlay` into `base`. Array-valued keys accumulate.
pub fn merge_recursive(mut base: Options, overlay: Options) -> Options {
    for (key, incoming) in overlay {
        match base.get_mut(&key) {
            Some(slot) => {
                let existing = slot.take();
                *slot = merge_values(existing, incoming);
            }
            None => {
                base.insert(key, incoming);
            }
        }
    }
    base
}

fn merge_values(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            Value::Object(merge_recursive(existing, incoming))
        }
        (Value::Array(mut existing), Value::Array(incoming)) => {
            existing.extend(incoming);
            Value::Array(existing)
        }
        (_, incoming) => incoming,
    }
}

/// Top-level merge: keys present in `overlay` win.
pub fn merge_shallow(mut base: Options, overlay: Options) -> Options {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}
