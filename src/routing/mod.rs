//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup, or inside a group source):
//!     router.rs (on / get / group / otherwise / resource / api)
//!     → pattern.rs (template → anchored expression + labels)
//!     → table.rs (method → ordered key → RouteDefinition)
//!
//! Dispatch (per request):
//!     dispatcher.rs (first structural match, else catch-all)
//!     → group record? resolver.rs loads the source into a fresh scope
//!       (loader.rs, declaration.rs) and dispatch repeats on the remainder
//!     → negotiation.rs (content type + headers)
//!     → matched.rs (MatchResult returned to the caller)
//!
//! Listing:
//!     trace.rs walks routes, catch-alls and groups depth-first
//! ```
//!
//! # Design Decisions
//! - First match wins, in registration order; no specificity scoring
//! - Group scopes are built per dispatch and never mutate the live table
//! - Options are plain JSON objects merged by the rules in options.rs

pub mod declaration;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod loader;
pub mod matched;
pub mod negotiation;
pub mod options;
pub mod pattern;
pub mod resolver;
pub mod router;
pub mod source;
pub mod table;
pub mod trace;

pub use declaration::{Declaration, RouteFile};
pub use error::{RouterError, RouterResult};
pub use handler::{Endpoint, Handler, RouteCallback, RouteSource};
pub use loader::{RegistryLoader, RouteLoader, TomlLoader};
pub use matched::{MatchResult, Parameters};
pub use negotiation::{Headers, Negotiation};
pub use options::{IntoOptions, Options};
pub use pattern::CompiledPattern;
pub use router::{Router, RouterSettings, Sources};
pub use source::{GroupContext, GroupMetadata, PathResolver, SourceType};
pub use table::{Methods, RouteDefinition, RouteTable, Uris};
pub use trace::TraceEntry;
