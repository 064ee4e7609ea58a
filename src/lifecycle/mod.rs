//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build route table → Start listener
//!
//! Reload (startup.rs):
//!     Config watcher update → Rebuild route table → Atomic swap
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listener
//! - A failed reload never replaces a working table

pub mod signals;
pub mod startup;
