//! Vendor code tables for panellib.
//!
//! This crate carries the protocol knowledge for the supported display
//! controller families:
//!
//! - **Tables** ([`tables`]) -- the per-vendor symbolic-key to hex-command
//!   mappings, reproduced verbatim from the control documentation, defined
//!   as factory functions ([`avermedia()`], [`ktc()`]).
//! - **Registry** ([`registry`]) -- [`CodeTableRegistry`], the immutable,
//!   injectable catalogue that resolves `(variant, key)` to wire bytes.
//!
//! Variants differ only in data, never in behavior; adding a controller
//! family means adding a table, not code.

pub mod registry;
pub mod tables;

// Re-export the primary types for ergonomic `use panellib_codes::*`.
pub use registry::CodeTableRegistry;
pub use tables::{all_tables, avermedia, ktc, CodeTable};
