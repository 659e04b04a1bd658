//! panellib-core: Core traits, types, and error definitions for panellib.
//!
//! This crate defines the vendor-agnostic abstractions shared by the rest
//! of the workspace. Front ends and code-table crates depend on these
//! types without pulling in any serial I/O.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level endpoint with an open/close lifecycle
//! - [`WireCommand`] -- a command's raw bytes plus the hex text form
//! - [`ResponseOutcome`] / [`ResponseClass`] -- classified exchange result
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod response;
pub mod transport;
pub mod wire;

// Re-export key types at crate root for ergonomic `use panellib_core::*`.
pub use error::{Error, Result};
pub use response::{ResponseClass, ResponseOutcome, ACK_SENTINEL, REJECT_SENTINEL};
pub use transport::Transport;
pub use wire::{format_hex, WireCommand};
