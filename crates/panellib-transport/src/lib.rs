//! Transport implementations for panellib.
//!
//! This crate provides the concrete implementation of the
//! [`Transport`](panellib_core::Transport) trait from `panellib-core`:
//!
//! - [`SerialTransport`]: USB virtual COM ports and RS-232 serial
//!   connections, via `tokio-serial`
//!
//! The line framing is fixed by the controller protocol and exposed as
//! constants ([`DATA_BITS`], [`STOP_BITS`], [`PARITY`], [`FLOW_CONTROL`]);
//! only the speed varies, defaulting to [`DEFAULT_BAUD`].

pub mod serial;

pub use serial::{SerialTransport, DATA_BITS, DEFAULT_BAUD, FLOW_CONTROL, PARITY, STOP_BITS};
