//! panellib-test-harness: Mock transport and test utilities for panellib.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the exchange logic without display hardware. The mock keeps a shared
//! [`Journal`] of opens, closes, clears, reads, and writes so tests can
//! assert on the transport lifecycle after the mock has been consumed by
//! the code under test.

pub mod mock_transport;

pub use mock_transport::{Journal, JournalHandle, MockTransport};
