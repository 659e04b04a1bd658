//! Transport trait for display controller communication.
//!
//! The [`Transport`] trait abstracts over the serial endpoint so the
//! exchange logic can run against real hardware or the mock transport in
//! `panellib-test-harness`.
//!
//! Unlike a long-lived connection, exchanges with these controllers are
//! scoped: the session opens the endpoint, performs one write/read cycle,
//! and closes it again. The trait therefore exposes the full open / clear /
//! write / read / close lifecycle rather than assuming an endpoint that is
//! connected on construction.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a display controller.
///
/// Implementations handle the physical layer only; command selection,
/// pacing, and response classification are the session's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the endpoint.
    ///
    /// Opening an endpoint that is already open is a no-op. A failed open
    /// returns [`Error::PortUnavailable`](crate::error::Error::PortUnavailable)
    /// and leaves the endpoint closed.
    async fn open(&mut self) -> Result<()>;

    /// Whether the endpoint is currently open.
    fn is_open(&self) -> bool;

    /// Discard anything buffered in both directions.
    ///
    /// Controllers emit boot-time noise on the line; stale bytes from a
    /// prior partial exchange must not leak into the next response.
    async fn clear_buffers(&mut self) -> Result<()>;

    /// Write raw bytes to the device.
    ///
    /// Implementations should not return until the bytes have been handed
    /// to the underlying endpoint (serial TX buffer flushed).
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read bytes from the device into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Waits up to `timeout`
    /// for data to arrive; returns
    /// [`Error::Timeout`](crate::error::Error::Timeout) if nothing arrived
    /// within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the endpoint.
    ///
    /// Closing an endpoint that is already closed is a no-op. After
    /// `close()`, `send()` and `receive()` return
    /// [`Error::NotOpen`](crate::error::Error::NotOpen) until the next
    /// `open()`.
    async fn close(&mut self) -> Result<()>;
}
