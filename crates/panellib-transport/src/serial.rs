//! Serial port transport for display controller communication.
//!
//! This module provides [`SerialTransport`], which implements the
//! [`Transport`] trait for USB virtual COM ports and physical RS-232
//! connections to display controllers.
//!
//! The line parameters other than speed are fixed by the controller
//! protocol (8 data bits, no parity, 1 stop bit, no flow control), so the
//! transport only takes a port path and a baud rate. Construction does not
//! touch the hardware; the port is opened on [`Transport::open`] and can be
//! reopened after a close, which matches the scoped open/exchange/close
//! pattern these panels require.
//!
//! # Example
//!
//! ```no_run
//! use panellib_transport::{SerialTransport, DEFAULT_BAUD};
//! use panellib_core::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> panellib_core::Result<()> {
//! let mut transport = SerialTransport::new("/dev/ttyUSB0", DEFAULT_BAUD);
//! transport.open().await?;
//! transport.clear_buffers().await?;
//! transport.send(&[0x69, 0x53, 0x43]).await?;
//!
//! let mut buf = [0u8; 10];
//! let n = transport.receive(&mut buf, Duration::from_millis(100)).await?;
//! transport.close().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialStream};

use panellib_core::error::{Error, Result};
use panellib_core::transport::Transport;

/// Default line speed for these controllers.
pub const DEFAULT_BAUD: u32 = 38_400;

/// Data bits, fixed by the controller protocol.
pub const DATA_BITS: tokio_serial::DataBits = tokio_serial::DataBits::Eight;

/// Stop bits, fixed by the controller protocol.
pub const STOP_BITS: tokio_serial::StopBits = tokio_serial::StopBits::One;

/// Parity, fixed by the controller protocol.
pub const PARITY: tokio_serial::Parity = tokio_serial::Parity::None;

/// Flow control, fixed by the controller protocol (none, in either
/// direction).
pub const FLOW_CONTROL: tokio_serial::FlowControl = tokio_serial::FlowControl::None;

/// Serial port transport for display controllers.
///
/// Implements the [`Transport`] trait with the open/close lifecycle owned
/// by the caller. The same instance can go through any number of
/// open/close cycles.
pub struct SerialTransport {
    /// The underlying serial port stream while open.
    port: Option<SerialStream>,
    /// Port path for opening and for logging.
    port_name: String,
    /// Line speed to open with.
    baud_rate: u32,
}

impl SerialTransport {
    /// Create a transport bound to a port path and baud rate.
    ///
    /// Does not open the port; that happens on [`Transport::open`].
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g. "/dev/ttyUSB0" on Linux, "COM3"
    ///   on Windows)
    /// * `baud_rate` - Line speed (the panels ship configured for
    ///   [`DEFAULT_BAUD`])
    pub fn new(port: &str, baud_rate: u32) -> Self {
        SerialTransport {
            port: None,
            port_name: port.to_string(),
            baud_rate,
        }
    }

    /// The port path this transport opens.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// The configured line speed.
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn open(&mut self) -> Result<()> {
        if self.port.is_some() {
            return Ok(());
        }

        tracing::debug!(
            port = %self.port_name,
            baud_rate = self.baud_rate,
            "opening serial port"
        );

        let stream = tokio_serial::new(&self.port_name, self.baud_rate)
            .data_bits(DATA_BITS)
            .stop_bits(STOP_BITS)
            .parity(PARITY)
            .flow_control(FLOW_CONTROL)
            .open_native_async()
            .map_err(|e| {
                tracing::warn!(port = %self.port_name, error = %e, "failed to open serial port");
                Error::PortUnavailable(format!("{}: {e}", self.port_name))
            })?;

        self.port = Some(stream);
        tracing::debug!(port = %self.port_name, "serial port open");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    async fn clear_buffers(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotOpen)?;

        port.clear(ClearBuffer::All).map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "failed to clear buffers");
            Error::Io(e.into())
        })?;

        tracing::trace!(port = %self.port_name, "cleared input and output buffers");
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotOpen)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = ?data,
            "writing command bytes"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "failed to write");
            Error::Io(e)
        })?;

        // Push the bytes out now; the settle delay starts after the write,
        // not after the OS gets around to draining its buffer.
        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "failed to flush after write");
            Error::Io(e)
        })?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotOpen)?;

        let result = tokio::time::timeout(timeout, port.read(buf)).await;

        match result {
            Ok(Ok(n)) => {
                tracing::trace!(
                    port = %self.port_name,
                    bytes = n,
                    data = ?&buf[..n],
                    "received data"
                );
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(port = %self.port_name, error = %e, "failed to read");
                Err(Error::Io(e))
            }
            Err(_) => {
                tracing::trace!(
                    port = %self.port_name,
                    timeout_ms = timeout.as_millis() as u64,
                    "no data within read timeout"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(port = %self.port_name, "closing serial port");

            // Best effort; the handle is released either way when the
            // stream drops below.
            if let Err(e) = port.flush().await {
                tracing::warn!(port = %self.port_name, error = %e, "flush on close failed");
            }
        }

        Ok(())
    }
}

// The OS handle is released when the stream drops, but an open port at
// drop time means some exchange skipped its close.
impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.port.is_some() {
            tracing::debug!(port = %self.port_name, "SerialTransport dropped while open");
        }
    }
}
