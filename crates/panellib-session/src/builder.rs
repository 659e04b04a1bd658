//! Fluent construction of a [`SerialSession`].
//!
//! The builder carries the code-table registry plus every pacing knob the
//! exchange loop uses. Defaults match the hardware's documented timing;
//! tests shrink them so suites run fast.
//!
//! ```no_run
//! use panellib_codes::CodeTableRegistry;
//! use panellib_session::SessionBuilder;
//!
//! # fn main() -> panellib_core::Result<()> {
//! let session = SessionBuilder::new(CodeTableRegistry::builtin())
//!     .serial_port("/dev/ttyUSB0")
//!     .build()?;
//! # let _ = session;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use panellib_codes::CodeTableRegistry;
use panellib_core::error::{Error, Result};
use panellib_core::transport::Transport;
use panellib_transport::{SerialTransport, DEFAULT_BAUD};

use crate::session::{
    SerialSession, DEFAULT_READ_ATTEMPTS, DEFAULT_READ_CHUNK, DEFAULT_READ_TIMEOUT,
    DEFAULT_SETTLE_DELAY, DEFAULT_WRITE_TIMEOUT,
};

/// Builder for [`SerialSession`].
///
/// Two terminal calls: [`build`](SessionBuilder::build) wires up a real
/// serial transport from the configured port name, while
/// [`build_with_transport`](SessionBuilder::build_with_transport) accepts
/// any [`Transport`] and is how tests inject a mock.
pub struct SessionBuilder {
    registry: CodeTableRegistry,
    serial_port: Option<String>,
    baud_rate: u32,
    settle_delay: Duration,
    read_attempts: u32,
    read_chunk: usize,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl SessionBuilder {
    /// Start a builder over the given registry with default pacing.
    pub fn new(registry: CodeTableRegistry) -> Self {
        SessionBuilder {
            registry,
            serial_port: None,
            baud_rate: DEFAULT_BAUD,
            settle_delay: DEFAULT_SETTLE_DELAY,
            read_attempts: DEFAULT_READ_ATTEMPTS,
            read_chunk: DEFAULT_READ_CHUNK,
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Serial device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub fn serial_port(mut self, port: impl Into<String>) -> Self {
        self.serial_port = Some(port.into());
        self
    }

    /// Line speed for [`build`](SessionBuilder::build). Defaults to 38400.
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.baud_rate = baud;
        self
    }

    /// Pause between the write and the first read attempt.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// How many read attempts each exchange drains. Must be at least 1.
    pub fn read_attempts(mut self, attempts: u32) -> Self {
        self.read_attempts = attempts;
        self
    }

    /// Byte budget per read attempt. Must be at least 1.
    pub fn read_chunk(mut self, bytes: usize) -> Self {
        self.read_chunk = bytes;
        self
    }

    /// How long a single read attempt waits before giving up quietly.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// How long a write may take before the exchange is abandoned.
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Build a session over the configured serial port.
    ///
    /// The port is not opened here; each exchange opens and closes it.
    /// Fails with [`Error::InvalidParameter`] if no port was configured
    /// or the pacing knobs are out of range.
    pub fn build(self) -> Result<SerialSession> {
        let port = self
            .serial_port
            .clone()
            .ok_or_else(|| Error::InvalidParameter("serial_port is required for build()".into()))?;
        let transport = SerialTransport::new(&port, self.baud_rate);
        self.build_with_transport(Box::new(transport))
    }

    /// Build a session over an explicit transport.
    pub fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<SerialSession> {
        if self.read_attempts == 0 {
            return Err(Error::InvalidParameter(
                "read_attempts must be at least 1".into(),
            ));
        }
        if self.read_chunk == 0 {
            return Err(Error::InvalidParameter(
                "read_chunk must be at least 1".into(),
            ));
        }
        Ok(SerialSession::new(
            transport,
            self.registry,
            self.settle_delay,
            self.read_attempts,
            self.read_chunk,
            self.read_timeout,
            self.write_timeout,
        ))
    }
}
