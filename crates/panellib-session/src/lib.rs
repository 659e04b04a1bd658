//! Exchange orchestration for panel control.
//!
//! This crate owns the request/response lifecycle: resolve a key to its
//! wire bytes, open the serial port, write, wait out the settle delay,
//! drain a fixed number of read attempts, close the port, and classify
//! the reply. See [`SerialSession`] for the exchange contract and
//! [`SessionBuilder`] for construction.
//!
//! ```no_run
//! use panellib_codes::CodeTableRegistry;
//! use panellib_session::SessionBuilder;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> panellib_core::Result<()> {
//! let mut session = SessionBuilder::new(CodeTableRegistry::builtin())
//!     .serial_port("/dev/ttyUSB0")
//!     .build()?;
//!
//! let outcome = session.send_key("AverMedia", "POWER_ON").await?;
//! println!("{:?}: {}", outcome.class(), outcome.text());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod session;

pub use builder::SessionBuilder;
pub use session::{
    SerialSession, DEFAULT_READ_ATTEMPTS, DEFAULT_READ_CHUNK, DEFAULT_READ_TIMEOUT,
    DEFAULT_SETTLE_DELAY, DEFAULT_WRITE_TIMEOUT,
};
