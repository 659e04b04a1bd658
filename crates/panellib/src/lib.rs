//! # panellib -- Serial Remote Control for Display Panels
//!
//! `panellib` is an asynchronous Rust library for driving the RS-232
//! remote-control interface of Android-based large-format display
//! panels. It covers the AverMedia and KTC controller boards found in
//! interactive classroom and signage displays: power, input selection,
//! volume, navigation, and the KTC status queries, each expressed as a
//! short hex command on the wire.
//!
//! ## Quick Start
//!
//! Add `panellib` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! panellib = "0.1"
//! tokio = { version = "1", features = ["rt", "macros"] }
//! ```
//!
//! Switch a panel on and check the reply:
//!
//! ```no_run
//! use panellib::codes::CodeTableRegistry;
//! use panellib::session::SessionBuilder;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut session = SessionBuilder::new(CodeTableRegistry::builtin())
//!         .serial_port("/dev/ttyUSB0")
//!         .build()?;
//!
//!     let outcome = session.send_key("AverMedia", "POWER_ON").await?;
//!     if outcome.is_acknowledged() {
//!         println!("panel acknowledged");
//!     } else {
//!         println!("{:?}: {:?}", outcome.class(), outcome.text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                  | Purpose                                         |
//! |------------------------|-------------------------------------------------|
//! | `panellib-core`        | [`Transport`] trait, wire types, errors, response classification |
//! | `panellib-codes`       | Vendor code tables and the [`CodeTableRegistry`](codes::CodeTableRegistry) |
//! | `panellib-transport`   | Serial transport over tokio-serial (38400 8N1)  |
//! | `panellib-session`     | The exchange loop: open, write, settle, drain, close |
//! | **`panellib`**         | This facade crate -- re-exports everything      |
//!
//! Application code holds a [`SerialSession`](session::SerialSession) and
//! calls [`send_key`](session::SerialSession::send_key); everything below
//! that is swappable. Tests swap the serial transport for the mock in
//! `panellib-test-harness`.
//!
//! ## The Exchange Contract
//!
//! Every call is one self-contained exchange. The port is opened, both
//! buffers are cleared, the command bytes are written, the session waits
//! out a settle delay, then drains a fixed number of bounded read
//! attempts and closes the port again. The port is released on every
//! path, including failures, so a session never wedges the device for
//! the next caller.
//!
//! Replies are classified rather than parsed:
//!
//! | Class                                         | Meaning                            |
//! |-----------------------------------------------|------------------------------------|
//! | [`Acknowledged`](ResponseClass::Acknowledged) | reply text contains `OKOK`         |
//! | [`Rejected`](ResponseClass::Rejected)         | reply text contains `NGNG`         |
//! | [`Empty`](ResponseClass::Empty)               | the panel stayed silent            |
//! | [`Other`](ResponseClass::Other)               | anything else, raw bytes preserved |
//!
//! ## Supported Variants
//!
//! - **AverMedia**: power, mute, digits, navigation, volume, channel,
//!   source switching (AV, VGA, YPbPr, HDMI 0-4, OPS), freeze
//! - **KTC**: the same remote keys plus picture/sound mode, sleep timer,
//!   blank, a dozen `GET_*` status queries, and Android launcher
//!   enter/exit

pub use panellib_core::*;

/// Vendor code tables and the registry.
///
/// Provides [`CodeTableRegistry`](codes::CodeTableRegistry) plus the
/// [`avermedia`](codes::avermedia) and [`ktc`](codes::ktc) table
/// constructors. Registries are plain data: build one from the builtin
/// tables or inject your own.
pub mod codes {
    pub use panellib_codes::*;
}

/// Serial transport over tokio-serial.
///
/// Provides [`SerialTransport`](transport::SerialTransport) and the
/// fixed 8N1 framing constants. The panel protocol runs at 38400 baud
/// with no flow control.
pub mod transport {
    pub use panellib_transport::*;
}

/// The exchange session and its builder.
///
/// Provides [`SerialSession`](session::SerialSession) and
/// [`SessionBuilder`](session::SessionBuilder) along with the default
/// pacing constants for the settle delay and read loop.
pub mod session {
    pub use panellib_session::*;
}

/// Returns the names of all display variants the builtin tables cover.
///
/// This is the entry point for applications that need to enumerate
/// variants (e.g. for a picker or a CLI listing). Order matches the
/// registry's table order.
///
/// # Example
///
/// ```
/// for variant in panellib::supported_variants() {
///     println!("{variant}");
/// }
/// ```
pub fn supported_variants() -> Vec<&'static str> {
    codes::all_tables().iter().map(|t| t.variant).collect()
}
