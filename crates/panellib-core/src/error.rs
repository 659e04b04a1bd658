//! Error types for panellib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Registry lookups, transport faults,
//! and response decode problems are all captured here.

/// The error type for all panellib operations.
///
/// Variants cover the full range of failure modes encountered when
/// driving a display controller over a serial line: bad lookups against
/// the code tables, port-level failures, timeouts, and response decode
/// problems. Every variant is recoverable at the call boundary; the
/// library never terminates the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The named device variant does not exist in the code table registry.
    #[error("unknown display variant: {0}")]
    UnknownVariant(String),

    /// The symbolic key is not present in the selected variant's table.
    ///
    /// This is an expected condition, not a fault: not every controller
    /// family implements every key.
    #[error("unknown key {key:?} for variant {variant:?}")]
    UnknownKey {
        /// Variant whose table was consulted.
        variant: String,
        /// Key that was requested.
        key: String,
    },

    /// Opening the serial port failed.
    ///
    /// The caller decides whether to retry or abort; nothing was written
    /// to the device.
    #[error("port unavailable: {0}")]
    PortUnavailable(String),

    /// Response bytes did not decode as UTF-8 text.
    ///
    /// The exchange path downgrades this to an ambiguous outcome carrying
    /// the raw bytes, since even garbled noise is diagnostically useful.
    /// The variant exists so front ends can match on it where it is
    /// surfaced directly.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A wire command hex string did not decode to bytes.
    #[error("invalid hex command: {0}")]
    InvalidHex(String),

    /// An invalid parameter was passed when configuring a session.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Timed out waiting for data within a single read attempt.
    #[error("timeout waiting for response")]
    Timeout,

    /// The port is not open.
    #[error("port not open")]
    NotOpen,

    /// An underlying I/O error during write or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
