//! Wire command representation and the hex text format.
//!
//! Display controllers are driven by short fixed byte patterns with no
//! checksum, length prefix, or terminator. Commands are human-authored as
//! space-separated hex octets (`"69 53 43"`) and decoded to raw bytes
//! before transmission; [`WireCommand`] holds the decoded form and can
//! render the canonical text form back out for logs and diagnostics.

use std::fmt;

use crate::error::{Error, Result};

/// The raw byte sequence transmitted to the display for one command.
///
/// Observed commands are 3 or 4 bytes, but length is not enforced beyond
/// being non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireCommand(Vec<u8>);

impl WireCommand {
    /// Wrap an already-decoded byte sequence.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        WireCommand(bytes)
    }

    /// Parse the canonical space-separated hex form.
    ///
    /// Fails with [`Error::InvalidHex`] if any token is not a hex octet or
    /// the string contains no tokens at all.
    ///
    /// # Example
    ///
    /// ```
    /// use panellib_core::wire::WireCommand;
    ///
    /// let cmd = WireCommand::from_hex("69 53 43").unwrap();
    /// assert_eq!(cmd.as_bytes(), &[0x69, 0x53, 0x43]);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = Vec::new();
        for token in s.split_whitespace() {
            let b = u8::from_str_radix(token, 16)
                .map_err(|_| Error::InvalidHex(format!("bad octet {token:?} in {s:?}")))?;
            bytes.push(b);
        }
        if bytes.is_empty() {
            return Err(Error::InvalidHex(format!("no octets in {s:?}")));
        }
        Ok(WireCommand(bytes))
    }

    /// The raw bytes to transmit.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the command.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the command is empty. Construction via [`from_hex`]
    /// guarantees non-empty, but `from_bytes` does not.
    ///
    /// [`from_hex`]: Self::from_hex
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical text form: uppercase hex octets separated by spaces.
    pub fn to_hex(&self) -> String {
        format_hex(&self.0)
    }
}

impl fmt::Display for WireCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Format arbitrary bytes as uppercase space-separated hex octets.
///
/// # Example
///
/// ```
/// assert_eq!(panellib_core::wire::format_hex(&[0x89, 0x15, 0x53, 0x0E]), "89 15 53 0E");
/// ```
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
