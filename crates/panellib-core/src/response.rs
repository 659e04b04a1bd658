//! Response accumulation and classification.
//!
//! Controllers answer with short free-form text. Only two sentinel strings
//! carry defined meaning: [`ACK_SENTINEL`] for an accepted command and
//! [`REJECT_SENTINEL`] for a refused one. Everything else is preserved
//! as-is because it still has diagnostic value: an [`Other`] outcome often
//! just means the panel is mid-boot and spewing console noise, and a
//! caller may decide to wait and retry.
//!
//! Classification is deliberately loose substring matching, never strict
//! parsing. The ambiguity of [`Other`] is a first-class category, not a
//! failure.
//!
//! [`Other`]: ResponseClass::Other

use crate::wire::format_hex;

/// Response text that marks a command as accepted.
pub const ACK_SENTINEL: &str = "OKOK";

/// Response text that marks a command as refused.
pub const REJECT_SENTINEL: &str = "NGNG";

/// Coarse classification of accumulated response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// The device accepted the command (response contained `"OKOK"`).
    Acknowledged,
    /// The device refused the command (response contained `"NGNG"`).
    Rejected,
    /// No bytes arrived at all. The device is unreachable, powered off,
    /// or not yet listening.
    Empty,
    /// Bytes arrived but matched no sentinel, or did not decode as UTF-8.
    /// Commonly boot-time noise from the controller's Android side.
    Other,
}

/// The accumulated response from one request/response exchange.
///
/// Holds both the raw bytes and the decoded text so that callers can show
/// a byte-level diagnostic when the text is garbled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOutcome {
    raw: Vec<u8>,
    text: String,
    class: ResponseClass,
}

impl ResponseOutcome {
    /// Classify raw accumulated bytes.
    ///
    /// Never fails: bytes that are not valid UTF-8 are decoded lossily and
    /// classified as [`ResponseClass::Other`], with the raw bytes kept for
    /// diagnostics. Sentinel matching only applies to cleanly decoded
    /// text, so a corrupted response is never mistaken for an
    /// acknowledgement.
    pub fn from_raw(raw: Vec<u8>) -> Self {
        if raw.is_empty() {
            return ResponseOutcome {
                raw,
                text: String::new(),
                class: ResponseClass::Empty,
            };
        }

        match std::str::from_utf8(&raw) {
            Ok(text) => {
                let class = if text.contains(ACK_SENTINEL) {
                    ResponseClass::Acknowledged
                } else if text.contains(REJECT_SENTINEL) {
                    ResponseClass::Rejected
                } else {
                    ResponseClass::Other
                };
                let text = text.to_string();
                ResponseOutcome { raw, text, class }
            }
            Err(_) => {
                let text = String::from_utf8_lossy(&raw).into_owned();
                ResponseOutcome {
                    raw,
                    text,
                    class: ResponseClass::Other,
                }
            }
        }
    }

    /// The classification of this response.
    pub fn class(&self) -> ResponseClass {
        self.class
    }

    /// The decoded response text (lossy where the bytes were not UTF-8).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The raw accumulated bytes, exactly as read off the line.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The raw bytes as uppercase space-separated hex, for diagnostics.
    pub fn raw_hex(&self) -> String {
        format_hex(&self.raw)
    }

    /// Convenience check for [`ResponseClass::Acknowledged`].
    pub fn is_acknowledged(&self) -> bool {
        self.class == ResponseClass::Acknowledged
    }
}
