//! The serial exchange session.
//!
//! [`SerialSession`] performs one request/response exchange per call:
//! open the port, clear stale bytes, write the command, give the panel's
//! controller time to start answering, drain a fixed number of read
//! attempts, close the port, and classify whatever came back.
//!
//! The pacing is dictated by the hardware. These controllers answer with
//! no terminator or length header, and an answer can arrive in several
//! small chunks, so the read loop always runs its full attempt count and
//! concatenates everything; returning early on the first bytes would drop
//! multi-chunk tails. The settle delay before the first read exists
//! because the panel firmware needs a moment before it produces any reply
//! at all; reading immediately tends to find a silent line even when the
//! device would have answered.
//!
//! The port is never held between calls. Each exchange reopens it and
//! releases it on every exit path, so a crashed or retried exchange never
//! leaves a stale handle behind.

use std::fmt;
use std::time::Duration;

use panellib_codes::CodeTableRegistry;
use panellib_core::error::{Error, Result};
use panellib_core::response::ResponseOutcome;
use panellib_core::transport::Transport;
use panellib_core::wire::WireCommand;

/// Pause between the write and the first read attempt.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Read attempts drained per exchange.
pub const DEFAULT_READ_ATTEMPTS: u32 = 4;

/// Byte budget for a single read attempt.
pub const DEFAULT_READ_CHUNK: usize = 10;

/// How long a single read attempt waits for data.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// How long a write may take before the exchange is abandoned.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// One serial endpoint plus the exchange pacing configuration.
///
/// Built via [`SessionBuilder`](crate::SessionBuilder). The session owns
/// its transport and registry; nothing is shared, and calls are strictly
/// sequential.
pub struct SerialSession {
    transport: Box<dyn Transport>,
    registry: CodeTableRegistry,
    settle_delay: Duration,
    read_attempts: u32,
    read_chunk: usize,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl fmt::Debug for SerialSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The transport is a trait object with no Debug bound; show the
        // pacing configuration and elide the rest.
        f.debug_struct("SerialSession")
            .field("settle_delay", &self.settle_delay)
            .field("read_attempts", &self.read_attempts)
            .field("read_chunk", &self.read_chunk)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .finish_non_exhaustive()
    }
}

impl SerialSession {
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        registry: CodeTableRegistry,
        settle_delay: Duration,
        read_attempts: u32,
        read_chunk: usize,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Self {
        SerialSession {
            transport,
            registry,
            settle_delay,
            read_attempts,
            read_chunk,
            read_timeout,
            write_timeout,
        }
    }

    /// The registry this session resolves keys against.
    pub fn registry(&self) -> &CodeTableRegistry {
        &self.registry
    }

    /// Upper bound on how long one exchange can take, approximately
    /// write timeout + settle delay + attempts x read timeout.
    ///
    /// Open and close overhead is not included; on a healthy system it is
    /// negligible next to the settle delay.
    pub fn worst_case_latency(&self) -> Duration {
        self.write_timeout + self.settle_delay + self.read_timeout * self.read_attempts
    }

    /// Resolve a symbolic key against the registry and transmit it.
    ///
    /// Resolution failures ([`Error::UnknownVariant`],
    /// [`Error::UnknownKey`]) propagate unchanged and happen before any
    /// port activity: a bad key never opens the port.
    pub async fn send_key(&mut self, variant: &str, key: &str) -> Result<ResponseOutcome> {
        let command = self.registry.resolve_key(variant, key)?;
        tracing::debug!(variant, key, command = %command, "resolved key");
        self.send_raw(&command).await
    }

    /// Transmit raw command bytes and collect the classified response.
    ///
    /// One full exchange: open (if needed), clear buffers, write, settle,
    /// drain the read attempts, close. The port is closed on every exit
    /// path; an I/O failure mid-exchange still releases the handle before
    /// surfacing.
    pub async fn send_raw(&mut self, command: &WireCommand) -> Result<ResponseOutcome> {
        if !self.transport.is_open() {
            self.transport.open().await?;
        }

        // The port is held from here; every path below must release it.
        let exchanged = self.exchange(command).await;
        let closed = self.transport.close().await;

        // An exchange failure is the interesting one to surface.
        let outcome = exchanged?;
        closed?;
        Ok(outcome)
    }

    async fn exchange(&mut self, command: &WireCommand) -> Result<ResponseOutcome> {
        self.transport.clear_buffers().await?;

        tokio::time::timeout(self.write_timeout, self.transport.send(command.as_bytes()))
            .await
            .map_err(|_| Error::Timeout)??;

        tracing::trace!(
            delay_ms = self.settle_delay.as_millis() as u64,
            "settling before first read"
        );
        tokio::time::sleep(self.settle_delay).await;

        let mut raw = Vec::new();
        for attempt in 1..=self.read_attempts {
            let mut chunk = vec![0u8; self.read_chunk];
            match self.transport.receive(&mut chunk, self.read_timeout).await {
                Ok(n) => {
                    tracing::trace!(attempt, bytes = n, "read attempt complete");
                    raw.extend_from_slice(&chunk[..n]);
                }
                Err(Error::Timeout) => {
                    // A quiet attempt is normal; the loop still runs to
                    // its full count.
                    tracing::trace!(attempt, "read attempt saw no data");
                }
                Err(e) => return Err(e),
            }
        }

        let outcome = ResponseOutcome::from_raw(raw);
        tracing::debug!(
            command = %command,
            class = ?outcome.class(),
            response_bytes = outcome.raw_bytes().len(),
            "exchange complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionBuilder;
    use panellib_core::ResponseClass;
    use panellib_test_harness::MockTransport;

    /// Builder with pacing shrunk so the suite runs in milliseconds.
    fn fast_builder() -> SessionBuilder {
        SessionBuilder::new(CodeTableRegistry::builtin())
            .settle_delay(Duration::from_millis(1))
            .read_timeout(Duration::from_millis(5))
    }

    fn fast_session(mock: MockTransport) -> SerialSession {
        fast_builder().build_with_transport(Box::new(mock)).unwrap()
    }

    #[tokio::test]
    async fn acknowledged_key_exchange() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OKOK");
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let outcome = session.send_key("AverMedia", "POWER_ON").await.unwrap();

        assert_eq!(outcome.class(), ResponseClass::Acknowledged);
        assert_eq!(outcome.text(), "OKOK");
        assert_eq!(journal.writes(), vec![vec![0x69, 0x53, 0x43]]);
        assert_eq!(journal.clears(), 1);
    }

    #[tokio::test]
    async fn read_loop_always_drains_full_attempt_count() {
        // Data on the first attempt must not short-circuit the rest.
        let mut mock = MockTransport::new();
        mock.push_reply(b"OKOK");
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let outcome = session.send_key("AverMedia", "MUTE").await.unwrap();

        assert_eq!(outcome.class(), ResponseClass::Acknowledged);
        assert_eq!(journal.reads(), 4);
    }

    #[tokio::test]
    async fn response_chunks_concatenate_across_attempts() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OK");
        mock.push_reply(b"OK");
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let outcome = session.send_key("KTC", "GET_VOLUME").await.unwrap();

        // The sentinel only exists once the chunks are joined.
        assert_eq!(outcome.text(), "OKOK");
        assert_eq!(outcome.class(), ResponseClass::Acknowledged);
        assert_eq!(journal.reads(), 4);
    }

    #[tokio::test]
    async fn silent_device_yields_empty_outcome() {
        let mock = MockTransport::new();
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let outcome = session.send_key("AverMedia", "POWER_OFF").await.unwrap();

        assert_eq!(outcome.class(), ResponseClass::Empty);
        assert_eq!(outcome.text(), "");
        assert_eq!(journal.reads(), 4);
    }

    #[tokio::test]
    async fn rejected_command() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"NGNG");

        let mut session = fast_session(mock);
        let outcome = session.send_key("KTC", "BLANK").await.unwrap();

        assert_eq!(outcome.class(), ResponseClass::Rejected);
    }

    #[tokio::test]
    async fn boot_noise_classifies_as_other() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"U-Boot 2017");

        let mut session = fast_session(mock);
        let outcome = session.send_key("AverMedia", "SOURCE").await.unwrap();

        assert_eq!(outcome.class(), ResponseClass::Other);
        assert_eq!(outcome.text(), "U-Boot 2017");
    }

    #[tokio::test]
    async fn garbled_bytes_classify_as_other_not_error() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[0xFF, 0xFE, 0xFD]);

        let mut session = fast_session(mock);
        let outcome = session.send_key("AverMedia", "ENTER").await.unwrap();

        assert_eq!(outcome.class(), ResponseClass::Other);
        assert_eq!(outcome.raw_bytes(), &[0xFF, 0xFE, 0xFD]);
        assert_eq!(outcome.raw_hex(), "FF FE FD");
    }

    #[tokio::test]
    async fn port_closed_after_successful_exchange() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OKOK");
        let journal = mock.journal();

        let mut session = fast_session(mock);
        session.send_key("AverMedia", "POWER_ON").await.unwrap();

        assert_eq!(journal.opens(), 1);
        assert_eq!(journal.closes(), 1);
    }

    #[tokio::test]
    async fn port_closed_when_read_fails_mid_loop() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OK");
        mock.fail_receive_after(2);
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let err = session.send_key("AverMedia", "POWER_ON").await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert_eq!(journal.opens(), 1);
        assert_eq!(journal.closes(), 1);
    }

    #[tokio::test]
    async fn port_closed_when_write_fails() {
        let mut mock = MockTransport::new();
        mock.fail_send();
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let err = session.send_key("AverMedia", "POWER_ON").await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(journal.writes().is_empty());
        assert_eq!(journal.opens(), 1);
        assert_eq!(journal.closes(), 1);
    }

    #[tokio::test]
    async fn unknown_key_never_touches_the_port() {
        let mock = MockTransport::new();
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let err = session.send_key("KTC", "NONEXISTENT").await.unwrap_err();

        assert!(matches!(err, Error::UnknownKey { .. }));
        assert_eq!(journal.opens(), 0);
        assert_eq!(journal.reads(), 0);
        assert!(journal.writes().is_empty());
    }

    #[tokio::test]
    async fn unknown_variant_never_touches_the_port() {
        let mock = MockTransport::new();
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let err = session.send_key("Samsung", "POWER_ON").await.unwrap_err();

        assert!(matches!(err, Error::UnknownVariant(_)));
        assert_eq!(journal.opens(), 0);
    }

    #[tokio::test]
    async fn failed_open_reports_port_unavailable_with_no_writes() {
        let mut mock = MockTransport::new();
        mock.fail_open();
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let command = WireCommand::from_hex("69 53 43").unwrap();
        let err = session.send_raw(&command).await.unwrap_err();

        assert!(matches!(err, Error::PortUnavailable(_)));
        assert!(journal.writes().is_empty());
        assert_eq!(journal.opens(), 0);
        assert_eq!(journal.closes(), 0);
    }

    #[tokio::test]
    async fn send_raw_transmits_exactly_the_given_bytes() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OKOK");
        let journal = mock.journal();

        let mut session = fast_session(mock);
        let command = WireCommand::from_hex("89 15 53 0E").unwrap();
        session.send_raw(&command).await.unwrap();

        assert_eq!(journal.writes(), vec![vec![0x89, 0x15, 0x53, 0x0E]]);
    }

    #[tokio::test]
    async fn configured_attempt_count_is_respected() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OKOK");
        let journal = mock.journal();

        let mut session = fast_builder()
            .read_attempts(2)
            .build_with_transport(Box::new(mock))
            .unwrap();
        session.send_key("AverMedia", "POWER_ON").await.unwrap();

        assert_eq!(journal.reads(), 2);
    }

    #[tokio::test]
    async fn consecutive_exchanges_reopen_the_port() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OKOK");
        let journal = mock.journal();

        let mut session = fast_session(mock);
        session.send_key("AverMedia", "POWER_ON").await.unwrap();
        session.send_key("AverMedia", "POWER_OFF").await.unwrap();

        assert_eq!(journal.opens(), 2);
        assert_eq!(journal.closes(), 2);
        assert_eq!(journal.writes().len(), 2);
    }

    #[tokio::test]
    async fn worst_case_latency_adds_up() {
        let mock = MockTransport::new();
        let session = SessionBuilder::new(CodeTableRegistry::builtin())
            .write_timeout(Duration::from_millis(1000))
            .settle_delay(Duration::from_millis(500))
            .read_attempts(4)
            .read_timeout(Duration::from_millis(100))
            .build_with_transport(Box::new(mock))
            .unwrap();

        assert_eq!(session.worst_case_latency(), Duration::from_millis(1900));
    }

    #[test]
    fn default_constants_match_the_protocol() {
        assert_eq!(DEFAULT_SETTLE_DELAY, Duration::from_millis(500));
        assert_eq!(DEFAULT_READ_ATTEMPTS, 4);
        assert_eq!(DEFAULT_READ_CHUNK, 10);
        assert_eq!(DEFAULT_READ_TIMEOUT, Duration::from_millis(100));
        assert_eq!(DEFAULT_WRITE_TIMEOUT, Duration::from_secs(1));
    }
}
