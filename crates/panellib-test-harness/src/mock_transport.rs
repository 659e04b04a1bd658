//! Mock transport for deterministic testing without hardware.
//!
//! [`MockTransport`] implements the [`Transport`] trait with scripted
//! replies and an inspectable [`Journal`] of everything the exchange logic
//! did to it. Because the session consumes the transport as a boxed trait
//! object, the journal is shared: grab a [`JournalHandle`] before handing
//! the mock over, then assert on counters afterwards.
//!
//! # Example
//!
//! ```
//! use panellib_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! mock.push_reply(b"OKOK");
//! let journal = mock.journal();
//! // ... move `mock` into the code under test ...
//! assert_eq!(journal.opens(), 0);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use panellib_core::error::{Error, Result};
use panellib_core::transport::Transport;

/// Record of everything a [`MockTransport`] was asked to do.
#[derive(Debug, Default, Clone)]
pub struct Journal {
    /// Successful open transitions (failed or redundant opens not counted).
    pub opens: usize,
    /// Close calls that actually released an open port.
    pub closes: usize,
    /// Buffer clear operations.
    pub clears: usize,
    /// Read attempts issued, whether or not they produced bytes.
    pub reads: usize,
    /// Every byte sequence successfully written, in order.
    pub writes: Vec<Vec<u8>>,
}

/// Cloneable read handle onto a mock's [`Journal`].
#[derive(Debug, Clone)]
pub struct JournalHandle(Arc<Mutex<Journal>>);

impl JournalHandle {
    /// A copy of the journal as it stands.
    pub fn snapshot(&self) -> Journal {
        self.0.lock().expect("journal mutex poisoned").clone()
    }

    /// Successful open transitions so far.
    pub fn opens(&self) -> usize {
        self.snapshot().opens
    }

    /// Port releases so far.
    pub fn closes(&self) -> usize {
        self.snapshot().closes
    }

    /// Buffer clears so far.
    pub fn clears(&self) -> usize {
        self.snapshot().clears
    }

    /// Read attempts issued so far.
    pub fn reads(&self) -> usize {
        self.snapshot().reads
    }

    /// Byte sequences written so far, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.snapshot().writes
    }
}

/// A mock [`Transport`] with scripted replies and failure injection.
///
/// Replies are consumed one per `receive()` call, in order; an exhausted
/// queue behaves like a quiet line and returns
/// [`Error::Timeout`]. A reply longer than the caller's buffer spills
/// into the following `receive()` calls.
///
/// The mock starts closed, like real hardware before the first exchange.
#[derive(Debug)]
pub struct MockTransport {
    /// Scripted reply chunks, one per read attempt.
    replies: VecDeque<Vec<u8>>,
    /// Whether the mock is currently "open".
    open: bool,
    /// When set, every `open()` fails with `PortUnavailable`.
    fail_open: bool,
    /// When set, every `send()` fails with an I/O error.
    fail_send: bool,
    /// When set, read attempts beyond this many fail with an I/O error.
    fail_receive_after: Option<usize>,
    /// Shared activity record.
    journal: Arc<Mutex<Journal>>,
}

impl MockTransport {
    /// Create a closed mock with no scripted replies.
    pub fn new() -> Self {
        MockTransport {
            replies: VecDeque::new(),
            open: false,
            fail_open: false,
            fail_send: false,
            fail_receive_after: None,
            journal: Arc::new(Mutex::new(Journal::default())),
        }
    }

    /// Queue one reply chunk, returned by one future `receive()` call.
    ///
    /// Push an empty slice to script a read that returns zero bytes
    /// without timing out.
    pub fn push_reply(&mut self, bytes: &[u8]) {
        self.replies.push_back(bytes.to_vec());
    }

    /// Make every subsequent `open()` fail with
    /// [`Error::PortUnavailable`].
    pub fn fail_open(&mut self) {
        self.fail_open = true;
    }

    /// Make every subsequent `send()` fail with an I/O error.
    pub fn fail_send(&mut self) {
        self.fail_send = true;
    }

    /// Let `n` read attempts succeed, then fail the rest with an I/O
    /// error.
    pub fn fail_receive_after(&mut self, n: usize) {
        self.fail_receive_after = Some(n);
    }

    /// Reply chunks not yet consumed.
    pub fn remaining_replies(&self) -> usize {
        self.replies.len()
    }

    /// A handle onto this mock's activity journal, valid after the mock
    /// itself has been moved into the code under test.
    pub fn journal(&self) -> JournalHandle {
        JournalHandle(Arc::clone(&self.journal))
    }

    fn record<F: FnOnce(&mut Journal)>(&self, f: F) {
        f(&mut self.journal.lock().expect("journal mutex poisoned"));
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn open(&mut self) -> Result<()> {
        if self.fail_open {
            return Err(Error::PortUnavailable("mock open failure".into()));
        }
        if !self.open {
            self.open = true;
            self.record(|j| j.opens += 1);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    async fn clear_buffers(&mut self) -> Result<()> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        self.record(|j| j.clears += 1);
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        if self.fail_send {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock send failure",
            )));
        }
        let data = data.to_vec();
        self.record(|j| j.writes.push(data));
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        if !self.open {
            return Err(Error::NotOpen);
        }

        self.record(|j| j.reads += 1);

        if let Some(limit) = self.fail_receive_after {
            let issued = self.journal.lock().expect("journal mutex poisoned").reads;
            if issued > limit {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "mock receive failure",
                )));
            }
        }

        match self.replies.pop_front() {
            Some(reply) => {
                let n = reply.len().min(buf.len());
                buf[..n].copy_from_slice(&reply[..n]);
                if n < reply.len() {
                    // Spill the rest into the next receive call.
                    self.replies.push_front(reply[n..].to_vec());
                }
                Ok(n)
            }
            None => Err(Error::Timeout),
        }
    }

    async fn close(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            self.record(|j| j.closes += 1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_closed_with_empty_journal() {
        let mock = MockTransport::new();
        assert!(!mock.is_open());

        let journal = mock.journal().snapshot();
        assert_eq!(journal.opens, 0);
        assert_eq!(journal.closes, 0);
        assert_eq!(journal.reads, 0);
        assert!(journal.writes.is_empty());
    }

    #[tokio::test]
    async fn open_close_cycle_is_journaled() {
        let mut mock = MockTransport::new();
        let journal = mock.journal();

        mock.open().await.unwrap();
        assert!(mock.is_open());
        // Redundant open is a no-op and not counted.
        mock.open().await.unwrap();
        assert_eq!(journal.opens(), 1);

        mock.close().await.unwrap();
        assert!(!mock.is_open());
        // Redundant close likewise.
        mock.close().await.unwrap();
        assert_eq!(journal.closes(), 1);
    }

    #[tokio::test]
    async fn scripted_reply_round_trip() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OKOK");
        mock.open().await.unwrap();

        let mut buf = [0u8; 10];
        let n = mock
            .receive(&mut buf, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"OKOK");
        assert_eq!(mock.remaining_replies(), 0);
    }

    #[tokio::test]
    async fn exhausted_replies_time_out() {
        let mut mock = MockTransport::new();
        mock.open().await.unwrap();

        let mut buf = [0u8; 10];
        let err = mock
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout));
        assert_eq!(mock.journal().reads(), 1);
    }

    #[tokio::test]
    async fn oversized_reply_spills_into_next_receive() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"0123456789ABC");
        mock.open().await.unwrap();

        let mut buf = [0u8; 10];
        let n = mock
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"0123456789");

        let n = mock
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"ABC");
    }

    #[tokio::test]
    async fn empty_reply_reads_zero_bytes_without_timeout() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"");
        mock.open().await.unwrap();

        let mut buf = [0u8; 10];
        let n = mock
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn fail_open_reports_port_unavailable() {
        let mut mock = MockTransport::new();
        mock.fail_open();
        let journal = mock.journal();

        let err = mock.open().await.unwrap_err();
        assert!(matches!(err, Error::PortUnavailable(_)));
        assert!(!mock.is_open());
        assert_eq!(journal.opens(), 0);
    }

    #[tokio::test]
    async fn operations_while_closed_fail_with_not_open() {
        let mut mock = MockTransport::new();

        assert!(matches!(
            mock.send(&[0x01]).await.unwrap_err(),
            Error::NotOpen
        ));
        let mut buf = [0u8; 4];
        assert!(matches!(
            mock.receive(&mut buf, Duration::from_millis(10))
                .await
                .unwrap_err(),
            Error::NotOpen
        ));
        assert!(matches!(
            mock.clear_buffers().await.unwrap_err(),
            Error::NotOpen
        ));
    }

    #[tokio::test]
    async fn writes_are_journaled_in_order() {
        let mut mock = MockTransport::new();
        let journal = mock.journal();
        mock.open().await.unwrap();

        mock.send(&[0x69, 0x53, 0x43]).await.unwrap();
        mock.send(&[0x69, 0x76, 0x20]).await.unwrap();

        let writes = journal.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], vec![0x69, 0x53, 0x43]);
        assert_eq!(writes[1], vec![0x69, 0x76, 0x20]);
    }

    #[tokio::test]
    async fn fail_send_records_no_write() {
        let mut mock = MockTransport::new();
        mock.fail_send();
        let journal = mock.journal();
        mock.open().await.unwrap();

        let err = mock.send(&[0x69]).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(journal.writes().is_empty());
    }

    #[tokio::test]
    async fn fail_receive_after_lets_earlier_reads_through() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OK");
        mock.fail_receive_after(1);
        mock.open().await.unwrap();

        let mut buf = [0u8; 10];
        let n = mock
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"OK");

        let err = mock
            .receive(&mut buf, Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(mock.journal().reads(), 2);
    }

    #[tokio::test]
    async fn journal_handle_outlives_moved_mock() {
        let mut mock = MockTransport::new();
        let journal = mock.journal();

        // Simulate the mock being consumed by code under test.
        let mut boxed: Box<dyn Transport> = Box::new(mock);
        boxed.open().await.unwrap();
        boxed.send(&[0xAA]).await.unwrap();
        boxed.close().await.unwrap();
        drop(boxed);

        assert_eq!(journal.opens(), 1);
        assert_eq!(journal.closes(), 1);
        assert_eq!(journal.writes(), vec![vec![0xAA]]);
    }
}
