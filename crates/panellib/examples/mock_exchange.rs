//! Run a full exchange against a scripted mock, no hardware needed.
//!
//! Shows the builder's transport injection point and the journal the
//! mock keeps. Handy for seeing the exchange lifecycle (open, clear,
//! write, read x4, close) before pointing the library at a real panel.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p panellib --example mock_exchange
//! ```

use std::time::Duration;

use panellib::codes::CodeTableRegistry;
use panellib::session::SessionBuilder;
use panellib_test_harness::MockTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut mock = MockTransport::new();
    mock.push_reply(b"OK");
    mock.push_reply(b"OK");
    let journal = mock.journal();

    // Shrink the pacing so the example finishes instantly.
    let mut session = SessionBuilder::new(CodeTableRegistry::builtin())
        .settle_delay(Duration::from_millis(1))
        .read_timeout(Duration::from_millis(5))
        .build_with_transport(Box::new(mock))?;

    let outcome = session.send_key("AverMedia", "POWER_ON").await?;

    println!("Class:     {:?}", outcome.class());
    println!("Text:      {:?}", outcome.text());
    println!("Raw bytes: {}", outcome.raw_hex());
    println!();
    println!("Journal:");
    println!("  opens:  {}", journal.opens());
    println!("  clears: {}", journal.clears());
    println!("  writes: {:?}", journal.writes());
    println!("  reads:  {}", journal.reads());
    println!("  closes: {}", journal.closes());

    Ok(())
}
