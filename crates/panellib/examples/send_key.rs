//! Basic panel control example.
//!
//! Demonstrates resolving a symbolic key against the builtin code
//! tables, sending it over a real serial port, and reporting how the
//! panel answered.
//!
//! # Requirements
//!
//! - An AverMedia or KTC display panel wired to an RS-232 port
//! - The serial port path adjusted for your system (e.g., `/dev/ttyUSB0`
//!   on Linux, `COM3` on Windows)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p panellib --example send_key
//! ```

use panellib::codes::CodeTableRegistry;
use panellib::session::SessionBuilder;
use panellib::ResponseClass;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Adjust these to match your system and panel.
    let serial_port = "/dev/ttyUSB0";
    let variant = "AverMedia";
    let key = "POWER_ON";

    let mut session = SessionBuilder::new(CodeTableRegistry::builtin())
        .serial_port(serial_port)
        .build()?;

    println!(
        "Sending {}/{} on {} (worst case {} ms)...",
        variant,
        key,
        serial_port,
        session.worst_case_latency().as_millis()
    );

    let outcome = session.send_key(variant, key).await?;

    match outcome.class() {
        ResponseClass::Acknowledged => println!("Acknowledged: {:?}", outcome.text()),
        ResponseClass::Rejected => println!("Rejected: {:?}", outcome.text()),
        ResponseClass::Empty => println!("No response (panel may still have acted)"),
        ResponseClass::Other => {
            println!("Unexpected reply: {:?}", outcome.text());
            println!("Raw bytes: {}", outcome.raw_hex());
        }
    }

    Ok(())
}
