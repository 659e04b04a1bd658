// panelctl -- command-line remote control for AverMedia and KTC display
// panels over RS-232.
//
// Usage:
//   panelctl tables
//   panelctl keys --table KTC
//   panelctl send --table AverMedia --key POWER_ON --port /dev/ttyUSB0
//   panelctl send --table ktc --key get_volume --port COM3 -vv
//   panelctl send --table AverMedia --key POWER_ON --mock
//   panelctl raw "69 53 43" --port /dev/ttyUSB0
//
// Table and key names are matched case-insensitively here at the CLI
// boundary; the library itself is exact-string.

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use panellib::codes::{CodeTable, CodeTableRegistry};
use panellib::session::{SerialSession, SessionBuilder};
use panellib::transport::DEFAULT_BAUD;
use panellib::{ResponseClass, ResponseOutcome, WireCommand};
use panellib_test_harness::MockTransport;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// panelctl -- sends remote-control commands to display panels over serial.
#[derive(Parser)]
#[command(name = "panelctl", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the supported code tables.
    Tables,

    /// List every key in one code table, with its command bytes.
    Keys {
        /// Code table name (e.g. AverMedia, KTC).
        #[arg(short, long)]
        table: String,
    },

    /// Resolve a key against a code table and send it to the panel.
    Send {
        /// Code table name (e.g. AverMedia, KTC).
        #[arg(short, long)]
        table: String,

        /// Key name (e.g. POWER_ON, TO_HDMI1, GET_VOLUME).
        #[arg(short, long)]
        key: String,

        /// Serial port path (e.g. /dev/ttyUSB0, COM3).
        /// Required unless --mock is used.
        #[arg(short, long)]
        port: Option<String>,

        /// Override the default 38400 baud rate.
        #[arg(long)]
        baud: Option<u32>,

        /// Use a mock transport instead of a real serial port.
        /// Useful for verifying CLI parsing and key resolution without
        /// hardware; the mock panel never answers.
        #[arg(long)]
        mock: bool,
    },

    /// Send raw command bytes, bypassing the code tables.
    Raw {
        /// Space-separated hex bytes (e.g. "69 53 43").
        hex: String,

        /// Serial port path (e.g. /dev/ttyUSB0, COM3).
        /// Required unless --mock is used.
        #[arg(short, long)]
        port: Option<String>,

        /// Override the default 38400 baud rate.
        #[arg(long)]
        baud: Option<u32>,

        /// Use a mock transport instead of a real serial port.
        #[arg(long)]
        mock: bool,
    },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map counted -v flags onto a tracing level and install the subscriber.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Look up a code table by name (case-insensitive).
fn lookup_table<'a>(registry: &'a CodeTableRegistry, name: &str) -> Result<&'a CodeTable> {
    let canonical = registry
        .variants()
        .into_iter()
        .find(|v| v.eq_ignore_ascii_case(name));
    match canonical.and_then(|v| registry.table(v)) {
        Some(table) => Ok(table),
        None => bail!(
            "unknown table '{}'. Supported tables: {}",
            name,
            registry.variants().join(", ")
        ),
    }
}

/// Match a key against a table (case-insensitive), returning the exact name.
fn lookup_key(table: &CodeTable, key: &str) -> Result<&'static str> {
    match table
        .keys()
        .into_iter()
        .find(|k| k.eq_ignore_ascii_case(key))
    {
        Some(k) => Ok(k),
        None => bail!(
            "unknown key '{}' for table {}. Run `panelctl keys --table {}` for the full list",
            key,
            table.variant,
            table.variant
        ),
    }
}

/// Report how the panel answered, one line per exchange.
fn print_outcome(outcome: &ResponseOutcome, elapsed: Duration) {
    let ms = elapsed.as_millis();
    match outcome.class() {
        ResponseClass::Acknowledged => {
            println!("Acknowledged (OKOK) in {ms} ms");
        }
        ResponseClass::Rejected => {
            println!("Rejected (NGNG) in {ms} ms");
        }
        ResponseClass::Empty => {
            println!("No response after {ms} ms (the panel may still have acted)");
        }
        ResponseClass::Other => {
            println!("Ambiguous reply in {ms} ms: {:?}", outcome.text());
            println!("Raw bytes: {}", outcome.raw_hex());
        }
    }
}

// ---------------------------------------------------------------------------
// Session construction
// ---------------------------------------------------------------------------

/// Construct a session from CLI arguments, wiring either a mock or a real
/// serial transport. The port is opened per exchange, not here.
fn build_session(
    registry: CodeTableRegistry,
    port: Option<&str>,
    baud: Option<u32>,
    mock: bool,
) -> Result<SerialSession> {
    let mut builder = SessionBuilder::new(registry);
    if let Some(baud) = baud {
        builder = builder.baud_rate(baud);
    }

    if mock {
        println!("Using mock transport (no hardware attached)");
        Ok(builder.build_with_transport(Box::new(MockTransport::new()))?)
    } else {
        let port = port.context("--port is required when not using --mock")?;
        println!("Using {} at {} baud", port, baud.unwrap_or(DEFAULT_BAUD));
        Ok(builder.serial_port(port).build()?)
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_tables(registry: &CodeTableRegistry) -> Result<()> {
    let variants = registry.variants();

    let name_width = variants
        .iter()
        .map(|v| v.len())
        .max()
        .unwrap_or(8)
        .max(8);

    println!("{:<name_width$}  {:>4}", "Table", "Keys");
    println!("{:<name_width$}  {:>4}", "-".repeat(name_width), "----");

    for variant in &variants {
        let count = registry.keys(variant).len();
        println!("{variant:<name_width$}  {count:>4}");
    }

    println!();
    println!("{} table(s) supported.", variants.len());

    Ok(())
}

fn cmd_keys(registry: &CodeTableRegistry, table_name: &str) -> Result<()> {
    let table = lookup_table(registry, table_name)?;

    let key_width = table
        .keys()
        .iter()
        .map(|k| k.len())
        .max()
        .unwrap_or(8)
        .max(8);

    println!("{} code table", table.variant);
    println!();
    println!("{:<key_width$}  Command", "Key");
    println!("{:<key_width$}  -----------", "-".repeat(key_width));

    for (key, hex) in table.entries() {
        println!("{key:<key_width$}  {hex}");
    }

    println!();
    println!("{} key(s).", table.len());

    Ok(())
}

async fn cmd_send(session: &mut SerialSession, variant: &str, key: &str) -> Result<()> {
    println!(
        "Sending {variant}/{key} (worst case {} ms)...",
        session.worst_case_latency().as_millis()
    );

    let start = Instant::now();
    let outcome = session.send_key(variant, key).await?;
    print_outcome(&outcome, start.elapsed());

    Ok(())
}

async fn cmd_raw(session: &mut SerialSession, hex: &str) -> Result<()> {
    let command = WireCommand::from_hex(hex)?;

    println!(
        "Sending raw command {command} (worst case {} ms)...",
        session.worst_case_latency().as_millis()
    );

    let start = Instant::now();
    let outcome = session.send_raw(&command).await?;
    print_outcome(&outcome, start.elapsed());

    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = CodeTableRegistry::builtin();

    match &cli.command {
        Command::Tables => cmd_tables(&registry),
        Command::Keys { table } => cmd_keys(&registry, table),
        Command::Send {
            table,
            key,
            port,
            baud,
            mock,
        } => {
            let code_table = lookup_table(&registry, table)?;
            let variant = code_table.variant;
            let key = lookup_key(code_table, key)?;

            let mut session = build_session(registry.clone(), port.as_deref(), *baud, *mock)?;
            cmd_send(&mut session, variant, key).await
        }
        Command::Raw {
            hex,
            port,
            baud,
            mock,
        } => {
            let mut session = build_session(registry.clone(), port.as_deref(), *baud, *mock)?;
            cmd_raw(&mut session, hex).await
        }
    }
}
