//! Enumerate every variant and key the builtin tables cover.
//!
//! Useful as a quick reference for what a given panel accepts, and for
//! checking the exact bytes a key resolves to without any hardware
//! attached.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p panellib --example list_keys
//! ```

use panellib::codes::all_tables;

fn main() {
    for table in all_tables() {
        println!("{} ({} keys)", table.variant, table.len());
        for (key, hex) in table.entries() {
            println!("  {key:<16} {hex}");
        }
        println!();
    }
}
