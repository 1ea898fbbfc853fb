//! # xml-keysync CLI
//!
//! Binary entry point for the `xml-keysync` command-line tool. It parses the
//! arguments with `clap`, sets up logging and dispatches to a command.
//!
//! The synchronization logic lives in the `xml_keysync` library; the binary
//! is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
