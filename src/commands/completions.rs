//! Completions command implementation
//!
//! Prints a completion script for `xml-keysync`, or writes it to a file with
//! `--output`:
//!
//! ```bash
//! xml-keysync completions bash --output ~/.local/share/bash-completion/completions/xml-keysync
//! xml-keysync completions zsh > ~/.zfunc/_xml-keysync
//! ```

use anyhow::{Context as _, Result};
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_script(args.shell, &mut file)?;
            log::info!("Wrote {} completions to {}", args.shell, path.display());
        }
        None => write_script(args.shell, &mut io::stdout().lock())?,
    }
    Ok(())
}

fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    out.flush()?;
    Ok(())
}
