//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use xml_keysync::config::Profile;
use xml_keysync::output::OutputConfig;

use crate::commands;

/// xml-keysync - Synchronize keyed game-server XML files
#[derive(Parser, Debug)]
#[command(name = "xml-keysync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace) [default: profile setting, then info]
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Configuration profile to use
    #[arg(long, global = true, value_name = "NAME", env = "XML_KEYSYNC_PROFILE")]
    profile: Option<String>,

    /// Directory holding profile files
    #[arg(long, global = true, value_name = "PATH")]
    profile_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy an element's value from a source types file into a target types file
    CopyValues(commands::copy_values::CopyValuesArgs),

    /// Set the usage of every group listed in a positions file
    ReplaceUsage(commands::replace_usage::ReplaceUsageArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub profile: Profile,
    pub output: OutputConfig,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let profile = Profile::load(self.profile.as_deref(), self.profile_dir.as_deref())?;

        let level = match self.log_level.as_deref() {
            Some(level) => level
                .parse::<LevelFilter>()
                .with_context(|| format!("Invalid log level '{}'", level))?,
            None => profile.log_level().unwrap_or(LevelFilter::Info),
        };
        init_logging(level);

        match (&self.profile, &profile.source) {
            (_, Some(source)) => log::debug!("Loaded profile from {}", source.display()),
            (Some(name), None) => {
                log::warn!("Profile '{}' not found. Using empty configuration.", name)
            }
            (None, None) => {}
        }

        let ctx = Context {
            profile,
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::CopyValues(args) => commands::copy_values::execute(args, &ctx),
            Commands::ReplaceUsage(args) => commands::replace_usage::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();
    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
}
