//! Copy-values command implementation
//!
//! Copies one element (e.g. `lifetime`, `nominal`, `restock`) from the types
//! records of a source file into the same-named records of a target file.
//! The source defaults to the profile's `paths.types_file`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use xml_keysync::error::Error;
use xml_keysync::matcher::KeyFilter;
use xml_keysync::orchestrator::{self, OutputOptions};
use xml_keysync::output::Marker;
use xml_keysync::sync::{SyncOptions, DEFAULT_RECORD_TAG};

use crate::cli::Context;

/// Arguments for the copy-values command
#[derive(Args, Debug)]
pub struct CopyValuesArgs {
    /// The XML element to copy (e.g. lifetime)
    #[arg(long, value_name = "NAME")]
    pub element: String,

    /// The target XML file, rewritten in place
    #[arg(long, value_name = "PATH")]
    pub target_file: PathBuf,

    /// The source XML file [default: paths.types_file from the profile]
    #[arg(long, value_name = "PATH")]
    pub src_file: Option<PathBuf>,

    /// Wildcard pattern selecting source type names (e.g. Zmbf*)
    #[arg(long, value_name = "PATTERN")]
    pub type_name: Option<String>,

    /// Tag of the records to match
    #[arg(long, value_name = "TAG", default_value = DEFAULT_RECORD_TAG)]
    pub record_tag: String,

    /// Show what would change without writing the target
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Do not back up the target before overwriting it
    #[arg(long)]
    pub no_backup: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the copy-values command
pub fn execute(args: CopyValuesArgs, ctx: &Context) -> Result<()> {
    let filter = KeyFilter::new(args.type_name.as_deref())?;

    let src_file = match args.src_file.clone().or_else(|| ctx.profile.types_file()) {
        Some(path) => path,
        None => {
            return Err(Error::Profile {
                message: "No source file specified and no 'paths.types_file' configured in profile"
                    .to_string(),
                hint: Some("Pass --src-file or set paths.types_file in the profile".to_string()),
            }
            .into())
        }
    };

    let options = SyncOptions::new(&args.element)
        .with_record_tag(&args.record_tag)
        .with_filter(filter);
    let output = OutputOptions {
        dry_run: args.dry_run,
        backup: !args.no_backup,
        backup_dir: ctx.profile.backup_directory(),
    };

    let out = &ctx.output;
    if !args.quiet {
        println!(
            "{} Copying <{}> from {} into {}",
            out.marker(Marker::Start),
            args.element,
            src_file.display(),
            args.target_file.display()
        );
        if let Some(pattern) = &args.type_name {
            println!("   Type name pattern: {}", pattern);
        }
        if args.dry_run {
            println!("{} DRY RUN - the target will not be changed", out.marker(Marker::DryRun));
        }
    }

    let outcome = match orchestrator::copy_values(&src_file, &args.target_file, &options, &output) {
        Ok(outcome) => outcome,
        Err(e) => {
            if !args.quiet {
                println!("{} Copy failed", out.marker(Marker::Failure));
            }
            return Err(e.into());
        }
    };

    if !args.quiet {
        println!("Number of matched items: {}", outcome.report.matched);
        println!("Number of changed items: {}", outcome.report.changed);
        if outcome.report.created > 0 {
            println!("   ({} newly created)", outcome.report.created);
        }
        if let Some(backup) = &outcome.backup {
            println!("{} Backup: {}", out.marker(Marker::Backup), backup.display());
        }
        if outcome.written {
            println!(
                "{} Saved updated file: {}",
                out.marker(Marker::Success),
                args.target_file.display()
            );
        }
    }

    Ok(())
}
