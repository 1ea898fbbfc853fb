//! Replace-usage command implementation
//!
//! For every group listed in a positions file (`mapgrouppos.xml`), sets the
//! `name` of the group's `<usage>` element in a prototype file
//! (`mapgroupproto.xml`). Groups without a usage element are left alone.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use xml_keysync::orchestrator::{self, OutputOptions};
use xml_keysync::output::Marker;
use xml_keysync::usage::{
    AttributeUpdate, DEFAULT_GROUP_TAG, DEFAULT_USAGE_ATTRIBUTE, DEFAULT_USAGE_ELEMENT,
};

use crate::cli::Context;

/// Arguments for the replace-usage command
#[derive(Args, Debug)]
pub struct ReplaceUsageArgs {
    /// File listing the groups to update (e.g. mapgrouppos.xml)
    #[arg(long, value_name = "PATH")]
    pub pos_file: PathBuf,

    /// The target XML file, rewritten in place (e.g. mapgroupproto.xml)
    #[arg(long, value_name = "PATH")]
    pub target_file: PathBuf,

    /// New usage name
    #[arg(long, value_name = "NAME")]
    pub usage: String,

    /// Tag of the records to match
    #[arg(long, value_name = "TAG", default_value = DEFAULT_GROUP_TAG)]
    pub record_tag: String,

    /// Nested element carrying the attribute
    #[arg(long, value_name = "TAG", default_value = DEFAULT_USAGE_ELEMENT)]
    pub element: String,

    /// Attribute to set on the nested element
    #[arg(long, value_name = "NAME", default_value = DEFAULT_USAGE_ATTRIBUTE)]
    pub attribute: String,

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

/// Execute the replace-usage command
pub fn execute(args: ReplaceUsageArgs, ctx: &Context) -> Result<()> {
    let update = AttributeUpdate {
        record_tag: args.record_tag.clone(),
        element: args.element.clone(),
        attribute: args.attribute.clone(),
        value: args.usage.clone(),
    };
    let output = OutputOptions {
        dry_run: args.dry_run,
        backup: !args.no_backup,
        backup_dir: ctx.profile.backup_directory(),
    };

    let out = &ctx.output;
    if !args.quiet {
        println!(
            "{} Setting <{} {}=\"{}\"> for groups of {} in {}",
            out.marker(Marker::Start),
            args.element,
            args.attribute,
            args.usage,
            args.pos_file.display(),
            args.target_file.display()
        );
        if args.dry_run {
            println!("{} DRY RUN - the target will not be changed", out.marker(Marker::DryRun));
        }
    }

    let outcome =
        match orchestrator::replace_usage(&args.pos_file, &args.target_file, &update, &output) {
            Ok(outcome) => outcome,
            Err(e) => {
                if !args.quiet {
                    println!("{} Replace failed", out.marker(Marker::Failure));
                }
                return Err(e.into());
            }
        };

    if !args.quiet {
        let report = &outcome.report;
        println!("Number of listed groups: {}", report.members);
        println!("Number of updated groups: {}", report.updated);
        println!("Number of groups without <{}>: {}", args.element, report.skipped);
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
