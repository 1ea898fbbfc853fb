//! # CLI Command Implementations
//!
//! Each subcommand of `xml-keysync` lives in its own file with:
//! - An `Args` struct deriving `clap::Args`.
//! - An `execute` function taking the parsed arguments and the shared
//!   [`crate::cli::Context`], which calls into the `xml_keysync` library and
//!   prints the run summary.

pub mod completions;
pub mod copy_values;
pub mod replace_usage;
