//! CLI argument definitions for the form sharing tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use formshare_model::InclusionFlags;

#[derive(Parser)]
#[command(
    name = "formshare",
    version,
    about = "Prepare form definitions for export to another environment",
    long_about = "Prepare form definitions for export to another environment.\n\n\
                  Strips environment-local provider and location attributes from the\n\
                  markup and lists every concept, drug, location, program and person\n\
                  the form depends on."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the sanitized form and its dependency manifest.
    Share(ShareArgs),

    /// Print the sanitized markup to stdout.
    Strip(FormArgs),

    /// List dependencies without writing files.
    Scan(FormArgs),
}

#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Output directory (default: the form's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct FormArgs {
    /// Path to the form markup file.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Directory of metadata CSV files (falls back to FORMSHARE_CATALOG_DIR).
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    #[command(flatten)]
    pub inclusion: InclusionArgs,
}

#[derive(Args)]
pub struct InclusionArgs {
    /// Skip concepts referenced through SOURCE:CODE mappings.
    #[arg(long = "no-mapped-concepts")]
    pub no_mapped_concepts: bool,

    /// Skip drugs referenced by name in drugNames.
    #[arg(long = "no-drugs-by-name")]
    pub no_drugs_by_name: bool,

    /// Strip encounter location defaults and skip location dependencies.
    #[arg(long = "no-locations")]
    pub no_locations: bool,

    /// Keep encounter provider defaults and roles.
    #[arg(long = "include-providers")]
    pub include_providers: bool,
}

impl InclusionArgs {
    pub fn flags(&self) -> InclusionFlags {
        InclusionFlags::default()
            .with_mapped_concepts(!self.no_mapped_concepts)
            .with_drugs_by_name(!self.no_drugs_by_name)
            .with_locations(!self.no_locations)
            .with_providers(self.include_providers)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
