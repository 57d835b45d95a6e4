//! Command-line interface definition for Quill.
//!
//! Quill has a single mode of operation: load the matched packages, render
//! one README per package and write the accepted ones. Flags mirror the
//! configuration file so every setting can be overridden per run.

mod validation;

use std::path::PathBuf;

use clap::Parser;

pub use validation::{EnvAssignments, parse_env, parse_env_assignment};

/// Quill - README generator for documented packages
#[derive(Parser, Debug, Default)]
#[command(
    name = "quill",
    version,
    about = "Render package documentation into README files",
    long_about = "Quill turns the documentation model of each package into a README.md next to\n\
                  its sources. Alert directives such as `NOTE(Target): text` become GitHub\n\
                  callouts, and updates to existing files can be reviewed before they land."
)]
pub struct Cli {
    /// Package directory pattern
    ///
    /// Empty for the root directory, `dir` for one directory, `dir/...` for a
    /// directory and everything below it.
    #[arg(short = 'p', long = "package", value_name = "PATTERN")]
    pub package: Option<String>,

    /// Root directory the pattern is resolved against
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Search subdirectories of the matched directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Ask before overwriting existing README files
    ///
    /// The diff is served on a localhost page and the answer can come from
    /// either the page or the terminal.
    #[arg(short, long)]
    pub confirm: bool,

    /// Environment assignments used to evaluate package constraints
    ///
    /// Example: --env "OS=linux ARCH=amd64"
    #[arg(short, long, value_name = "ASSIGNMENTS", value_parser = parse_env)]
    pub env: Option<EnvAssignments>,

    /// Template file replacing the builtin layout
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Path to the config file (defaults to ./quill.config.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Port of the confirmation page
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Seconds to wait for a confirmation answer
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Do not open the confirmation page in a browser
    #[arg(long)]
    pub no_browser: bool,

    /// Skip the imports section
    #[arg(long)]
    pub skip_imports: bool,

    /// Skip runnable examples
    #[arg(long)]
    pub skip_examples: bool,

    /// Skip variables
    #[arg(long)]
    pub skip_vars: bool,

    /// Skip types
    #[arg(long)]
    pub skip_types: bool,

    /// Skip functions, including constructors listed under types
    #[arg(long)]
    pub skip_funcs: bool,

    /// Skip constants
    #[arg(long)]
    pub skip_consts: bool,

    /// Skip the source file listing
    #[arg(long)]
    pub skip_filenames: bool,

    /// Skip methods listed under types
    #[arg(long)]
    pub skip_methods: bool,

    /// Skip members without documentation
    #[arg(long)]
    pub skip_empty: bool,

    /// Render only the package title, documentation and alerts
    #[arg(long)]
    pub skip_all: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
