//! Command-line interface implementation for ahoy.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for ahoy.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ahoy Matey!! Start projects faster using skeleton templates",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file, defaults to ~/.ahoyrc
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Noisy console output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Starts a project from a skeleton template
    Start(StartArgs),
    /// Lists which skeleton paths are rendered, copied or ignored
    Inspect(SourceArgs),
}

/// Where the skeleton comes from.
#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Skeleton reference: URL or [provider:][origin:]owner/name[#ref]
    #[arg(value_name = "NAME", required_unless_present = "path")]
    pub name: Option<String>,

    /// Path to a local skeleton template
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory the project folder is created in
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Overwrites existing files
    #[arg(short, long)]
    pub force: bool,

    /// Read answers as a JSON object from stdin
    #[arg(short, long)]
    pub stdin: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
