//! mdindex CLI
//!
//! Builds a cross-referenced JSON search index from a Markdown site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for mdindex.
#[derive(Parser)]
#[command(
    name = "mdindex",
    version,
    about = "Build a JSON search index from Markdown content"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "mdindex.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Index all pages and write the search index
    Build {
        /// Site output directory (overrides site.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Write compact JSON
        #[arg(long)]
        minify: bool,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    mdindex::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, minify } => {
            mdindex::cmd::build::run(&cli.config, output.as_deref(), minify)?;
        }
        Commands::Check { strict } => {
            mdindex::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
