//! spdx-tagvalue: SPDX tag-value document parser, validator, and writer.

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use spdx_tagvalue::cli::{self, RenderFormat};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spdx-tagvalue")]
#[command(version)]
#[command(about = "SPDX tag-value document parser and validator", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Document parsed cleanly
    1  Structural errors were found / an error occurred

EXAMPLES:
    # Validate a document and list every structural error
    spdx-tagvalue validate document.spdx

    # Normalize a document (nests files under their packages)
    spdx-tagvalue render document.spdx -O normalized.spdx

    # Convert to JSON for processing
    spdx-tagvalue render document.spdx --format json > document.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a tag-value document and report every structural error
    Validate {
        /// Path to the tag-value document
        path: PathBuf,

        /// Only set the exit code, print nothing
        #[arg(short, long)]
        quiet: bool,
    },

    /// Parse a document and re-emit it as tag-value or JSON
    Render {
        /// Path to the tag-value document
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "tag-value")]
        format: RenderFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Validate { path, quiet } => cli::run_validate(path, quiet),
        Commands::Render {
            path,
            format,
            output_file,
        } => cli::run_render(path, format, output_file),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "spdx-tagvalue", &mut io::stdout());
            Ok(())
        }
    }
}
