//! Reposource command-line front end.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::report::{Format, check, load_catalog, resolve};

#[derive(Parser)]
#[command(name = "reposource")]
#[command(version)]
#[command(
    about = "Validate git repository definitions and resolve their local URIs",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every definition of a catalog and print its URI
    #[clap(visible_alias = "c")]
    Check {
        /// Catalog document holding a `repos` or `service.repos` section
        file: PathBuf,
        /// Document format, inferred from the extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },
    /// Print the canonical URI of one definition
    #[clap(visible_alias = "r")]
    Resolve {
        /// Catalog document holding a `repos` or `service.repos` section
        file: PathBuf,
        /// Name of the definition
        name: String,
        /// Document format, inferred from the extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr, results to stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Check { file, format } => {
            let catalog = load_catalog(&file, format)?;
            let lines = check(&catalog)?;

            for line in &lines {
                println!("{}", line);
            }

            let invalid = lines.iter().filter(|line| !line.is_ok()).count();
            if invalid > 0 {
                tracing::warn!("{} of {} definitions are invalid", invalid, lines.len());
                return Ok(ExitCode::FAILURE);
            }

            tracing::info!("All {} definitions are valid", lines.len());
            Ok(ExitCode::SUCCESS)
        },
        Commands::Resolve { file, name, format } => {
            let catalog = load_catalog(&file, format)?;
            println!("{}", resolve(&catalog, &name)?);
            Ok(ExitCode::SUCCESS)
        },
    }
}
