//! surfkit CLI - build, document and install a Surfingkeys configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "surfkit")]
#[command(about = "Build, document and install a Surfingkeys configuration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to surfkit.toml config file
    #[arg(short, long, default_value = "surfkit.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default surfkit.toml and README template
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Create the private config from its example if missing
    CheckPriv,

    /// Remove build outputs and bundler caches
    Clean,

    /// Lint the configuration scripts
    Lint,

    /// Regenerate README.md from its template
    Readme {
        /// Fail if README.md is out of date instead of writing it
        #[arg(long)]
        check: bool,
    },

    /// Lint, document and bundle the configuration (default)
    Build,

    /// Build and copy the artifact into the home directory
    Install {
        /// Install into this directory instead of the home directory (relative to the project root)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Rebuild and reinstall whenever sources change
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command.unwrap_or(Commands::Build) {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::CheckPriv => {
            commands::check_priv::run(&cli.config).await?;
        }
        Commands::Clean => {
            commands::clean::run(&cli.config).await?;
        }
        Commands::Lint => {
            commands::lint::run(&cli.config).await?;
        }
        Commands::Readme { check } => {
            commands::readme::run(&cli.config, check).await?;
        }
        Commands::Build => {
            commands::build::run(&cli.config).await?;
        }
        Commands::Install { dir } => {
            commands::install::run(&cli.config, dir).await?;
        }
        Commands::Watch => {
            commands::watch::run(&cli.config).await?;
        }
    }

    Ok(())
}
