//! folio CLI - renders data-driven portfolio sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Render a portfolio site from JSON content documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a portfolio site in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,

        /// Site title (defaults to config or "Portfolio")
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Start development server with live reload
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Load every section document and report how each one renders
    Check {
        /// Exit with an error if any section fails
        #[arg(long)]
        strict: bool,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,
    },
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

    match cli.command {
        Commands::Init { yes, title } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::init::run(&cli.config, &config, yes, title).await?;
        }
        Commands::Dev { port, no_open } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::dev::run(&config, port, !no_open).await?;
        }
        Commands::Build { output, no_minify } => {
            let config = ConfigFile::load(&cli.config)?;
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&config, output, minify).await?;
        }
        Commands::Check { strict } => {
            let config = ConfigFile::load(&cli.config)?;
            commands::check::run(&config, strict).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(port, dir).await?;
        }
    }

    Ok(())
}
