use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use datasnap::{commands, core::config::Config, logging};

#[derive(Parser)]
#[clap(name = "datasnap")]
#[clap(about = "Download Kaggle datasets and preview their CSV files")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to a datasnap.toml (default: ./datasnap.toml if present)
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[clap(short, long, global = true)]
    quiet: bool,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and extract a dataset
    Download {
        /// Dataset identifier, owner/dataset[@version] (default: from config)
        dataset: Option<String>,
        /// Target directory (default: the raw data directory)
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Print the first rows of a CSV file
    Preview {
        /// CSV file to preview
        path: PathBuf,
        /// Number of rows to show (default: from config)
        #[clap(short = 'n', long)]
        rows: Option<usize>,
    },
    /// Print the first rows of a file in the processed data directory
    PreviewOutput {
        /// File name inside the processed data directory
        filename: String,
        /// Number of rows to show (default: from config)
        #[clap(short = 'n', long)]
        rows: Option<usize>,
    },
    /// Download the configured dataset, then preview input and output
    Run {
        /// Exit with an error if any step failed
        #[clap(long)]
        strict: bool,
    },
    /// Write a default datasnap.toml and create the data directories
    Init {
        /// Overwrite an existing datasnap.toml
        #[clap(long)]
        force: bool,
    },
    /// Check data directories and Kaggle credentials
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = execute(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).map_err(|e| anyhow::anyhow!(e))
}

fn execute(cli: Cli) -> Result<()> {
    // init runs before any datasnap.toml exists, so config is loaded per arm
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            commands::init::init_project(&cwd, force)
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Download { dataset, dir } => {
            let config = load_config(config_path)?;
            commands::download::download_dataset(&config, dataset.as_deref(), dir.as_deref())
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Preview { path, rows } => {
            let config = load_config(config_path)?;
            commands::preview::preview_file(&path, rows.unwrap_or(config.preview_rows))
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!(e))
        }
        Commands::PreviewOutput { filename, rows } => {
            let config = load_config(config_path)?;
            commands::preview::preview_output(&config, &filename, rows.unwrap_or(config.preview_rows))
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Run { strict } => {
            let config = load_config(config_path)?;
            let summary = commands::run::run_pipeline(&config);
            if strict && summary.failures() > 0 {
                return Err(anyhow::anyhow!("{} step(s) failed", summary.failures()));
            }
            Ok(())
        }
        Commands::Doctor => {
            let config = load_config(config_path)?;
            commands::doctor::check_environment(&config)
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!(e))
        }
    }
}
