use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use spotifetch::clients::errors::Result;

use crate::{logging, pipeline};

#[derive(Parser)]
#[command(name = "spotifetch")]
#[command(version, about = "Download audio for Spotify playlist tracks from YouTube", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for a playlist URL and download audio for all of its tracks
    Download {
        /// Root directory for downloaded audio, one subdirectory per playlist
        #[arg(long, default_value = "downloads")]
        output_dir: PathBuf,

        /// Additionally append log lines to this file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Log authentication failures and continue instead of exiting
        #[arg(long)]
        soft_auth: bool,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            output_dir,
            log_file,
            soft_auth,
        } => {
            logging::init(log_file.as_deref())?;
            spawn_interrupt_handler();
            download_tracks(output_dir, !soft_auth).await?;
        }
    }
    Ok(())
}

async fn download_tracks(output_dir: PathBuf, fatal_auth_failure: bool) -> Result<()> {
    info!("Building config ...");
    let config = pipeline::ConfigBuilder::new()
        .download_root(output_dir)
        .fatal_auth_failure(fatal_auth_failure)
        .build()?;
    let mut pipeline = pipeline::Pipeline::new(config);
    pipeline.run().await
}

// SIGINT logs and terminates immediately; an in-flight download is not given
// a chance to complete or clean up partial output files.
fn spawn_interrupt_handler() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Process interrupted. Cleaning up...");
            std::process::exit(0);
        }
    });
}
