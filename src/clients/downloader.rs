use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Deserialize;
use tokio::process::Command;

use crate::clients::errors::{Error, Result};

// Single preferred container; no fallback when unavailable
const AUDIO_FORMAT: &str = "m4a";

#[derive(Deserialize)]
struct VideoMetadata {
    title: String,
}

/// Downloads the best audio-only stream of a video via yt-dlp
pub struct AudioFetcher {
    binary: String,
}

impl AudioFetcher {
    pub fn new() -> Self {
        AudioFetcher {
            binary: "yt-dlp".to_string(),
        }
    }

    // Download the best audio-only stream for the given watch URL into
    // `output_dir`, named after the video title. The directory is created
    // recursively when absent.
    pub async fn download_audio(&self, video_url: &str, output_dir: &Path) -> Result<()> {
        let title = self.probe_title(video_url).await?;

        ensure_output_dir(output_dir).await?;

        let template = output_dir.join("%(title)s.%(ext)s");
        let template = template.to_str().ok_or_else(|| Error::Download {
            url: video_url.to_string(),
            reason: "invalid UTF-8 in output path".to_string(),
        })?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!("Downloading: {title}"));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let output = Command::new(&self.binary)
            .args([
                "--format",
                &format!("bestaudio[ext={AUDIO_FORMAT}]"),
                "-o",
                template,
                video_url,
            ])
            .output()
            .await
            .map_err(|e| Error::Download {
                url: video_url.to_string(),
                reason: format!("failed to run {}: {e}", self.binary),
            })?;

        spinner.finish_and_clear();

        if !output.status.success() {
            return Err(Error::Download {
                url: video_url.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Download completed: {title}");
        Ok(())
    }

    // Metadata probe; the title is used only for progress and log messages
    async fn probe_title(&self, video_url: &str) -> Result<String> {
        let output = Command::new(&self.binary)
            .args(["--dump-single-json", "--no-download", video_url])
            .output()
            .await
            .map_err(|e| Error::Download {
                url: video_url.to_string(),
                reason: format!("failed to run {}: {e}", self.binary),
            })?;

        if !output.status.success() {
            return Err(Error::Download {
                url: video_url.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let metadata: VideoMetadata =
            serde_json::from_slice(&output.stdout).map_err(|e| Error::Download {
                url: video_url.to_string(),
                reason: format!("unexpected metadata response: {e}"),
            })?;
        Ok(metadata.title)
    }
}

impl Default for AudioFetcher {
    fn default() -> Self {
        Self::new()
    }
}

async fn ensure_output_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::Download {
            url: dir.display().to_string(),
            reason: format!("failed to create output directory: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::ensure_output_dir;

    #[tokio::test]
    async fn creates_missing_directory_recursively() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("downloads").join("My Playlist");

        ensure_output_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn existing_directory_is_not_an_error() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("downloads");

        ensure_output_dir(&dir).await.unwrap();
        ensure_output_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
    }
}
