use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, error, info, warn};
use spotifetch::clients::entities::Track;
use spotifetch::clients::errors::Result;
use spotifetch::clients::{AudioFetcher, CatalogClient, VideoLookup};

// Configuration for the Pipeline struct
pub struct Config {
    pub catalog: CatalogClient,
    pub lookup: VideoLookup,
    pub fetcher: AudioFetcher,
    pub download_root: PathBuf,
    pub fatal_auth_failure: bool,
}

pub struct ConfigBuilder {
    catalog: Option<CatalogClient>,
    lookup: Option<VideoLookup>,
    fetcher: Option<AudioFetcher>,
    download_root: Option<PathBuf>,
    fatal_auth_failure: Option<bool>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            lookup: None,
            fetcher: None,
            download_root: None,      // Defaults to ./downloads
            fatal_auth_failure: None, // Defaults to true, the stricter policy
        }
    }

    pub fn download_root(mut self, root: PathBuf) -> Self {
        self.download_root = Some(root);
        self
    }

    pub fn fatal_auth_failure(mut self, fatal: bool) -> Self {
        self.fatal_auth_failure = Some(fatal);
        self
    }

    pub fn build(self) -> Result<Config> {
        let catalog = match self.catalog {
            Some(c) => c,
            None => CatalogClient::try_default()?,
        };
        Ok(Config {
            catalog,
            lookup: self.lookup.unwrap_or_default(),
            fetcher: self.fetcher.unwrap_or_default(),
            download_root: self
                .download_root
                .unwrap_or_else(|| PathBuf::from("downloads")),
            fatal_auth_failure: self.fatal_auth_failure.unwrap_or(true),
        })
    }
}

// The main Pipeline struct that drives the download run
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Starting download run ...");
        // Under the fatal policy a failed authentication ends the run here,
        // before the prompt and before any catalog call
        apply_auth_policy(
            self.config.catalog.authenticate().await,
            self.config.fatal_auth_failure,
        )?;

        let url = prompt_playlist_url()?;
        let playlist_id = extract_playlist_id(&url);
        debug!("Extracted playlist id: {playlist_id}");

        let playlist = match self.config.catalog.get_playlist_tracks(playlist_id).await {
            Ok(p) => p,
            Err(e) => {
                error!("Error getting playlist tracks: {e}");
                info!("No tracks found in the playlist.");
                return Ok(());
            }
        };
        if playlist.tracks.is_empty() {
            info!("No tracks found in the playlist.");
            return Ok(());
        }

        let output_dir = self.config.download_root.join(&playlist.name);

        let lookup = &mut self.config.lookup;
        let fetcher = &self.config.fetcher;
        let (downloaded, skipped) = process_tracks(
            &playlist.tracks,
            async |track| lookup.search_video(&track.name, &track.artist.name).await,
            async |video_url| fetcher.download_audio(video_url, &output_dir).await,
        )
        .await;

        info!("Download run completed: {downloaded} downloaded, {skipped} skipped");
        Ok(())
    }
}

// Fatal-vs-soft authentication policy. Under the fatal policy (the default)
// the error propagates and the process exits non-zero.
fn apply_auth_policy(auth: Result<()>, fatal: bool) -> Result<()> {
    match auth {
        Ok(()) => Ok(()),
        Err(e) if fatal => Err(e),
        Err(e) => {
            warn!("Proceeding without authentication: {e}");
            Ok(())
        }
    }
}

// Tracks are processed strictly in catalog order; a failed lookup or download
// skips that track only and the iteration continues. Returns the number of
// downloaded and skipped tracks.
async fn process_tracks(
    tracks: &[Track],
    mut search: impl AsyncFnMut(&Track) -> Result<Option<String>>,
    mut download: impl AsyncFnMut(&str) -> Result<()>,
) -> (usize, usize) {
    let mut downloaded = 0usize;
    let mut skipped = 0usize;
    for track in tracks {
        match search(track).await {
            Ok(Some(video_url)) => match download(&video_url).await {
                Ok(()) => downloaded += 1,
                Err(e) => {
                    warn!("Error downloading audio for {}: {e}", track.name);
                    skipped += 1;
                }
            },
            Ok(None) => skipped += 1,
            Err(e) => {
                warn!("Error searching YouTube: {e}");
                skipped += 1;
            }
        }
    }
    (downloaded, skipped)
}

// Single blocking read of one line; no retry or validation loop. A malformed
// URL yields an identifier that fails at the catalog call.
fn prompt_playlist_url() -> Result<String> {
    print!("Enter Spotify playlist URL: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

// Takes everything after the literal `playlist/` marker, query string
// included. Input without the marker passes through unchanged.
fn extract_playlist_id(url: &str) -> &str {
    url.split_once("playlist/").map_or(url, |(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::{apply_auth_policy, extract_playlist_id, process_tracks};
    use spotifetch::clients::entities::{Artist, Track};
    use spotifetch::clients::errors::Error;

    fn track(name: &str, artist: &str) -> Track {
        Track {
            name: name.to_string(),
            artist: Artist {
                name: artist.to_string(),
            },
        }
    }

    #[test]
    fn takes_segment_after_playlist_marker() {
        assert_eq!(
            extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"),
            "37i9dQZF1DXcBWIGoYBM5M"
        );
    }

    #[test]
    fn query_string_is_not_stripped() {
        assert_eq!(
            extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc"),
            "37i9dQZF1DXcBWIGoYBM5M?si=abc"
        );
    }

    #[test]
    fn input_without_marker_passes_through() {
        assert_eq!(
            extract_playlist_id("37i9dQZF1DXcBWIGoYBM5M"),
            "37i9dQZF1DXcBWIGoYBM5M"
        );
    }

    #[tokio::test]
    async fn failing_tracks_never_abort_the_run() {
        let tracks = vec![
            track("Yellow", "Coldplay"),
            track("Clocks", "Coldplay"),
            track("Fix You", "Coldplay"),
        ];
        let mut downloads_attempted = 0usize;

        let (downloaded, skipped) = process_tracks(
            &tracks,
            async |t| match t.name.as_str() {
                "Yellow" => Err(Error::Lookup {
                    query: "Yellow Coldplay".to_string(),
                    reason: "search unavailable".to_string(),
                }),
                "Clocks" => Ok(Some("https://www.youtube.com/watch?v=clocks".to_string())),
                _ => Ok(Some("https://www.youtube.com/watch?v=fixyou".to_string())),
            },
            async |url| {
                downloads_attempted += 1;
                if url.ends_with("clocks") {
                    Err(Error::Download {
                        url: url.to_string(),
                        reason: "stream gone".to_string(),
                    })
                } else {
                    Ok(())
                }
            },
        )
        .await;

        // Both failures are skips; the iteration runs to completion
        assert_eq!(downloaded, 1);
        assert_eq!(skipped, 2);
        assert_eq!(downloads_attempted, 2);
    }

    #[tokio::test]
    async fn lookup_miss_skips_the_download() {
        let tracks = vec![track("Yellow", "Coldplay")];
        let mut downloads_attempted = 0usize;

        let (downloaded, skipped) = process_tracks(
            &tracks,
            async |_t| Ok(None),
            async |_url| {
                downloads_attempted += 1;
                Ok(())
            },
        )
        .await;

        assert_eq!((downloaded, skipped), (0, 1));
        assert_eq!(downloads_attempted, 0);
    }

    #[tokio::test]
    async fn empty_track_list_makes_no_search_or_download_calls() {
        let mut searches = 0usize;
        let mut downloads = 0usize;

        let (downloaded, skipped) = process_tracks(
            &[],
            async |_t| {
                searches += 1;
                Ok(None)
            },
            async |_url| {
                downloads += 1;
                Ok(())
            },
        )
        .await;

        assert_eq!((downloaded, skipped), (0, 0));
        assert_eq!(searches, 0);
        assert_eq!(downloads, 0);
    }

    #[test]
    fn fatal_auth_policy_propagates_the_failure() {
        let result = apply_auth_policy(
            Err(Error::Authentication("invalid client".to_string())),
            true,
        );
        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[test]
    fn soft_auth_policy_lets_the_run_continue() {
        let result = apply_auth_policy(
            Err(Error::Authentication("invalid client".to_string())),
            false,
        );
        assert!(result.is_ok());
        assert!(apply_auth_policy(Ok(()), true).is_ok());
    }
}
