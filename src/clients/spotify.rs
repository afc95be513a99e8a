use log::info;

use crate::clients::{
    entities::{Artist, Playlist, Track},
    errors::{Error, Result},
};
use rspotify::{
    ClientCredsSpotify, Credentials,
    model::{FullTrack, PlayableItem, PlaylistId},
    prelude::*,
};

impl From<FullTrack> for Track {
    fn from(f: FullTrack) -> Track {
        Track {
            name: f.name,
            artist: Artist {
                // First listed artist only, additional artists are discarded
                name: f
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
            },
        }
    }
}

/// Spotify catalog client owning the client-credentials access token
pub struct CatalogClient {
    spotify: ClientCredsSpotify,
}

impl CatalogClient {
    pub fn new(spotify: ClientCredsSpotify) -> Self {
        CatalogClient { spotify }
    }

    // Create a CatalogClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        let client_id = require_env("SPOTIFY_CLIENT_ID")?;
        let client_secret = require_env("SPOTIFY_CLIENT_SECRET")?;
        let creds = Credentials::new(&client_id, &client_secret);
        Ok(CatalogClient::new(ClientCredsSpotify::new(creds)))
    }

    // Exchange client credentials for an access token used by all catalog calls.
    // The token is assumed valid for the duration of the run; no refresh logic.
    pub async fn authenticate(&self) -> Result<()> {
        self.spotify
            .request_token()
            .await
            .map_err(|e| Error::Authentication(e.to_string()))?;
        info!("Spotify authenticated successfully");
        Ok(())
    }

    // Fetch a single page of playlist metadata and track items.
    // Does not paginate beyond the first page returned by the catalog API.
    pub async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Playlist> {
        let id = PlaylistId::from_id(playlist_id).map_err(|e| Error::PlaylistFetch {
            id: playlist_id.to_string(),
            reason: e.to_string(),
        })?;
        let playlist =
            self.spotify
                .playlist(id, None, None)
                .await
                .map_err(|e| Error::PlaylistFetch {
                    id: playlist_id.to_string(),
                    reason: e.to_string(),
                })?;
        info!("Playlist fetched: {}", playlist.name);

        // Non-track items (podcast episodes, removed tracks) are skipped
        let tracks: Vec<Track> = playlist
            .tracks
            .items
            .into_iter()
            .filter_map(|item| match item.track {
                Some(PlayableItem::Track(track)) => Some(Track::from(track)),
                _ => None,
            })
            .collect();
        info!("Number of tracks found: {}", tracks.len());

        Ok(Playlist {
            name: playlist.name,
            tracks,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!(
            "{name} must be set to a non-empty value. Check README.md for details."
        ))),
    }
}
