use std::collections::HashMap;

use log::{info, warn};
use rustypipe::client::RustyPipe;

use crate::clients::errors::{Error, Result};

/// Process-lifetime memoization of successful video lookups.
///
/// Keyed by `"<track>-<artist>"`. Only successful lookups are stored, so a
/// failed pair is re-queried on every subsequent occurrence. Never evicted,
/// never persisted.
#[derive(Debug, Default)]
pub struct SearchCache {
    entries: HashMap<String, String>,
}

impl SearchCache {
    fn key(name: &str, artist: &str) -> String {
        format!("{name}-{artist}")
    }

    pub fn get(&self, name: &str, artist: &str) -> Option<&str> {
        self.entries
            .get(&Self::key(name, artist))
            .map(String::as_str)
    }

    pub fn insert(&mut self, name: &str, artist: &str, url: String) {
        self.entries.insert(Self::key(name, artist), url);
    }
}

/// YouTube video lookup with in-memory memoization
pub struct VideoLookup {
    client: RustyPipe,
    cache: SearchCache,
}

impl VideoLookup {
    pub fn new() -> Self {
        VideoLookup {
            client: RustyPipe::new(),
            cache: SearchCache::default(),
        }
    }

    // Search YouTube for the given track and artist, returning the watch URL
    // of the first ranked result, or None when the search comes back empty.
    // No disambiguation beyond "first ranked result" is attempted.
    pub async fn search_video(&mut self, name: &str, artist: &str) -> Result<Option<String>> {
        if let Some(url) = self.cache.get(name, artist) {
            info!("Returning cached result for: {name} by {artist}");
            return Ok(Some(url.to_string()));
        }

        let query = format!("{name} {artist}");
        let results = self
            .client
            .query()
            .music_search_tracks(&query)
            .await
            .map_err(|e| Error::Lookup {
                query: query.clone(),
                reason: e.to_string(),
            })?;

        match results.items.items.first() {
            Some(video) => {
                let url = format!("https://www.youtube.com/watch?v={}", video.id);
                self.cache.insert(name, artist, url.clone());
                Ok(Some(url))
            }
            None => {
                warn!("No video found for: {name} by {artist}");
                Ok(None)
            }
        }
    }
}

impl Default for VideoLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SearchCache;

    #[test]
    fn miss_on_unknown_pair() {
        let cache = SearchCache::default();
        assert_eq!(cache.get("Yellow", "Coldplay"), None);
    }

    #[test]
    fn hit_returns_identical_url() {
        let mut cache = SearchCache::default();
        cache.insert(
            "Yellow",
            "Coldplay",
            "https://www.youtube.com/watch?v=yKNxeF4KMsY".to_string(),
        );
        assert_eq!(
            cache.get("Yellow", "Coldplay"),
            Some("https://www.youtube.com/watch?v=yKNxeF4KMsY")
        );
    }

    #[test]
    fn duplicate_pair_shares_one_entry() {
        let mut cache = SearchCache::default();
        cache.insert("Yellow", "Coldplay", "first".to_string());
        cache.insert("Yellow", "Coldplay", "second".to_string());
        assert_eq!(cache.get("Yellow", "Coldplay"), Some("second"));
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn key_joins_track_and_artist_with_separator() {
        assert_eq!(SearchCache::key("Yellow", "Coldplay"), "Yellow-Coldplay");
    }
}
