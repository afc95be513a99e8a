/// yt-dlp audio fetcher
pub mod downloader;
/// Data entities for playlists, tracks and artists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify catalog client
pub mod spotify;
/// YouTube video lookup with in-memory memoization
pub mod youtube;

pub use downloader::AudioFetcher;
pub use spotify::CatalogClient;
pub use youtube::VideoLookup;
