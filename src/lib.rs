//! Spotifetch - Download audio for Spotify playlist tracks from YouTube
//!
//! This library provides functionality to fetch the track list of a Spotify
//! playlist, find a matching YouTube video for each track and download its
//! best audio-only stream to local disk.

/// Client modules for interacting with external services
pub mod clients;
