/// Performing artist of a track
#[derive(Debug, Clone)]
pub struct Artist {
    /// Display name as reported by the catalog
    pub name: String,
}

/// A single playlist entry
#[derive(Debug, Clone)]
pub struct Track {
    /// Track name
    pub name: String,
    /// First listed artist; additional artists are discarded
    pub artist: Artist,
}

/// One page of playlist metadata as returned by the catalog
#[derive(Debug)]
pub struct Playlist {
    /// Playlist display name, used as the output directory name
    pub name: String,
    /// Tracks in catalog order
    pub tracks: Vec<Track>,
}
