use serde::Deserialize;

/// A single playable item. `url` is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub url: String,
}

/// Body of `GET /sound/songs`.
#[derive(Debug, Deserialize)]
pub struct SongsResponse {
    pub songs: Vec<SongEntry>,
}

/// One entry of the `songs` array. `url` is a path relative to the API origin.
#[derive(Debug, Deserialize)]
pub struct SongEntry {
    pub name: String,
    pub url: String,
}

impl SongEntry {
    /// Turn the entry into a `Track` whose url is prefixed with `origin`.
    pub fn into_track(self, origin: &str) -> Track {
        Track {
            title: self.name,
            url: format!("{}{}", origin.strip_suffix('/').unwrap_or(origin), self.url),
        }
    }
}
