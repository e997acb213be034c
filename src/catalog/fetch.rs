use std::sync::mpsc::{self, Receiver};
use std::thread;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::ApiSettings;

use super::model::{SongsResponse, Track};

/// Message shown to the user whenever the playlist cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load songs. Please try again later.";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("malformed songs listing: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type CatalogResult = Result<Vec<Track>, CatalogError>;

/// Full URL of the songs listing for `api`.
pub fn songs_endpoint(api: &ApiSettings) -> String {
    let origin = api.origin.strip_suffix('/').unwrap_or(&api.origin);
    format!("{}{}", origin, api.songs_path)
}

/// Parse a songs listing body and resolve every entry against `origin`.
pub fn parse_songs(body: &str, origin: &str) -> CatalogResult {
    let response: SongsResponse = serde_json::from_str(body)?;
    Ok(response
        .songs
        .into_iter()
        .map(|song| song.into_track(origin))
        .collect())
}

/// Fetch the playlist once. Any non-2xx status is an error.
pub fn fetch_songs(client: &Client, api: &ApiSettings) -> CatalogResult {
    let url = songs_endpoint(api);
    tracing::debug!(url = %url, "fetching songs");

    let response = client.get(&url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status(status.as_u16()));
    }

    let body = response.text()?;
    let tracks = parse_songs(&body, &api.origin)?;
    tracing::info!(count = tracks.len(), "songs loaded");
    Ok(tracks)
}

/// Run `fetch_songs` on a background thread. The receiver yields exactly one
/// result.
pub fn spawn_loader(api: ApiSettings) -> Receiver<CatalogResult> {
    let (tx, rx) = mpsc::channel::<CatalogResult>();

    thread::spawn(move || {
        let result = Client::builder()
            .build()
            .map_err(CatalogError::from)
            .and_then(|client| fetch_songs(&client, &api));
        let _ = tx.send(result);
    });

    rx
}
