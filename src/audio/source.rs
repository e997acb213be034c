//! Fetching and decoding remote sources into `rodio` sinks.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use reqwest::blocking::Client;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

/// Download the whole source at `url`.
pub(super) fn download(client: &Client, url: &str) -> Result<Arc<[u8]>, AudioError> {
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::Status(status.as_u16()));
    }
    let bytes = response.bytes()?;
    Ok(Arc::from(bytes.as_ref()))
}

fn decoder(bytes: &Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, AudioError> {
    Ok(Decoder::new(Cursor::new(Arc::clone(bytes)))?)
}

/// Check that `bytes` decode and work out the duration if possible.
///
/// The decoder's own estimate is preferred; container metadata is the
/// fallback (many mp3 streams report no total duration while decoding).
pub(super) fn probe(bytes: &Arc<[u8]>) -> Result<Option<Duration>, AudioError> {
    let from_decoder = decoder(bytes)?.total_duration();
    Ok(from_decoder.or_else(|| probe_tags(bytes)))
}

fn probe_tags(bytes: &[u8]) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

/// Create a paused `Sink` that plays `bytes` from the start.
pub(super) fn create_sink(stream: &OutputStream, bytes: &Arc<[u8]>) -> Result<Sink, AudioError> {
    let source = decoder(bytes)?;
    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
