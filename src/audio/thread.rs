use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::listeners::ListenerRegistry;
use super::source::{create_sink, download, probe};
use super::types::{AudioCmd, AudioError, MediaEvent, MediaNotification, SourceId};

/// How often position updates are emitted while playing.
const TICK: Duration = Duration::from_millis(250);

/// What the element currently has loaded.
enum Media {
    Empty,
    Ready(Arc<[u8]>),
    Failed(String),
}

/// State owned by the audio thread.
pub(super) struct Element {
    stream: Option<OutputStream>,
    client: Client,
    listeners: ListenerRegistry,
    events: Sender<MediaNotification>,
    source: Option<SourceId>,
    media: Media,
    sink: Option<Sink>,
    paused: bool,
}

impl Element {
    pub(super) fn new(
        stream: Option<OutputStream>,
        client: Client,
        listeners: ListenerRegistry,
        events: Sender<MediaNotification>,
    ) -> Self {
        Self {
            stream,
            client,
            listeners,
            events,
            source: None,
            media: Media::Empty,
            sink: None,
            paused: true,
        }
    }

    fn emit(&self, event: MediaEvent) {
        let Some(source) = self.source else {
            return;
        };
        if event.is_progress() && !self.listeners.is_subscribed(source) {
            return;
        }
        let _ = self.events.send(MediaNotification { source, event });
    }

    /// Handle a burst of commands that were queued together. Returns `false`
    /// once the thread should exit.
    pub(super) fn handle_batch(&mut self, batch: Vec<AudioCmd>) -> bool {
        for cmd in coalesce(batch) {
            if !self.handle(cmd) {
                return false;
            }
        }
        true
    }

    /// Handle one command. Returns `false` once the thread should exit.
    pub(super) fn handle(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::Load { source, url } => self.load(source, &url),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => self.pause(),
            AudioCmd::Quit => {
                if let Some(sink) = self.sink.take() {
                    sink.stop();
                }
                return false;
            }
        }
        true
    }

    fn load(&mut self, source: SourceId, url: &str) {
        // Replacing the source stops the old one first.
        self.pause();
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }

        self.source = Some(source);
        self.media = Media::Empty;
        self.emit(MediaEvent::TimeUpdate(0.0));

        tracing::debug!(source, url, "loading source");
        let loaded = download(&self.client, url).and_then(|bytes| {
            let duration = probe(&bytes)?;
            Ok((bytes, duration))
        });

        match loaded {
            Ok((bytes, duration)) => {
                self.media = Media::Ready(bytes);
                let secs = duration.map_or(f64::NAN, |d| d.as_secs_f64());
                self.emit(MediaEvent::LoadedMetadata(secs));
            }
            Err(e) => {
                tracing::warn!(source, url, error = %e, "failed to load source");
                self.media = Media::Failed(e.to_string());
            }
        }
    }

    fn play(&mut self) {
        if !self.paused {
            return;
        }

        if let Err(reason) = self.prepare_sink() {
            tracing::warn!(source = ?self.source, reason = %reason, "play rejected");
            self.emit(MediaEvent::PlayRejected(reason));
            return;
        }

        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
        self.paused = false;
        self.emit(MediaEvent::Play);
    }

    /// Make sure there is a sink with audio queued. A sink that already ran
    /// to its end is rebuilt so the source restarts from the beginning.
    fn prepare_sink(&mut self) -> Result<(), String> {
        let bytes = match &self.media {
            Media::Ready(bytes) => bytes,
            Media::Failed(reason) => return Err(reason.clone()),
            Media::Empty => return Err("no source loaded".to_string()),
        };

        if self.sink.as_ref().is_some_and(|s| !s.empty()) {
            return Ok(());
        }

        let Some(stream) = self.stream.as_ref() else {
            return Err("no audio output device".to_string());
        };
        let sink = create_sink(stream, bytes).map_err(|e| e.to_string())?;
        self.sink = Some(sink);
        Ok(())
    }

    fn pause(&mut self) {
        if self.paused {
            return;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.paused = true;
        self.emit(MediaEvent::Pause);
    }

    /// Start `sink` as the playing output of `source`.
    #[cfg(test)]
    pub(super) fn attach_sink(&mut self, source: SourceId, sink: Sink) {
        self.source = Some(source);
        self.sink = Some(sink);
        self.paused = false;
    }

    /// Periodic work while idle: report position and detect end of track.
    pub(super) fn tick(&mut self) {
        if self.paused {
            return;
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            self.paused = true;
            self.emit(MediaEvent::Pause);
            self.emit(MediaEvent::Ended);
        } else {
            let pos = sink.get_pos().as_secs_f64();
            self.emit(MediaEvent::TimeUpdate(pos));
        }
    }
}

/// Collapse commands that queued up while the thread was busy. A `Quit`
/// anywhere wins outright. Otherwise everything before the last `Load`
/// targets a source that has already been replaced, so it is skipped.
pub(super) fn coalesce(batch: Vec<AudioCmd>) -> Vec<AudioCmd> {
    if batch.contains(&AudioCmd::Quit) {
        return vec![AudioCmd::Quit];
    }
    let last_load = batch
        .iter()
        .rposition(|cmd| matches!(cmd, AudioCmd::Load { .. }))
        .unwrap_or(0);
    if last_load > 0 {
        tracing::debug!(skipped = last_load, "skipping superseded audio commands");
    }
    batch.into_iter().skip(last_load).collect()
}

fn open_stream() -> Result<OutputStream, AudioError> {
    let mut stream = OutputStreamBuilder::open_default_stream()?;
    // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
    // but noisy for a TUI app.
    stream.log_on_drop(false);
    Ok(stream)
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<MediaNotification>,
    listeners: ListenerRegistry,
    client: Client,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match open_stream() {
            Ok(stream) => Some(stream),
            Err(e) => {
                tracing::error!(error = %e, "audio output unavailable; playback disabled");
                None
            }
        };

        let mut element = Element::new(stream, client, listeners, events);

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => {
                    let mut batch = vec![cmd];
                    batch.extend(rx.try_iter());
                    if !element.handle_batch(batch) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => element.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        tracing::debug!("audio thread exiting");
    })
}
