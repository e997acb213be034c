use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryIter};
use std::thread::JoinHandle;

use reqwest::blocking::Client;

use super::listeners::{ListenerRegistry, Subscription};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaNotification, SourceId};

/// The controls the player needs from a playback element.
pub trait MediaControl {
    /// Bind `url` as the new source and subscribe to its progress.
    fn bind(&self, url: &str) -> Subscription;
    fn play(&self);
    fn pause(&self);
}

/// Handle to the playback element running on the audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<MediaNotification>,
    listeners: ListenerRegistry,
    next_source: AtomicU64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(client: Client) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events) = mpsc::channel::<MediaNotification>();
        let listeners = ListenerRegistry::new();

        let audio_handle = spawn_audio_thread(rx, events_tx, listeners.clone(), client);

        Self {
            tx,
            events,
            listeners,
            next_source: AtomicU64::new(1),
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Notifications received since the last call, without blocking.
    pub fn events(&self) -> TryIter<'_, MediaNotification> {
        self.events.try_iter()
    }

    /// Stop playback and wait for the audio thread to finish.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaControl for AudioPlayer {
    /// The listener is registered before the load is queued, so the first
    /// progress notifications of the new source are never missed.
    fn bind(&self, url: &str) -> Subscription {
        let source: SourceId = self.next_source.fetch_add(1, Ordering::Relaxed);
        let subscription = self.listeners.subscribe(source);
        let _ = self.send(AudioCmd::Load {
            source,
            url: url.to_string(),
        });
        subscription
    }

    fn play(&self) {
        let _ = self.send(AudioCmd::Play);
    }

    fn pause(&self) {
        let _ = self.send(AudioCmd::Pause);
    }
}
