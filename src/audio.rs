//! Audio subsystem: the playback element.
//!
//! `AudioPlayer` is the handle the UI talks to. The element itself lives on a
//! dedicated thread that owns the `rodio` output stream, fetches sources over
//! HTTP and reports playback notifications back over a channel.

mod listeners;
mod player;
mod source;
mod thread;
mod types;

pub use listeners::{ListenerRegistry, Subscription};
pub use player::{AudioPlayer, MediaControl};
pub use types::*;
