//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist, the current
//! track and the playback state mirrored from the audio element.

mod action;
mod model;

pub use action::Action;
pub use model::*;

#[cfg(test)]
mod tests;
