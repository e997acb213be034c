//! Transport dispatch: runs an `Action` against the model and keeps the
//! playback element bound to the current track.

use crate::app::{Action, App};
use crate::audio::{MediaControl, Subscription};

/// The track currently bound to the element, with its progress listener.
struct Binding {
    index: usize,
    subscription: Subscription,
}

#[derive(Default)]
pub struct Controller {
    binding: Option<Binding>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source currently bound, if any.
    pub fn bound_index(&self) -> Option<usize> {
        self.binding.as_ref().map(|b| b.index)
    }

    /// Make the element follow `app.current`.
    ///
    /// A changed track gets a fresh source and listener; the old listener is
    /// released first. An unchanged track is just paused, since every track
    /// change operation leaves the player paused.
    pub fn sync_source(&mut self, app: &mut App, element: &impl MediaControl) {
        let Some(track) = app.current_track() else {
            self.binding = None;
            return;
        };

        if self.bound_index() == Some(app.current) {
            if !app.playing {
                element.pause();
            }
            return;
        }

        self.binding = None;
        let subscription = element.bind(&track.url);
        tracing::debug!(
            index = app.current,
            source = subscription.source(),
            title = %track.title,
            "bound track"
        );
        app.set_source(subscription.source());
        self.binding = Some(Binding {
            index: app.current,
            subscription,
        });
    }

    /// Drop the listener, e.g. on shutdown.
    pub fn release(&mut self) {
        self.binding = None;
    }
}

fn toggle_play(app: &mut App, element: &impl MediaControl) {
    if !app.has_tracks() {
        return;
    }
    if app.toggle_play() {
        element.play();
    } else {
        element.pause();
    }
}

/// Run `action`. Returns `true` when the player should exit.
pub fn dispatch(
    action: Action,
    app: &mut App,
    element: &impl MediaControl,
    controller: &mut Controller,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::TogglePlay => toggle_play(app, element),
        Action::Next => {
            app.next();
            controller.sync_source(app, element);
        }
        Action::Prev => {
            app.prev();
            controller.sync_source(app, element);
        }
        Action::Select(index) | Action::PauseRow(index) => {
            app.select(index);
            controller.sync_source(app, element);
        }
        Action::PlayRow(index) => {
            app.select(index);
            controller.sync_source(app, element);
            toggle_play(app, element);
        }
        Action::SelectHovered => {
            if app.hovered.is_some() {
                app.select_hovered();
                controller.sync_source(app, element);
            }
        }
        Action::Hover(index) => app.hover(index),
        Action::HoverNext => app.hover_next(),
        Action::HoverPrev => app.hover_prev(),
    }
    false
}
