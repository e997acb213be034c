use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Action, App};
use crate::audio::AudioPlayer;
use crate::catalog::CatalogResult;
use crate::config;
use crate::runtime::transport::{Controller, dispatch};
use crate::ui::{self, HitMap};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Hit regions from the last draw, used to resolve mouse input.
    pub hits: HitMap,
    pub controller: Controller,
    /// Pending playlist load; `None` once the result has been applied.
    catalog: Option<Receiver<CatalogResult>>,
}

impl EventLoopState {
    pub fn new(catalog: Receiver<CatalogResult>) -> Self {
        Self {
            hits: HitMap::default(),
            controller: Controller::new(),
            catalog: Some(catalog),
        }
    }
}

/// Main terminal event loop: applies the playlist load, mirrors playback
/// notifications, draws, and handles input. Returns `Ok(())` when shutdown
/// is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.ui.tick_ms);

    loop {
        poll_catalog(app, audio_player, state);

        for notification in audio_player.events() {
            let before = app.current;
            app.on_media(&notification);
            if app.current != before {
                state.controller.sync_source(app, audio_player);
            }
        }

        terminal.draw(|f| state.hits = ui::draw(f, app, &settings.ui))?;
        app.set_list_height(state.hits.list_rows);

        if event::poll(tick)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key_action(key),
                Event::Mouse(mouse) => mouse_action(mouse, &state.hits),
                _ => None,
            };
            if let Some(action) = action {
                if dispatch(action, app, audio_player, &mut state.controller) {
                    break;
                }
            }
        }
    }

    state.controller.release();
    Ok(())
}

fn poll_catalog(app: &mut App, audio_player: &AudioPlayer, state: &mut EventLoopState) {
    let Some(rx) = state.catalog.as_ref() else {
        return;
    };

    match rx.try_recv() {
        Ok(result) => {
            app.apply_catalog(result);
            state.catalog = None;
            // First render of the list binds the first track, paused.
            state.controller.sync_source(app, audio_player);
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            app.catalog_lost();
            state.catalog = None;
        }
    }
}

/// Map a key press to an action.
pub fn key_action(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::TogglePlay,
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Action::Next,
        KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => Action::Prev,
        KeyCode::Char('j') | KeyCode::Down => Action::HoverNext,
        KeyCode::Char('k') | KeyCode::Up => Action::HoverPrev,
        KeyCode::Enter => Action::SelectHovered,
        _ => return None,
    };
    Some(action)
}

/// Map a mouse event to an action using the last frame's hit regions.
pub fn mouse_action(mouse: MouseEvent, hits: &HitMap) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            Some(Action::Hover(hits.row_at(mouse.column, mouse.row)))
        }
        MouseEventKind::Down(MouseButton::Left) => hits.action_at(mouse.column, mouse.row),
        _ => None,
    }
}
