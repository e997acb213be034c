use std::env;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::blocking::Client;

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::catalog;
use crate::logging;

mod event_loop;
mod settings;
mod transport;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // An optional positional argument overrides the API origin.
    let settings = settings::with_origin_override(settings::load_settings(), env::args().nth(1));

    let log_file = logging::init(&settings.log);
    tracing::info!(
        origin = %settings.api.origin,
        log = ?log_file,
        "starting encore"
    );

    let client = Client::builder()
        .timeout(Duration::from_secs(settings.audio.fetch_timeout_secs))
        .build()?;
    let audio_player = AudioPlayer::new(client);
    let catalog_rx = catalog::spawn_loader(settings.api.clone());
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(catalog_rx);
        event_loop::run(&mut terminal, &settings, &mut app, &audio_player, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    audio_player.quit();
    tracing::info!("encore stopped");

    run_result
}
