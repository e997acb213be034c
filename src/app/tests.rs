use super::*;
use crate::audio::{MediaEvent, MediaNotification};
use crate::catalog::{CatalogError, LOAD_ERROR_MESSAGE, Track};

fn t(title: &str) -> Track {
    Track {
        title: title.into(),
        url: format!("https://example.test/sound/{title}.mp3"),
    }
}

fn loaded(titles: &[&str]) -> App {
    let mut app = App::new();
    app.apply_catalog(Ok(titles.iter().map(|s| t(s)).collect()));
    app
}

fn note(source: u64, event: MediaEvent) -> MediaNotification {
    MediaNotification { source, event }
}

#[test]
fn new_app_is_loading_and_empty() {
    let app = App::new();
    assert!(app.loading);
    assert!(app.tracks.is_empty());
    assert!(app.error.is_none());
    assert_eq!(app.duration, 0.0);
    assert!(app.current_track().is_none());
}

#[test]
fn successful_load_replaces_tracks_and_stops_loading() {
    let app = loaded(&["Mario", "Zelda", "Sonic"]);
    assert!(!app.loading);
    assert!(app.error.is_none());
    assert_eq!(app.tracks.len(), 3);
    assert_eq!(app.current, 0);
    assert_eq!(app.current_track().unwrap().title, "Mario");
}

#[test]
fn failed_load_shows_message_and_keeps_list_empty() {
    let mut app = App::new();
    app.apply_catalog(Err(CatalogError::Status(500)));
    assert!(!app.loading);
    assert_eq!(app.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    assert!(app.tracks.is_empty());

    let mut lost = App::new();
    lost.catalog_lost();
    assert!(!lost.loading);
    assert!(lost.error.is_some());
}

#[test]
fn next_and_prev_are_circular() {
    for len in 1..=5 {
        let titles: Vec<String> = (0..len).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        for start in 0..len {
            let mut app = loaded(&refs);
            app.select(start);

            for _ in 0..len {
                app.next();
            }
            assert_eq!(app.current, start);

            for _ in 0..len {
                app.prev();
            }
            assert_eq!(app.current, start);
        }
    }
}

#[test]
fn next_and_prev_wrap_at_the_edges_and_pause() {
    let mut app = loaded(&["a", "b", "c"]);
    app.playing = true;
    app.prev();
    assert_eq!(app.current, 2);
    assert!(!app.playing);

    app.playing = true;
    app.next();
    assert_eq!(app.current, 0);
    assert!(!app.playing);
}

#[test]
fn select_sets_index_and_pauses() {
    let mut app = loaded(&["a", "b", "c"]);
    for i in 0..3 {
        app.playing = true;
        app.select(i);
        assert_eq!(app.current, i);
        assert!(!app.playing);
    }
}

#[test]
fn select_out_of_range_is_ignored() {
    let mut app = loaded(&["a", "b"]);
    app.select(1);
    app.playing = true;
    app.select(2);
    assert_eq!(app.current, 1);
    assert!(app.playing);
}

#[test]
fn transport_on_empty_list_is_a_no_op() {
    let mut app = App::new();
    app.next();
    app.prev();
    app.select(0);
    app.hover_next();
    app.on_ended();
    assert_eq!(app.current, 0);
    assert!(app.hovered.is_none());
}

#[test]
fn ended_on_last_track_wraps_and_stays_paused() {
    let mut app = loaded(&["a", "b", "c"]);
    app.select(2);
    app.set_source(11);
    app.on_media(&note(11, MediaEvent::Play));
    assert!(app.playing);

    app.on_media(&note(11, MediaEvent::Ended));
    assert_eq!(app.current, 0);
    assert!(!app.playing);
}

#[test]
fn element_events_keep_playing_flag_in_sync() {
    let mut app = loaded(&["a"]);
    app.set_source(1);

    assert!(app.toggle_play());
    app.on_media(&note(1, MediaEvent::Play));
    assert!(app.playing);

    app.on_media(&note(1, MediaEvent::Pause));
    assert!(!app.playing);
}

#[test]
fn rejected_play_reverts_to_paused() {
    let mut app = loaded(&["a"]);
    app.set_source(1);
    assert!(app.toggle_play());
    assert!(app.playing);

    app.on_media(&note(1, MediaEvent::PlayRejected("autoplay blocked".into())));
    assert!(!app.playing);
    // Rejections are diagnostics only, never a user-facing error.
    assert!(app.error.is_none());
}

#[test]
fn progress_is_mirrored_and_last_event_wins() {
    let mut app = loaded(&["a"]);
    app.set_source(5);
    app.on_media(&note(5, MediaEvent::LoadedMetadata(200.0)));
    app.on_media(&note(5, MediaEvent::TimeUpdate(10.0)));
    app.on_media(&note(5, MediaEvent::TimeUpdate(50.0)));
    assert_eq!(app.duration, 200.0);
    assert_eq!(app.current_time, 50.0);
    assert!((app.progress_ratio() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn stale_source_notifications_are_dropped() {
    let mut app = loaded(&["a", "b"]);
    app.set_source(1);
    app.on_media(&note(1, MediaEvent::TimeUpdate(30.0)));

    app.next();
    app.set_source(2);
    assert_eq!(app.current_time, 0.0);
    assert_eq!(app.duration, 0.0);

    app.on_media(&note(1, MediaEvent::TimeUpdate(31.0)));
    app.on_media(&note(1, MediaEvent::Ended));
    app.on_media(&note(1, MediaEvent::Play));
    assert_eq!(app.current_time, 0.0);
    assert_eq!(app.current, 1);
    assert!(!app.playing);
}

#[test]
fn progress_ratio_is_zero_without_known_duration() {
    let mut app = loaded(&["a"]);
    app.current_time = 12.0;
    assert_eq!(app.progress_ratio(), 0.0);
    app.duration = f64::NAN;
    assert_eq!(app.progress_ratio(), 0.0);
}

#[test]
fn hover_cursor_wraps_and_selects() {
    let mut app = loaded(&["a", "b", "c"]);
    app.select(1);

    app.hover_next();
    assert_eq!(app.hovered, Some(1));
    app.hover_next();
    app.hover_next();
    assert_eq!(app.hovered, Some(0));
    app.hover_prev();
    assert_eq!(app.hovered, Some(2));

    app.playing = true;
    app.select_hovered();
    assert_eq!(app.current, 2);
    assert!(!app.playing);

    app.hover(Some(9));
    assert_eq!(app.hovered, None);
}

#[test]
fn list_window_follows_the_current_track_but_not_the_pointer() {
    let titles: Vec<String> = (0..10).map(|i| format!("t{i}")).collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let mut app = loaded(&refs);
    app.set_list_height(4);
    assert_eq!(app.scroll, 0);

    app.hover(Some(3));
    app.hover(Some(9));
    assert_eq!(app.scroll, 0);

    app.select(5);
    assert_eq!(app.scroll, 2);
    app.prev();
    app.prev();
    app.prev();
    assert_eq!(app.current, 2);
    assert_eq!(app.scroll, 2);
    app.prev();
    assert_eq!(app.scroll, 1);

    app.select(0);
    app.prev();
    assert_eq!(app.current, 9);
    assert_eq!(app.scroll, 6);
}
