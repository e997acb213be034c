//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. `draw`
//! also reports where clickable things ended up so mouse input can be mapped
//! back to actions.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{Action, App};
use crate::config::UiSettings;
use crate::time::format_time;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "move cursor");
    map.insert("enter", "select");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    map.insert("mouse", "hover/click");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "enter", "space/p", "h/l", "mouse", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Clickable regions produced by the last `draw`.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    pub rows: Vec<(Rect, usize)>,
    pub buttons: Vec<(Rect, Action)>,
    /// Height of the track list window, in rows.
    pub list_rows: usize,
}

impl HitMap {
    /// Track index of the row under the pointer.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.rows
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, index)| index)
    }

    /// The action a left click at the pointer would trigger. Buttons sit on
    /// top of rows, so they win.
    pub fn action_at(&self, column: u16, row: u16) -> Option<Action> {
        let pos = Position::new(column, row);
        self.buttons
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, action)| action)
            .or_else(|| self.row_at(column, row).map(Action::Select))
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10).min(r.width);
    height = height.min(r.height.saturating_sub(2)).max(3).min(r.height);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Lay out `labels` left to right starting at `x` with a one-cell gap.
fn button_rects(x: u16, y: u16, labels: &[&str]) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(labels.len());
    let mut cursor = x;
    for label in labels {
        let width = Span::raw(*label).width() as u16;
        rects.push(Rect {
            x: cursor,
            y,
            width,
            height: 1,
        });
        cursor = cursor.saturating_add(width + 1);
    }
    rects
}

fn buttons_width(labels: &[&str]) -> u16 {
    let widths: u16 = labels.iter().map(|l| Span::raw(*l).width() as u16).sum();
    widths + labels.len().saturating_sub(1) as u16
}

fn render_buttons(
    frame: &mut Frame,
    hits: &mut HitMap,
    x: u16,
    y: u16,
    buttons: &[(&str, Action)],
    style: Style,
) {
    let labels: Vec<&str> = buttons.iter().map(|(l, _)| *l).collect();
    for (rect, (label, action)) in button_rects(x, y, &labels).into_iter().zip(buttons) {
        frame.render_widget(Paragraph::new(*label).style(style), rect);
        hits.buttons.push((rect, *action));
    }
}

/// Full-screen centered message, used for the loading and error states.
fn draw_message(frame: &mut Frame, icon: &str, message: &str, style: Style) {
    let area = frame.area();
    let width = (Span::raw(message).width() as u16).saturating_add(4);
    let popup = centered_rect_sized(width, 4, area);
    let text = vec![Line::from(Span::styled(icon, style)), Line::from(message)];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) -> HitMap {
    let mut hits = HitMap::default();

    if app.loading {
        draw_message(frame, "♪", "Loading awesome music...", Style::default());
        return hits;
    }
    if let Some(error) = &app.error {
        draw_message(frame, "✖", error, Style::default().fg(Color::Red));
        return hits;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, app, chunks[1]);
    draw_track_list(frame, app, chunks[2], &mut hits);
    draw_transport(frame, app, chunks[3], &mut hits);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" keys ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    hits
}

fn draw_now_playing(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered().title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let title = app
        .current_track()
        .map(|t| t.title.as_str())
        .unwrap_or("Nothing to play");
    let title_line = Paragraph::new(format!("Now Playing: {title}"))
        .alignment(Alignment::Center)
        .bold();
    frame.render_widget(title_line, rows[0]);

    let time = format!(
        "{} / {}",
        format_time(app.current_time),
        format_time(app.duration)
    );
    frame.render_widget(
        Paragraph::new(time)
            .alignment(Alignment::Center)
            .fg(Color::Gray),
        rows[1],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
        .ratio(app.progress_ratio())
        .label("");
    frame.render_widget(gauge, rows[2]);
}

fn draw_track_list(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let block = Block::default().borders(Borders::ALL).title(" tracks ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The window starts where the model scrolled it; it never moves under
    // the pointer.
    let total = app.tracks.len();
    let height = inner.height as usize;
    hits.list_rows = height;
    let start = app.scroll.min(total.saturating_sub(height));
    let end = (start + height).min(total);

    for (offset, index) in (start..end).enumerate() {
        let track = &app.tracks[index];
        let rect = Rect {
            x: inner.x,
            y: inner.y + offset as u16,
            width: inner.width,
            height: 1,
        };

        let is_current = index == app.current;
        let is_hovered = app.hovered == Some(index);

        let style = if is_current {
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else if is_hovered {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let marker = match (is_current, app.playing) {
            (true, true) => "♪",
            (true, false) => "⏸",
            _ => " ",
        };

        let line = Line::from(vec![
            Span::styled(format!(" {:02} ", index + 1), Style::default().fg(Color::Gray)),
            Span::raw(format!("{marker} ")),
            Span::raw(track.title.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), rect);
        hits.rows.push((rect, index));

        if is_hovered {
            let buttons = [
                (" ▶ ", Action::PlayRow(index)),
                (" ⏸ ", Action::PauseRow(index)),
                (" ⏭ ", Action::Next),
            ];
            let labels: Vec<&str> = buttons.iter().map(|(l, _)| *l).collect();
            let width = buttons_width(&labels);
            if width < rect.width {
                let x = rect.x + rect.width - width;
                render_buttons(
                    frame,
                    hits,
                    x,
                    rect.y,
                    &buttons,
                    Style::default().add_modifier(Modifier::REVERSED),
                );
            }
        }
    }
}

fn draw_transport(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let block = Block::default().borders(Borders::ALL).title(" transport ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let play_label = if app.playing { "[ ⏸ ]" } else { "[ ▶ ]" };
    let buttons = [
        ("[ ⏮ ]", Action::Prev),
        (play_label, Action::TogglePlay),
        ("[ ⏭ ]", Action::Next),
    ];
    let labels: Vec<&str> = buttons.iter().map(|(l, _)| *l).collect();
    let width = buttons_width(&labels);
    let x = inner.x + inner.width.saturating_sub(width) / 2;
    render_buttons(frame, hits, x, inner.y, &buttons, Style::default().bold());
}
