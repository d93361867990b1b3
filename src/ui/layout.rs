//! Screen layout and status bar

use crate::app::App;
use crate::controller::SubmissionPhase;
use crate::directory::DirectoryStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const QUIT_HINT: &str = " ^C:quit ";

/// Split off the bottom row for the status bar. Returns (content, status bar).
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

fn phase_color(phase: SubmissionPhase) -> Color {
    match phase {
        SubmissionPhase::Editing => Color::Gray,
        SubmissionPhase::Submitting => Color::Yellow,
        SubmissionPhase::SubmittedOk => Color::Green,
        SubmissionPhase::SubmittedError => Color::Red,
    }
}

fn directory_summary(app: &App) -> String {
    let directory = app.controller.directory();
    match directory.status() {
        DirectoryStatus::Loading => "loading country codes".to_string(),
        DirectoryStatus::Loaded => format!("{} country codes", directory.len()),
        DirectoryStatus::Unavailable => "country codes unavailable".to_string(),
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let phase = app.controller.phase();

    let mut spans = vec![
        Span::styled(" ● ", Style::default().fg(phase_color(phase))),
        Span::raw(phase.label()),
        Span::raw(" | "),
        Span::styled(directory_summary(app), Style::default().fg(Color::Gray)),
    ];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let hint_width = (QUIT_HINT.len() as u16).min(area.width);
    let quit_area = Rect {
        x: area.x + area.width - hint_width,
        y: area.y,
        width: hint_width,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(QUIT_HINT).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
