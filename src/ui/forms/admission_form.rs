//! The admission form and its action panel

use super::field_renderer::{draw_checkbox, draw_field};
use crate::app::App;
use crate::directory::DirectoryStatus;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::FieldKind;
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TERMS_LABEL: &str = "I agree to the Terms and Service.";

/// Draw the form with its action sidebar. Returns the area of the form block.
pub fn draw(frame: &mut Frame, area: Rect, app: &App) -> Rect {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(24), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);

    main_chunks[0]
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Length(3), // Country code
            Constraint::Length(3), // Phone
            Constraint::Min(4),    // Free text
            Constraint::Length(1), // Terms
            Constraint::Length(1), // Error
        ])
        .margin(1)
        .split(area);

    let form_focused = app.state.active_field().is_some() || app.state.is_terms_focused();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Admission Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    let form = app.controller.form();
    let active = app.state.active_field();

    for (field, chunk) in FieldKind::ALL.into_iter().zip(chunks.iter()) {
        let is_active = active == Some(field);
        match field {
            FieldKind::CountryCode => {
                let value = app
                    .controller
                    .selected_country()
                    .map(|entry| entry.label())
                    .unwrap_or_default();
                let label = if is_active {
                    format!("{} ↑/↓", field.label())
                } else {
                    field.label().to_string()
                };
                draw_field(
                    frame,
                    *chunk,
                    &label,
                    &value,
                    country_placeholder(app),
                    is_active,
                    false,
                );
            }
            _ => draw_field(
                frame,
                *chunk,
                field.label(),
                form.value(field),
                field.placeholder(),
                is_active,
                field.is_multiline(),
            ),
        }
    }

    draw_checkbox(
        frame,
        chunks[5],
        TERMS_LABEL,
        app.state.terms_accepted,
        app.state.is_terms_focused(),
    );

    if let Some(error) = app.controller.error() {
        let line = Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), chunks[6]);
    }
}

fn country_placeholder(app: &App) -> &'static str {
    let directory = app.controller.directory();
    match directory.status() {
        DirectoryStatus::Loading => "Loading country codes…",
        DirectoryStatus::Unavailable => "Country codes unavailable",
        DirectoryStatus::Loaded if directory.is_empty() => "(no country codes loaded)",
        DirectoryStatus::Loaded => FieldKind::CountryCode.placeholder(),
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.is_submit_focused();
    let submitting = app.controller.is_submitting();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),
            Constraint::Min(0), // Key help
        ])
        .split(inner_area);

    let label = if submitting { "Submitting…" } else { "Submit" };
    render_action_button(
        frame,
        chunks[0],
        label,
        is_focused,
        !submitting,
        Some(Color::Green),
    );

    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);
    let help: Vec<Line> = [
        ("Tab", "next field"),
        ("S-Tab", "previous"),
        (SUBMIT_SHORTCUT, "submit"),
        ("↑/↓", "country code"),
        ("Del", "clear country"),
        ("Space", "toggle terms"),
    ]
    .into_iter()
    .map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!(" {key}"), key_style),
            Span::styled(format!(" {action}"), text_style),
        ])
    })
    .collect();
    frame.render_widget(Paragraph::new(help), chunks[2]);
}
