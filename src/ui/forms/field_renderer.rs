//! Field rendering utilities for forms

use crate::state::{INPUT_CURSOR, INPUT_CURSOR_COLOR};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// A bordered input box titled with `label`. Empty values show `placeholder` dimmed.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let accent = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let placeholder_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let mut lines: Vec<Line> = if value.is_empty() {
        vec![Line::from(Span::styled(placeholder, placeholder_style))]
    } else if is_multiline {
        // split keeps a trailing empty line for the cursor
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l, value_style)))
            .collect()
    } else {
        vec![Line::from(Span::styled(value, value_style))]
    };

    if is_active {
        let cursor = Span::styled(INPUT_CURSOR, Style::default().fg(INPUT_CURSOR_COLOR));
        match lines.last_mut() {
            Some(last) if value.is_empty() => last.spans.insert(0, cursor),
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(accent);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// A single-line `[x] label` checkbox
pub fn draw_checkbox(frame: &mut Frame, area: Rect, label: &str, checked: bool, is_active: bool) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(mark, style),
        Span::raw(" "),
        Span::styled(label, style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
