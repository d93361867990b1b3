//! Text snapshot of the rendered form, used as the print rendition

use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use unicode_width::UnicodeWidthStr;

/// Glyph drawn at the end of the focused input
pub const INPUT_CURSOR: &str = "▌";
/// Color the input cursor is drawn in; typed text never uses it
pub const INPUT_CURSOR_COLOR: Color = Color::Cyan;

/// Rows of text copied out of a region of the last drawn frame.
/// Recaptured after every frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenBuffer {
    rows: Vec<String>,
}

impl ScreenBuffer {
    #[cfg(test)]
    pub fn from_lines(rows: Vec<String>) -> Self {
        Self { rows }
    }

    /// Copy the cells of `area` out of a drawn buffer.
    /// Wide glyphs skip the cells they cover; the input cursor becomes a blank.
    pub fn capture(&mut self, buffer: &Buffer, area: Rect) {
        let area = area.intersection(buffer.area);
        self.rows.clear();

        for row in area.top()..area.bottom() {
            let mut line = String::with_capacity(area.width as usize);
            let mut col = area.left();
            while col < area.right() {
                let (symbol, width) = match buffer.cell((col, row)) {
                    Some(cell)
                        if cell.symbol() == INPUT_CURSOR && cell.fg == INPUT_CURSOR_COLOR =>
                    {
                        (" ", 1)
                    }
                    Some(cell) if !cell.symbol().is_empty() => {
                        (cell.symbol(), cell.symbol().width().max(1))
                    }
                    _ => (" ", 1),
                };
                line.push_str(symbol);
                col = col.saturating_add(width as u16);
            }
            self.rows.push(line.trim_end().to_string());
        }

        while self.rows.last().is_some_and(|r| r.is_empty()) {
            self.rows.pop();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.is_empty())
    }

    pub fn text(&self) -> String {
        self.rows.join("\n")
    }
}
