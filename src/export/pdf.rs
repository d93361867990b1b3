//! Minimal single-page PDF writer
//!
//! Enough of PDF 1.3 to place lines of Helvetica text on an A4 page:
//! catalog, page tree, one page, a standard Type1 font, one content stream,
//! an info dictionary, and a cross-reference table.

use chrono::Local;

/// A4 portrait, in points
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;
const PT_PER_MM: f32 = 72.0 / 25.4;
const DEFAULT_FONT_SIZE: f32 = 16.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

#[derive(Debug, Clone)]
struct TextLine {
    x_mm: f32,
    y_mm: f32,
    text: String,
}

/// One page of positioned text
#[derive(Debug, Clone)]
pub struct PdfDocument {
    lines: Vec<TextLine>,
    font_size: f32,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Place text with its baseline at (`x_mm`, `y_mm`) measured from the top-left.
    /// Embedded newlines continue on the following lines.
    pub fn text(&mut self, x_mm: f32, y_mm: f32, text: impl Into<String>) -> &mut Self {
        self.lines.push(TextLine {
            x_mm,
            y_mm,
            text: text.into(),
        });
        self
    }

    /// Serialize the document
    pub fn to_bytes(&self) -> Vec<u8> {
        let content = self.content_stream();
        let created = Local::now().format("D:%Y%m%d%H%M%S").to_string();

        let mut objects: Vec<Vec<u8>> = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT:.2} {PAGE_HEIGHT_PT:.2}] \
                 /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            )
            .into_bytes(),
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        ];

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);

        objects.push(
            format!("<< /Producer (admission-tui) /CreationDate ({created}) >>").into_bytes(),
        );

        let mut out: Vec<u8> = b"%PDF-1.3\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        let size = objects.len() + 1;
        out.extend_from_slice(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        let info = objects.len();
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {size} /Root 1 0 R /Info {info} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
            )
            .as_bytes(),
        );
        out
    }

    fn content_stream(&self) -> Vec<u8> {
        let leading = self.font_size * LINE_HEIGHT_FACTOR;
        let mut content = Vec::new();

        for line in &self.lines {
            let x = line.x_mm * PT_PER_MM;
            let y = PAGE_HEIGHT_PT - line.y_mm * PT_PER_MM;
            content.extend_from_slice(
                format!(
                    "BT /F1 {:.0} Tf {leading:.2} TL {x:.2} {y:.2} Td",
                    self.font_size
                )
                .as_bytes(),
            );
            for (i, part) in line.text.split('\n').enumerate() {
                if i > 0 {
                    content.extend_from_slice(b" T*");
                }
                content.extend_from_slice(b" (");
                content.extend_from_slice(&encode_text(part));
                content.extend_from_slice(b") Tj");
            }
            content.extend_from_slice(b" ET\n");
        }
        content
    }
}

/// Escape for a PDF literal string; characters outside Latin-1 become `?`
/// WinAnsiEncoding bytes 0x80..=0x9F; `None` marks the unassigned codes
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// The WinAnsiEncoding byte for `c`, if the font can show it
fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u32 as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&mapped| mapped == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\r' => {}
            '\t' => out.push(b' '),
            c => out.push(win_ansi_byte(c).unwrap_or(b'?')),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn sample() -> Vec<u8> {
        let mut doc = PdfDocument::new();
        doc.text(20.0, 20.0, "Name: Jane Doe")
            .text(20.0, 30.0, "Email: jane@x.com");
        doc.to_bytes()
    }

    #[test]
    fn test_header_and_trailer() {
        let bytes = sample();
        assert!(bytes.starts_with(b"%PDF-1.3\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_text_is_drawn() {
        let bytes = sample();
        assert!(contains(&bytes, b"(Name: Jane Doe) Tj"));
        assert!(contains(&bytes, b"(Email: jane@x.com) Tj"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica"));
    }

    #[test]
    fn test_positions_are_measured_from_top_left() {
        let bytes = sample();
        // 20mm = 56.69pt; 841.89 - 56.69 = 785.20
        assert!(contains(&bytes, b"56.69 785.20 Td"));
        // 30mm = 85.04pt from the top
        assert!(contains(&bytes, b"56.69 756.85 Td"));
    }

    #[test]
    fn test_startxref_points_at_xref_table() {
        let bytes = sample();
        let text = String::from_utf8_lossy(&bytes);
        let tail = text.rsplit("startxref\n").next().unwrap();
        let offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[offset..].starts_with(b"xref\n0 7\n"));
    }

    #[test]
    fn test_xref_entries_point_at_objects() {
        let bytes = sample();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let table = text.split("xref\n0 7\n").nth(1).unwrap();
        let entries: Vec<usize> = table
            .lines()
            .skip(1)
            .take(6)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj\n", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn test_stream_length_matches_content() {
        let mut doc = PdfDocument::new();
        doc.text(20.0, 20.0, "x");
        let content = doc.content_stream();
        let bytes = doc.to_bytes();
        let marker = format!("<< /Length {} >>\nstream\n", content.len());
        assert!(contains(&bytes, marker.as_bytes()));
        assert!(contains(&bytes, &content));
    }

    #[test]
    fn test_multiline_text_uses_next_line_operator() {
        let mut doc = PdfDocument::new();
        doc.text(20.0, 50.0, "first\nsecond");
        let content = doc.content_stream();
        assert!(contains(&content, b"(first) Tj T* (second) Tj"));
        assert!(contains(&content, b"18.40 TL"));
    }

    #[test]
    fn test_encode_text_escapes_and_replaces() {
        assert_eq!(encode_text(r"a(b)c\d"), br"a\(b\)c\\d".to_vec());
        assert_eq!(encode_text("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_text("日本"), b"??".to_vec());
    }

    #[test]
    fn test_encode_text_maps_win_ansi_punctuation() {
        assert_eq!(
            encode_text("O\u{2019}Brien \u{20AC}5"),
            vec![b'O', 0x92, b'B', b'r', b'i', b'e', b'n', b' ', 0x80, b'5']
        );
        assert_eq!(
            encode_text("\u{201C}a\u{201D} \u{2013} \u{2122}"),
            vec![0x93, b'a', 0x94, b' ', 0x96, b' ', 0x99]
        );
    }

    #[test]
    fn test_encode_text_replaces_control_characters() {
        assert_eq!(encode_text("a\u{85}b\u{92}c"), b"a?b?c".to_vec());
        assert_eq!(encode_text("a\u{7}b"), b"a?b".to_vec());
    }
}
