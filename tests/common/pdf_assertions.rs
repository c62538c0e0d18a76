use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};

/// A string drawn with `Tj`, with the text position set by the last `Td`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r as f32,
        _ => f32::NAN,
    }
}

/// Decodes WinAnsi bytes for the characters the exporter writes.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| match b {
            0x80 => '€',
            0x92 => '’',
            0x96 => '–',
            0x97 => '—',
            _ => *b as char,
        })
        .collect()
}

/// Every string drawn on page `page` (1-based), in content order.
pub fn drawn_text(doc: &LopdfDocument, page: u32) -> Vec<DrawnText> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page) else {
        return Vec::new();
    };
    let Ok(bytes) = doc.get_page_content(*page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&bytes) else {
        return Vec::new();
    };

    let mut drawn = Vec::new();
    let (mut x, mut y, mut font_size) = (0.0, 0.0, 0.0);
    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" if op.operands.len() == 2 => font_size = number(&op.operands[1]),
            "Td" if op.operands.len() == 2 => {
                x = number(&op.operands[0]);
                y = number(&op.operands[1]);
            }
            "Tj" => {
                if let Some(Ok(text)) = op.operands.first().map(|o| o.as_str()) {
                    drawn.push(DrawnText { text: decode_win_ansi(text), x, y, font_size });
                }
            }
            _ => {}
        }
    }
    drawn
}

/// All strings drawn on a page.
pub fn page_strings(doc: &LopdfDocument, page: u32) -> Vec<String> {
    drawn_text(doc, page).into_iter().map(|d| d.text).collect()
}

/// Extract the strings of every page, one line per string
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page in 1..=doc.get_pages().len() as u32 {
        for line in page_strings(doc, page) {
            text.push_str(&line);
            text.push('\n');
        }
    }
    text
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}
