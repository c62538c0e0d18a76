use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

/// Encodes `s` for a Type1 font using `/WinAnsiEncoding`.
///
/// Latin-1 maps onto itself; the euro sign, dashes and the narrow no-break
/// space are remapped; anything else becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{0}'..='\u{7f}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '’' => 0x92,
            '–' => 0x96,
            '—' => 0x97,
            '\u{202f}' => 0xa0,
            _ => b'?',
        })
        .collect()
}

/// Operations drawing `text` with its left edge at `x` and baseline at `y`
/// (PDF user space, points).
pub fn text_operations(font_resource: &str, font_size: f32, x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(font_resource.as_bytes().to_vec()), font_size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::String(to_win_ansi(text), StringFormat::Literal)]),
        Operation::new("ET", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_amount_encodes_to_single_bytes() {
        assert_eq!(to_win_ansi("1\u{202f}000,00 €"), vec![b'1', 0xa0, b'0', b'0', b'0', b',', b'0', b'0', b' ', 0x80]);
        assert_eq!(to_win_ansi("—"), vec![0x97]);
        assert_eq!(to_win_ansi("Échéance"), vec![0xc9, b'c', b'h', 0xe9, b'a', b'n', b'c', b'e']);
        assert_eq!(to_win_ansi("→"), vec![b'?']);
    }

    #[test]
    fn text_block_is_bracketed() {
        let ops = text_operations("F1", 9.0, 10.0, 20.0, "Page 1 / 1");
        let names: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(names, ["BT", "Tf", "Td", "Tj", "ET"]);
    }
}
