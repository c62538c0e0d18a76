//! Advance widths of the standard Type1 Helvetica faces.
//!
//! Widths are in thousandths of an em, taken from the Adobe core font metrics
//! for the printable ASCII range. Accented Latin letters reuse the width of
//! their base letter.

/// The standard (non-embedded) fonts this crate writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl StandardFont {
    /// The PostScript name used as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn table(&self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA,
            StandardFont::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    /// Advance width of `c` in thousandths of an em.
    pub fn glyph_width(&self, c: char) -> u16 {
        let ascii = |c: char| self.table()[c as usize - 32];
        match c {
            ' '..='~' => ascii(c),
            'à' | 'â' | 'ä' => ascii('a'),
            'é' | 'è' | 'ê' | 'ë' => ascii('e'),
            'î' | 'ï' => ascii('i'),
            'ô' | 'ö' => ascii('o'),
            'ù' | 'û' | 'ü' => ascii('u'),
            'ç' => ascii('c'),
            'À' | 'Â' => ascii('A'),
            'É' | 'È' | 'Ê' => ascii('E'),
            'Ç' => ascii('C'),
            '\u{a0}' | '\u{202f}' => ascii(' '),
            '—' => 1000,
            '–' => 556,
            '°' => 400,
            _ => 556,
        }
    }

    /// Width of `text` set at `font_size`, in the same unit as `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 * font_size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_label_width_at_nine_points() {
        // P a g e ␣ 1 ␣ / ␣ 3 = 667 + 3*556 + 278 + 556 + 278 + 278 + 278 + 556
        let expected = (667 + 3 * 556 + 278 + 556 + 278 + 278 + 278 + 556) as f32 * 9.0 / 1000.0;
        assert!((StandardFont::Helvetica.text_width("Page 1 / 3", 9.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn accented_letters_use_base_widths() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.glyph_width('é'), font.glyph_width('e'));
        assert_eq!(font.glyph_width('€'), 556);
        assert_eq!(font.glyph_width('—'), 1000);
    }

    #[test]
    fn bold_is_wider_for_lowercase() {
        assert!(StandardFont::HelveticaBold.text_width("interets", 10.0) > StandardFont::Helvetica.text_width("interets", 10.0));
    }
}
