//! Glyph metrics for the PDF base-14 Helvetica faces, used to centre text.

use printpdf::BuiltinFont;

/// Advance widths (1/1000 em) for ASCII 32..=126, Helvetica and Helvetica-Oblique.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths for ASCII 32..=126, Helvetica-Bold.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DEGREE_WIDTH: u16 = 400;
const FALLBACK_WIDTH: u16 = 556;
const PT_TO_MM: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    pub fn builtin(&self) -> BuiltinFont {
        match self {
            FontFace::Regular => BuiltinFont::Helvetica,
            FontFace::Bold => BuiltinFont::HelveticaBold,
            FontFace::Oblique => BuiltinFont::HelveticaOblique,
        }
    }

    fn glyph_width(&self, ch: char) -> u16 {
        let table = match self {
            FontFace::Bold => &HELVETICA_BOLD,
            FontFace::Regular | FontFace::Oblique => &HELVETICA,
        };
        match ch {
            ' '..='~' => table[ch as usize - 32],
            '°' => DEGREE_WIDTH,
            _ => FALLBACK_WIDTH,
        }
    }

    /// Rendered width of `text` in millimetres at `size_pt`.
    pub fn text_width_mm(&self, text: &str, size_pt: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.glyph_width(ch))).sum();
        units as f32 / 1000.0 * size_pt * PT_TO_MM
    }
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * PT_TO_MM
}
