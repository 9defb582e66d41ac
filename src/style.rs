//! Process-wide read-only styling configuration. Nothing in here is ever
//! mutated at runtime; the compositor only reads these tables.

/// Fill colors for the decorative shape pass, indexed by uniform draw.
pub const PALETTE: [[u8; 3]; 5] = [
    [255, 122, 89],
    [167, 139, 250],
    [99, 102, 241],
    [34, 211, 238],
    [253, 224, 71],
];

pub const GRADIENT_TOP: [u8; 3] = [240, 240, 255];
pub const GRADIENT_BOTTOM: [u8; 3] = [200, 220, 240];

pub const SHAPE_COUNT: usize = 6;
pub const SHAPE_ALPHA: u8 = 180;

/// Ordered keyword table; the first case-insensitive substring match wins.
/// Configuration data inherited as-is (including the bilingual entries);
/// deliberately not extended.
pub const KEYWORD_GLYPHS: [(&str, char); 6] = [
    ("cat", '\u{1F63A}'),
    ("kucing", '\u{1F63A}'),
    ("rocket", '\u{1F680}'),
    ("tree", '\u{1F333}'),
    ("flower", '\u{1F338}'),
    ("dog", '\u{1F436}'),
];

pub const DEFAULT_GLYPH: char = '\u{1F3A8}';

/// Subject glyph size as a fraction of min(width, height).
pub const SUBJECT_SCALE: f32 = 0.28;

pub const CAPTION_SCALE: f32 = 0.04;
pub const CAPTION_MIN_PX: f32 = 12.0;
pub const CAPTION_MAX_CHARS: usize = 120;

pub const CAPTION_PAD_X: i64 = 8;
pub const CAPTION_PANEL_BOTTOM: i64 = 8;
pub const CAPTION_PANEL_TOP_MARGIN: i64 = 18;
pub const CAPTION_TEXT_BOTTOM_MARGIN: i64 = 14;
pub const CAPTION_PANEL_RGBA: [u8; 4] = [0, 0, 0, 80];
pub const CAPTION_TEXT_RGBA: [u8; 4] = [255, 255, 255, 220];

/// Selects the subject glyph for a prompt by first-match keyword scan.
pub fn subject_glyph(prompt: &str) -> char {
    let lower = prompt.to_lowercase();
    for (keyword, glyph) in KEYWORD_GLYPHS {
        if lower.contains(keyword) {
            return glyph;
        }
    }
    DEFAULT_GLYPH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(subject_glyph("A Big CAT on a roof"), '\u{1F63A}');
        assert_eq!(subject_glyph("ROCKET launch"), '\u{1F680}');
    }

    #[test]
    fn first_match_wins_in_table_order() {
        // "cat" precedes "dog" in the table, so a prompt containing both
        // resolves to the cat glyph.
        assert_eq!(subject_glyph("dog chasing cat"), '\u{1F63A}');
    }

    #[test]
    fn no_match_falls_back_to_default() {
        assert_eq!(subject_glyph("abstract waves"), DEFAULT_GLYPH);
        assert_eq!(subject_glyph(""), DEFAULT_GLYPH);
    }

    #[test]
    fn substring_match_inside_words() {
        // The scan is a plain substring match, so "concatenate" hits "cat".
        assert_eq!(subject_glyph("concatenate"), '\u{1F63A}');
    }
}
