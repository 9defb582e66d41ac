use std::path::Path;

use rusttype::{Font, Scale, point};

use crate::{blend::Rgba8, canvas::Canvas};

/// Two-step font capability lookup: a preferred system face when one can be
/// loaded, otherwise the built-in bitmap face. Fallback is a capability
/// decision made up front, not an error path, so the render pipeline stays
/// branch-free in the common case.
pub struct FontStack {
    system: Option<Font<'static>>,
}

const FONT_ENV: &str = "PROMPTPIX_FONT";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

impl FontStack {
    pub fn locate() -> Self {
        Self {
            system: load_system_face(),
        }
    }

    /// Builds a stack that always uses the built-in face. Used by tests that
    /// must not depend on host fonts.
    pub fn builtin_only() -> Self {
        Self { system: None }
    }

    /// True when the preferred face exists and maps `ch` to a real outline
    /// (not the .notdef glyph).
    pub fn has_outline(&self, ch: char) -> bool {
        match &self.system {
            Some(font) => font.glyph(ch).id().0 != 0,
            None => false,
        }
    }

    /// Pixel extent of `text` at the given size: (width, line height).
    pub fn measure(&self, text: &str, px: f32) -> (u32, u32) {
        match &self.system {
            Some(font) => measure_system(font, text, px),
            None => measure_builtin(text, px),
        }
    }

    /// Draws `text` with its top-left corner at (x, y).
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: i64, y: i64, px: f32, rgba: Rgba8) {
        match &self.system {
            Some(font) => draw_system(font, canvas, text, x, y, px, rgba),
            None => draw_builtin(canvas, text, x, y, px, rgba),
        }
    }
}

fn load_system_face() -> Option<Font<'static>> {
    let from_env = std::env::var(FONT_ENV).ok();
    let candidates = from_env
        .iter()
        .map(String::as_str)
        .chain(FONT_CANDIDATES.iter().copied());

    for path in candidates {
        if !Path::new(path).is_file() {
            continue;
        }
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        if let Some(font) = Font::try_from_vec(bytes) {
            tracing::debug!(path, "loaded preferred font face");
            return Some(font);
        }
    }
    tracing::debug!("no preferred font face found, using built-in face");
    None
}

fn measure_system(font: &Font<'static>, text: &str, px: f32) -> (u32, u32) {
    let scale = Scale::uniform(px);
    let vm = font.v_metrics(scale);
    let line_height = (vm.ascent - vm.descent).ceil().max(1.0) as u32;
    if text.is_empty() {
        return (0, line_height);
    }

    let mut width: f32 = 0.0;
    for glyph in font.layout(text, scale, point(0.0, vm.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            width = width.max(bb.max.x as f32);
        }
        width = width.max(glyph.position().x + glyph.unpositioned().h_metrics().advance_width);
    }
    (width.ceil() as u32, line_height)
}

fn draw_system(
    font: &Font<'static>,
    canvas: &mut Canvas,
    text: &str,
    x: i64,
    y: i64,
    px: f32,
    rgba: Rgba8,
) {
    let scale = Scale::uniform(px);
    let vm = font.v_metrics(scale);
    let baseline = y as f32 + vm.ascent;

    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let a = (v * f32::from(rgba[3])) as u8;
            if a == 0 {
                return;
            }
            let tx = i64::from(gx) + i64::from(bb.min.x);
            let ty = i64::from(gy) + i64::from(bb.min.y);
            canvas.blend_pixel(tx, ty, [rgba[0], rgba[1], rgba[2], a]);
        });
    }
}

// ---- built-in face -------------------------------------------------------

/// Integer upscale factor for the 5x7 base cell at a requested pixel size.
fn builtin_scale(px: f32) -> i64 {
    ((px / 8.0).round() as i64).max(1)
}

fn measure_builtin(text: &str, px: f32) -> (u32, u32) {
    let s = builtin_scale(px);
    let n = text.chars().count() as i64;
    let width = if n == 0 { 0 } else { n * 6 * s - s };
    (width as u32, (7 * s) as u32)
}

fn draw_builtin(canvas: &mut Canvas, text: &str, x: i64, y: i64, px: f32, rgba: Rgba8) {
    let s = builtin_scale(px);
    let mut cx = x;
    for ch in text.chars() {
        let columns = builtin_glyph(ch);
        for (col, &bits) in columns.iter().enumerate() {
            for row in 0i64..7 {
                if (bits >> row) & 1 != 0 {
                    let px0 = cx + col as i64 * s;
                    let py0 = y + row * s;
                    canvas.fill_rect(px0, py0, px0 + s, py0 + s, rgba);
                }
            }
        }
        cx += 6 * s;
    }
}

/// 5x7 column bitmap for a character; bit 0 is the top row. Characters
/// outside the printable ASCII range render as a hollow box.
fn builtin_glyph(ch: char) -> [u8; 5] {
    let idx = ch as u32;
    if !(0x20..0x7F).contains(&idx) {
        return [0x7F, 0x41, 0x41, 0x41, 0x7F];
    }
    BUILTIN_FACE[(idx - 0x20) as usize]
}

/// Classic public-domain 5x7 bitmap face, ASCII 0x20..=0x7E.
const BUILTIN_FACE: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x41, 0x22, 0x14, 0x08, 0x00], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x01, 0x01], // 'F'
    [0x3E, 0x41, 0x41, 0x51, 0x32], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x03, 0x04, 0x78, 0x04, 0x03], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x00, 0x7F, 0x41, 0x41], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x41, 0x41, 0x7F, 0x00, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x00, 0x7F, 0x10, 0x28, 0x44], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x08, 0x2A, 0x1C, 0x08], // '~'
];
