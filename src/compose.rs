use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    blend,
    canvas::Canvas,
    font::FontStack,
    style::{self, PALETTE},
};

/// Stage 1: vertical two-color gradient, prompt-independent.
pub fn paint_gradient(canvas: &mut Canvas) {
    let height = canvas.height();
    let denom = height.saturating_sub(1).max(1) as f32;
    for i in 0..height {
        let t = i as f32 / denom;
        let rgb = blend::lerp_rgb(style::GRADIENT_TOP, style::GRADIENT_BOTTOM, t);
        canvas.fill_scanline(i, rgb);
    }
}

/// Stage 2: exactly six seeded decorative ellipses. Per shape the draws are
/// width, height, x, y, palette index, in that order; reordering them would
/// change every image for every prompt.
pub fn paint_shapes(canvas: &mut Canvas, seed: u32) {
    let width = canvas.width();
    let height = canvas.height();
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));

    for _ in 0..style::SHAPE_COUNT {
        let w = rng.gen_range(span(width, 0.08)..=span(width, 0.4));
        let h = rng.gen_range(span(height, 0.06)..=span(height, 0.3));
        let x = rng.gen_range(0..=width.saturating_sub(w));
        let y = rng.gen_range(0..=height.saturating_sub(h));
        let rgb = PALETTE[rng.gen_range(0..PALETTE.len())];
        canvas.fill_ellipse(
            i64::from(x),
            i64::from(y),
            w,
            h,
            [rgb[0], rgb[1], rgb[2], style::SHAPE_ALPHA],
        );
    }
}

fn span(dim: u32, factor: f32) -> u32 {
    (dim as f32 * factor) as u32
}

/// Stage 3: keyword-selected subject glyph, centered on both axes.
pub fn paint_subject(canvas: &mut Canvas, prompt: &str, fonts: &FontStack) {
    let glyph = style::subject_glyph(prompt);
    let size = canvas.width().min(canvas.height()) as f32 * style::SUBJECT_SCALE;
    debug!(%glyph, size, "subject stage");

    if fonts.has_outline(glyph) {
        let text = glyph.to_string();
        let (tw, th) = fonts.measure(&text, size);
        let x = (i64::from(canvas.width()) - i64::from(tw)) / 2;
        let y = (i64::from(canvas.height()) - i64::from(th)) / 2;
        fonts.draw(canvas, &text, x, y, size, [255, 255, 255, 255]);
    } else {
        draw_medallion(canvas, glyph, size as i64);
    }
}

/// Eight axis/diagonal unit directions, scaled by 10 to stay in integer
/// math. Trigonometry is deliberately avoided here: libm results are not
/// bit-identical across platforms, and the subject must be.
const MEDALLION_DIRS: [(i64, i64); 8] = [
    (10, 0),
    (7, 7),
    (0, 10),
    (-7, 7),
    (-10, 0),
    (-7, -7),
    (0, -10),
    (7, -7),
];

/// Built-in subject rendering for glyphs the preferred face cannot outline
/// (the subject table is emoji, which most text faces lack). The petal
/// count, palette color, and rotation all derive from the codepoint, so
/// distinct subjects stay visibly distinct without any font at all.
fn draw_medallion(canvas: &mut Canvas, glyph: char, diameter: i64) {
    let m = mix64(u64::from(u32::from(glyph)));
    let rgb = PALETTE[(m % PALETTE.len() as u64) as usize];
    let petals = 3 + ((m >> 8) % 5) as usize;
    let rotation = ((m >> 16) % 8) as usize;

    let cx = i64::from(canvas.width()) / 2;
    let cy = i64::from(canvas.height()) / 2;
    let radius = diameter / 2;
    let petal = diameter * 3 / 10;
    let orbit = radius * 55 / 100;

    for k in 0..petals {
        let (dx, dy) = MEDALLION_DIRS[(rotation + k * 8 / petals) % 8];
        let px = cx + dx * orbit / 10 - petal / 2;
        let py = cy + dy * orbit / 10 - petal / 2;
        canvas.fill_ellipse(px, py, petal as u32, petal as u32, [
            rgb[0], rgb[1], rgb[2], 255,
        ]);
    }

    let core = diameter * 45 / 100;
    canvas.fill_ellipse(cx - core / 2, cy - core / 2, core as u32, core as u32, [
        255, 255, 255, 235,
    ]);
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Stage 4: caption text over a translucent bottom panel.
pub fn paint_caption(canvas: &mut Canvas, prompt: &str, fonts: &FontStack) {
    let caption = truncate_caption(prompt);
    let px = (canvas.width().min(canvas.height()) as f32 * style::CAPTION_SCALE)
        .max(style::CAPTION_MIN_PX);
    let (tw, th) = fonts.measure(&caption, px);

    let w = i64::from(canvas.width());
    let h = i64::from(canvas.height());
    let tw = i64::from(tw);
    let th = i64::from(th);

    canvas.fill_rect(
        (w - tw) / 2 - style::CAPTION_PAD_X,
        h - th - style::CAPTION_PANEL_TOP_MARGIN,
        (w + tw) / 2 + style::CAPTION_PAD_X,
        h - style::CAPTION_PANEL_BOTTOM,
        style::CAPTION_PANEL_RGBA,
    );
    fonts.draw(
        canvas,
        &caption,
        (w - tw) / 2,
        h - th - style::CAPTION_TEXT_BOTTOM_MARGIN,
        px,
        style::CAPTION_TEXT_RGBA,
    );
}

/// Clips the caption to 120 characters, marking the cut with an ellipsis.
/// Character-based, so multi-byte prompts never split a code point.
pub fn truncate_caption(prompt: &str) -> String {
    if prompt.chars().count() <= style::CAPTION_MAX_CHARS {
        return prompt.to_string();
    }
    let mut out: String = prompt.chars().take(style::CAPTION_MAX_CHARS).collect();
    out.push_str("...");
    out
}
