use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage, RgbaImage};

use crate::error::{PromptpixError, PromptpixResult};

/// Flattens the canvas against opaque white and encodes it as a PNG data
/// URI. Alpha is not preserved in the final payload.
pub fn to_png_data_uri(img: &RgbaImage) -> PromptpixResult<String> {
    let flat = flatten_on_white(img);

    let mut buf = Cursor::new(Vec::new());
    flat.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| PromptpixError::render(format!("png encode failed: {e}")))?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(buf.into_inner())
    ))
}

fn flatten_on_white(img: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, p) in img.enumerate_pixels() {
        let a = u32::from(p.0[3]);
        let inv = 255 - a;
        let mut rgb = [0u8; 3];
        for i in 0..3 {
            rgb[i] = ((u32::from(p.0[i]) * a + 255 * inv + 127) / 255) as u8;
        }
        out.put_pixel(x, y, Rgb(rgb));
    }
    out
}
