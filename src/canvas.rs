use image::{Rgba, RgbaImage};

use crate::blend::{self, Rgba8};

/// Request-local raster surface. Owns the pixel buffer for exactly one
/// generation and is consumed by the encoder afterwards.
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0])),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    /// Paints one full-width opaque scanline.
    pub fn fill_scanline(&mut self, y: u32, rgb: [u8; 3]) {
        if y >= self.img.height() {
            return;
        }
        for x in 0..self.img.width() {
            self.img.put_pixel(x, y, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        }
    }

    /// Blends one pixel with source-over; out-of-bounds writes are dropped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, rgba: Rgba8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.img.width() || y >= self.img.height() {
            return;
        }
        let dst = self.img.get_pixel_mut(x, y);
        dst.0 = blend::over(dst.0, rgba);
    }

    /// Blends an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, rgba: Rgba8) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(i64::from(self.img.width()));
        let y1 = y1.min(i64::from(self.img.height()));
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, rgba);
            }
        }
    }

    /// Blends a filled ellipse inscribed in the box at (x, y) with the given
    /// width and height. Hard-edged (no antialiasing): a pixel is covered
    /// when its center lies inside the ellipse.
    pub fn fill_ellipse(&mut self, x: i64, y: i64, w: u32, h: u32, rgba: Rgba8) {
        if w == 0 || h == 0 {
            return;
        }
        let rx = f64::from(w) / 2.0;
        let ry = f64::from(h) / 2.0;
        let cx = x as f64 + rx;
        let cy = y as f64 + ry;

        for py in y..y + i64::from(h) {
            for px in x..x + i64::from(w) {
                let dx = (px as f64 + 0.5 - cx) / rx;
                let dy = (py as f64 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend_pixel(px, py, rgba);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanline_covers_full_width() {
        let mut c = Canvas::new(8, 4);
        c.fill_scanline(2, [9, 8, 7]);
        for x in 0..8 {
            assert_eq!(c.image().get_pixel(x, 2).0, [9, 8, 7, 255]);
        }
        assert_eq!(c.image().get_pixel(0, 1).0[3], 0);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut c = Canvas::new(4, 4);
        c.blend_pixel(-1, 0, [1, 1, 1, 255]);
        c.blend_pixel(0, 99, [1, 1, 1, 255]);
        c.fill_scanline(99, [1, 1, 1]);
        assert!(c.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn rect_is_clipped_to_canvas() {
        let mut c = Canvas::new(4, 4);
        c.fill_rect(-10, -10, 100, 100, [5, 5, 5, 255]);
        assert!(c.image().pixels().all(|p| p.0 == [5, 5, 5, 255]));
    }

    #[test]
    fn ellipse_fills_center_not_corners() {
        let mut c = Canvas::new(20, 20);
        c.fill_ellipse(0, 0, 20, 20, [1, 2, 3, 255]);
        assert_eq!(c.image().get_pixel(10, 10).0, [1, 2, 3, 255]);
        assert_eq!(c.image().get_pixel(0, 0).0[3], 0);
        assert_eq!(c.image().get_pixel(19, 19).0[3], 0);
    }

    #[test]
    fn degenerate_ellipse_is_noop() {
        let mut c = Canvas::new(4, 4);
        c.fill_ellipse(0, 0, 0, 3, [1, 1, 1, 255]);
        c.fill_ellipse(0, 0, 3, 0, [1, 1, 1, 255]);
        assert!(c.image().pixels().all(|p| p.0[3] == 0));
    }
}
