pub type Rgba8 = [u8; 4];

/// Straight-alpha source-over in integer math.
///
/// The compositor works in straight (non-premultiplied) RGBA because the
/// canvas starts from an opaque gradient and every later pass blends onto
/// already-opaque pixels; the general formula is still handled so partially
/// covered pixels stay well defined.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;

    // out_a * 255 == sa*255 + da*inv
    let den = sa * 255 + da * inv;
    if den == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    out[3] = ((den + 127) / 255) as u8;
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = ((num + den / 2) / den) as u8;
    }
    out
}

/// Linear per-channel blend between two opaque RGB endpoints.
pub fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = (f32::from(a[i]) * (1.0 - t) + f32::from(b[i]) * t) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_src_alpha_0_is_noop() {
        let dst = [10, 20, 30, 255];
        let src = [255, 255, 255, 0];
        assert_eq!(over(dst, src), dst);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        let dst = [0, 0, 0, 255];
        let src = [255, 0, 0, 255];
        assert_eq!(over(dst, src), src);
    }

    #[test]
    fn over_on_opaque_dst_stays_opaque() {
        let out = over([100, 100, 100, 255], [200, 0, 0, 180]);
        assert_eq!(out[3], 255);
        assert!(out[0] > 100);
    }

    #[test]
    fn over_both_transparent_is_transparent() {
        assert_eq!(over([9, 9, 9, 0], [7, 7, 7, 0]), [9, 9, 9, 0]);
    }

    #[test]
    fn lerp_rgb_hits_endpoints() {
        assert_eq!(lerp_rgb([10, 20, 30], [200, 210, 220], 0.0), [10, 20, 30]);
        assert_eq!(
            lerp_rgb([10, 20, 30], [200, 210, 220], 1.0),
            [200, 210, 220]
        );
    }
}
