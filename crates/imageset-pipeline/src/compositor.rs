//! Alpha compositing onto an opaque background.
//!
//! Implements the standard over-operator for blending a transparent image
//! onto a backdrop, producing an opaque RGB result. Used to flatten
//! transparency before resizing, so JPEG output never inherits undefined
//! color from fully transparent pixels.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageset_core::{Error, Result};

/// Creates a fully opaque white backdrop of the given dimensions.
pub fn white_background(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
}

/// Alpha-blends `foreground` over `background`, returning an opaque RGB image.
///
/// Per pixel and color channel, with alphas normalized to [0, 1]:
///
/// ```text
/// outA = srcA + dstA * (1 - srcA)
/// outC = (srcC*srcA + dstC*dstA*(1 - srcA)) / outA    if outA > 0, else 0
/// ```
///
/// The background is conventionally fully opaque, making `outA` one
/// everywhere; a pixel where both alphas are zero resolves to 0 through the
/// explicit branch rather than dividing by zero. All channel math runs in
/// f64 and is clamped back to u8 at the end.
pub fn alpha_composite(foreground: &RgbaImage, background: &RgbaImage) -> Result<RgbImage> {
    let (fg_width, fg_height) = foreground.dimensions();
    let (bg_width, bg_height) = background.dimensions();
    if (fg_width, fg_height) != (bg_width, bg_height) {
        return Err(Error::ShapeMismatch {
            fg_width,
            fg_height,
            bg_width,
            bg_height,
        });
    }

    let mut out = RgbImage::new(fg_width, fg_height);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let src = foreground.get_pixel(x, y).0;
        let dst = background.get_pixel(x, y).0;

        let src_a = src[3] as f64 / 255.0;
        let dst_a = dst[3] as f64 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let mut blended = [0u8; 3];
        for c in 0..3 {
            let value = if out_a > 0.0 {
                (src[c] as f64 * src_a + dst[c] as f64 * dst_a * (1.0 - src_a)) / out_a
            } else {
                0.0
            };
            blended[c] = channel_from_float(value);
        }
        *pixel = Rgb(blended);
    }

    Ok(out)
}

/// Saturating f64 → u8 channel conversion.
///
/// Out-of-range values clamp to [0, 255]; non-finite values map to 0.
fn channel_from_float(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_foreground_unchanged() {
        let fg = RgbaImage::from_pixel(4, 4, Rgba([10, 120, 240, 255]));
        let bg = white_background(4, 4);

        let out = alpha_composite(&fg, &bg).unwrap();
        assert!(out.pixels().all(|p| p.0 == [10, 120, 240]));
    }

    #[test]
    fn test_transparent_foreground_yields_background() {
        let fg = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 0]));
        let bg = RgbaImage::from_pixel(4, 4, Rgba([30, 60, 90, 255]));

        let out = alpha_composite(&fg, &bg).unwrap();
        assert!(out.pixels().all(|p| p.0 == [30, 60, 90]));
    }

    #[test]
    fn test_transparent_red_over_white_is_pure_white() {
        let fg = RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 0]));
        let bg = white_background(100, 100);

        let out = alpha_composite(&fg, &bg).unwrap();
        assert_eq!(out.dimensions(), (100, 100));
        assert!(out.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_half_transparent_blend() {
        // srcA ~ 0.5 over opaque white: out = src*a + 255*(1-a)
        let fg = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 128]));
        let bg = white_background(2, 2);

        let out = alpha_composite(&fg, &bg).unwrap();
        let expected = (255.0 * (1.0 - 128.0 / 255.0)) as u8;
        assert!(out.pixels().all(|p| p.0 == [expected; 3]));
    }

    #[test]
    fn test_both_transparent_resolves_to_zero() {
        let fg = RgbaImage::from_pixel(3, 3, Rgba([200, 100, 50, 0]));
        let bg = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 0]));

        let out = alpha_composite(&fg, &bg).unwrap();
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_shape_mismatch() {
        let fg = RgbaImage::new(4, 4);
        let bg = white_background(4, 5);

        let err = alpha_composite(&fg, &bg).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                fg_height: 4,
                bg_height: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_channel_from_float_saturates() {
        assert_eq!(channel_from_float(-12.0), 0);
        assert_eq!(channel_from_float(0.0), 0);
        assert_eq!(channel_from_float(128.9), 128);
        assert_eq!(channel_from_float(255.0), 255);
        assert_eq!(channel_from_float(300.0), 255);
    }

    #[test]
    fn test_channel_from_float_non_finite_maps_to_zero() {
        assert_eq!(channel_from_float(f64::NAN), 0);
        assert_eq!(channel_from_float(f64::INFINITY), 0);
        assert_eq!(channel_from_float(f64::NEG_INFINITY), 0);
    }
}
