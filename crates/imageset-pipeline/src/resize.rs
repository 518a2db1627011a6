//! Resizing primitives for the augmentation pipeline.
//!
//! Two modes: an exact stretch that disregards aspect ratio (the base
//! variant), and an aspect-preserving scale-to-fit that grows the image
//! until it covers the requested box (feeding the center crop). Both use
//! Lanczos3 resampling; training-set fidelity rules out nearest-neighbor
//! or box filters.

use image::imageops::{self, FilterType};
use image::RgbImage;
use imageset_core::{Error, Result};

/// Stretches `image` to exactly `target_width` x `target_height`,
/// disregarding the original aspect ratio.
pub fn scale_exact(image: &RgbImage, target_width: u32, target_height: u32) -> Result<RgbImage> {
    check_dimensions(target_width, target_height)?;
    Ok(imageops::resize(
        image,
        target_width,
        target_height,
        FilterType::Lanczos3,
    ))
}

/// Scales `image` so it covers at least `target_width` x `target_height`
/// while preserving its aspect ratio, growing whichever dimension is needed.
pub fn scale_to_fit(image: &RgbImage, target_width: u32, target_height: u32) -> Result<RgbImage> {
    check_dimensions(target_width, target_height)?;
    let (width, height) = fitted_dimensions(
        image.width(),
        image.height(),
        target_width,
        target_height,
    );
    Ok(imageops::resize(image, width, height, FilterType::Lanczos3))
}

/// Computes the aspect-preserving cover dimensions for `scale_to_fit`.
///
/// The grown dimension is truncated toward zero, matching construction of an
/// integer from the real-valued quotient; the kept dimension is exact.
fn fitted_dimensions(
    image_width: u32,
    image_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    let image_aspect = image_width as f64 / image_height as f64;
    let target_aspect = target_width as f64 / target_height as f64;

    if image_aspect < target_aspect {
        // Relatively taller than the target box: keep the width, grow the height.
        (target_width, (target_width as f64 / image_aspect) as u32)
    } else {
        ((target_height as f64 * image_aspect) as u32, target_height)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}
