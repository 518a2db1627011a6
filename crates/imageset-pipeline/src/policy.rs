//! Per-image augmentation policy.
//!
//! One decoded image in, one or two output variants out. Every image yields
//! the plain resize; sources that are meaningfully larger than the target
//! and not square additionally yield a zoom-crop of the center. The zoom
//! trims roughly 9% of linear extent per axis, enough for a distinct
//! training sample without cropping away the subject.

use image::{DynamicImage, RgbImage};
use imageset_core::{Error, Result, TargetSize};

use crate::compositor::{alpha_composite, white_background};
use crate::crop::center_crop;
use crate::resize::{scale_exact, scale_to_fit};

/// Headroom factor for the zoom-crop: the crop candidate is scaled to cover
/// a box 10% larger than the target, and the area test uses the same factor.
const CROP_HEADROOM: f64 = 1.1;

/// Which variant of a source image an output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// Plain resize to the target dimensions
    Base,
    /// Zoom into the center, then crop to the target dimensions
    CenterCrop,
}

impl VariantKind {
    /// File-name suffix for this variant. Suffixes are fixed and
    /// non-overlapping, so variants of one source never collide.
    pub fn suffix(&self) -> &'static str {
        match self {
            VariantKind::Base => "",
            VariantKind::CenterCrop => "-centercrop",
        }
    }
}

/// One output image produced from a source image.
pub struct Variant {
    /// Rendered pixels, exactly the target dimensions
    pub image: RgbImage,
    /// Variant identity, determines the output file name
    pub kind: VariantKind,
}

/// Applies the augmentation policy to decoded images.
pub struct Augmenter {
    target: TargetSize,
}

impl Augmenter {
    /// Creates an augmenter for the given target size.
    ///
    /// A zero dimension is rejected here, before any image is touched.
    pub fn new(target: TargetSize) -> Result<Self> {
        if target.width == 0 || target.height == 0 {
            return Err(Error::InvalidDimensions {
                width: target.width,
                height: target.height,
            });
        }
        Ok(Self { target })
    }

    /// Produces the output variants for one image, base variant first.
    pub fn augment(&self, image: DynamicImage) -> Result<Vec<Variant>> {
        let normalized = self.normalize(image)?;
        let (width, height) = normalized.dimensions();
        let original_area = width as u64 * height as u64;

        let base = scale_exact(&normalized, self.target.width, self.target.height)?;
        let mut variants = vec![Variant {
            image: base,
            kind: VariantKind::Base,
        }];

        if self.skip_crop(original_area, width, height) {
            return Ok(variants);
        }

        let fit_width = (self.target.width as f64 * CROP_HEADROOM) as u32;
        let fit_height = (self.target.height as f64 * CROP_HEADROOM) as u32;
        let fitted = scale_to_fit(&normalized, fit_width, fit_height)?;
        let cropped = center_crop(&fitted, self.target.width, self.target.height)?;
        variants.push(Variant {
            image: cropped,
            kind: VariantKind::CenterCrop,
        });

        Ok(variants)
    }

    /// Flattens transparency onto a white backdrop and converts to RGB.
    fn normalize(&self, image: DynamicImage) -> Result<RgbImage> {
        if image.color().has_alpha() {
            let foreground = image.into_rgba8();
            let (width, height) = foreground.dimensions();
            let backdrop = white_background(width, height);
            alpha_composite(&foreground, &backdrop)
        } else {
            Ok(image.into_rgb8())
        }
    }

    /// The crop variant is skipped when the source is not meaningfully larger
    /// than the target, or when it is square and has no directional slack.
    fn skip_crop(&self, original_area: u64, width: u32, height: u32) -> bool {
        let target_area = self.target.area() as f64;
        original_area as f64 <= target_area * CROP_HEADROOM || width == height
    }
}
