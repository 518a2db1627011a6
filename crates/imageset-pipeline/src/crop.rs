//! Deterministic center crop.

use image::imageops;
use image::RgbImage;
use imageset_core::{Error, Result};

/// Extracts the centered `box_width` x `box_height` rectangle from `image`.
///
/// Offsets are `floor((dimension - box) / 2)`. The crop is a pure
/// sub-rectangle read; no resampling occurs. Fails with `CropOutOfBounds`
/// when the box does not fit inside the image.
pub fn center_crop(image: &RgbImage, box_width: u32, box_height: u32) -> Result<RgbImage> {
    let (image_width, image_height) = image.dimensions();
    if box_width > image_width || box_height > image_height {
        return Err(Error::CropOutOfBounds {
            box_width,
            box_height,
            image_width,
            image_height,
        });
    }

    let left = (image_width - box_width) / 2;
    let top = (image_height - box_height) / 2;
    Ok(imageops::crop_imm(image, left, top, box_width, box_height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn test_center_crop_offsets() {
        // Encode coordinates into the pixels so the window position is checkable.
        let img: RgbImage =
            ImageBuffer::from_fn(400, 400, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]));

        let cropped = center_crop(&img, 299, 299).unwrap();
        assert_eq!(cropped.dimensions(), (299, 299));

        // left = top = (400 - 299) / 2 = 50
        assert_eq!(cropped.get_pixel(0, 0), img.get_pixel(50, 50));
        assert_eq!(cropped.get_pixel(298, 298), img.get_pixel(348, 348));
    }

    #[test]
    fn test_center_crop_odd_remainder_floors() {
        // 10 - 5 = 5, floor(5/2) = 2
        let img: RgbImage = ImageBuffer::from_fn(10, 10, |x, y| Rgb([x as u8, y as u8, 0]));
        let cropped = center_crop(&img, 5, 5).unwrap();
        assert_eq!(cropped.get_pixel(0, 0), img.get_pixel(2, 2));
    }

    #[test]
    fn test_center_crop_full_image() {
        let img: RgbImage = ImageBuffer::from_pixel(20, 30, Rgb([7, 8, 9]));
        let cropped = center_crop(&img, 20, 30).unwrap();
        assert_eq!(cropped.dimensions(), (20, 30));
    }

    #[test]
    fn test_center_crop_out_of_bounds() {
        let img: RgbImage = ImageBuffer::new(100, 100);
        let err = center_crop(&img, 101, 50).unwrap_err();
        assert!(matches!(
            err,
            Error::CropOutOfBounds {
                box_width: 101,
                image_width: 100,
                ..
            }
        ));
    }
}
