//! Output naming and JPEG persistence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use imageset_core::{Error, Result};

/// Fixed encoding quality for every output image. One setting across the
/// whole dataset keeps the size/fidelity trade-off consistent.
pub const JPEG_QUALITY: u8 = 98;

/// Builds the output file name for a variant of `source`:
/// the source's base name (extension stripped) plus the variant suffix,
/// always with a `.jpg` extension.
pub fn variant_file_name(source: &Path, suffix: &str) -> Result<String> {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::InvalidPath(format!("no usable file name in {}", source.display())))?;
    Ok(format!("{stem}{suffix}.jpg"))
}

/// Encodes `image` as a quality-98 JPEG at `path`.
pub fn save_jpeg(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|e| Error::Encode {
            path: path.to_path_buf(),
            source: e,
        })?;
    writer.flush()?;
    Ok(())
}
