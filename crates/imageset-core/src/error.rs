//! Error types for the imageset preparation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the imageset pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Foreground and background dimensions differ during compositing
    #[error("shape mismatch: foreground is {fg_width}x{fg_height}, background is {bg_width}x{bg_height}")]
    ShapeMismatch {
        fg_width: u32,
        fg_height: u32,
        bg_width: u32,
        bg_height: u32,
    },

    /// Requested resize target has a zero dimension
    #[error("invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Crop box does not fit inside the image
    #[error("crop box {box_width}x{box_height} exceeds image bounds {image_width}x{image_height}")]
    CropOutOfBounds {
        box_width: u32,
        box_height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Source image could not be decoded
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output image could not be encoded
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Object store upload or metadata patch failed
    #[error("upload error: {0}")]
    Upload(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Not found error
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid path error (unusable file name)
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Specialized Result type for imageset pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ShapeMismatch {
            fg_width: 100,
            fg_height: 50,
            bg_width: 100,
            bg_height: 60,
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch: foreground is 100x50, background is 100x60"
        );
    }

    #[test]
    fn test_invalid_dimensions_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 299,
        };
        assert_eq!(err.to_string(), "invalid target dimensions: 0x299");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_result_type() {
        let success: Result<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: Result<i32> = Err(Error::Config("test".to_string()));
        assert!(failure.is_err());
    }
}
