//! Configuration structures for the imageset preparation pipeline.

use crate::error::{Error, Result};
use crate::types::TargetSize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the augmentation stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Directory containing one subdirectory per class
    pub source_dir: PathBuf,
    /// Directory the augmented tree is written to
    pub dest_dir: PathBuf,
    /// Dimensions every output variant is rendered at
    pub target_size: TargetSize,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("images"),
            dest_dir: PathBuf::from("augmented"),
            target_size: TargetSize::inception(),
        }
    }
}

impl AugmentConfig {
    /// Validates the configuration before any processing begins.
    ///
    /// Zero target dimensions are a fatal configuration error, unlike
    /// per-image failures which are skipped and counted.
    pub fn validate(&self) -> Result<()> {
        if self.target_size.width == 0 || self.target_size.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.target_size.width,
                height: self.target_size.height,
            });
        }
        Ok(())
    }
}

/// Configuration for the upload stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Object store bucket name
    pub bucket: String,
    /// Key prefix objects are stored under
    pub object_dir: String,
    /// Directory containing the augmented class tree to upload
    pub source_dir: PathBuf,
    /// JSON file supplying the bearer token
    pub credentials_file: PathBuf,
    /// Directory the manifest files are written to
    pub manifest_dir: PathBuf,
    /// Probability a record lands in the training manifest
    pub train_fraction: f64,
    /// Seed for the train/eval assignment
    pub seed: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            object_dir: String::new(),
            source_dir: PathBuf::from("augmented"),
            credentials_file: PathBuf::from("google-credentials.json"),
            manifest_dir: PathBuf::from("."),
            train_fraction: 0.7,
            seed: 42,
        }
    }
}

impl UploadConfig {
    /// Validates the configuration before any uploads begin.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(Error::Config("bucket name must not be empty".to_string()));
        }
        if self.object_dir.is_empty() {
            return Err(Error::Config(
                "object directory must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.train_fraction) {
            return Err(Error::Config(format!(
                "train fraction must be within [0.0, 1.0], got {}",
                self.train_fraction
            )));
        }
        Ok(())
    }
}
