//! Core type definitions for the imageset preparation pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A class subdirectory discovered under the source tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassDir {
    /// Class name as it appears on disk (the subdirectory basename)
    pub name: String,
    /// Absolute or run-relative path to the class directory
    pub path: PathBuf,
    /// Lowercased directory name used under the destination tree
    pub output_name: String,
}

impl ClassDir {
    /// Creates a class entry; the output directory name is the lowercased basename.
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        let name = name.into();
        let output_name = name.to_lowercase();
        Self {
            name,
            path,
            output_name,
        }
    }
}

/// Manifest split a record is assigned to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataSplit {
    /// Training manifest
    Train,
    /// Evaluation manifest
    Eval,
}

impl std::fmt::Display for DataSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSplit::Train => write!(f, "train"),
            DataSplit::Eval => write!(f, "eval"),
        }
    }
}

/// Output dimensions every variant is rendered at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetSize {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
}

impl TargetSize {
    /// Creates new target dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Standard InceptionV3 input dimensions (299x299)
    pub fn inception() -> Self {
        Self::new(299, 299)
    }

    /// Total number of pixels
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::inception()
    }
}
