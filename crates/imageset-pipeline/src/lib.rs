//! Augmentation, manifest, and upload stages of the imageset preparation
//! pipeline.
//!
//! This crate turns a tree of class-labeled images into resized JPEG training
//! variants, and pushes the results to an object store together with the
//! manifest files downstream training tooling consumes.

pub mod compositor;
pub mod crop;
pub mod manifest;
pub mod output;
pub mod policy;
pub mod resize;
pub mod summary;
pub mod upload;
pub mod walker;

pub use compositor::{alpha_composite, white_background};
pub use crop::center_crop;
pub use manifest::{write_class_dictionary, ManifestCounts, ManifestWriter};
pub use output::{save_jpeg, variant_file_name, JPEG_QUALITY};
pub use policy::{Augmenter, Variant, VariantKind};
pub use resize::{scale_exact, scale_to_fit};
pub use summary::{AugmentSummary, UploadSummary};
pub use upload::{object_name, object_url, GcsClient, GcsCredentials};
pub use walker::{class_files, discover_classes};

/// Re-export of the most commonly used items
pub mod prelude {
    pub use crate::compositor::*;
    pub use crate::crop::*;
    pub use crate::manifest::*;
    pub use crate::output::*;
    pub use crate::policy::*;
    pub use crate::resize::*;
    pub use crate::summary::*;
    pub use crate::upload::*;
    pub use crate::walker::*;
}
