//! Run summaries the stage drivers print on completion.
//!
//! Per-image failures never abort a batch, so the drivers fold each item's
//! `Result` into one of these counters and report the totals at the end.
//! Every skip shows up here; nothing is dropped silently.

/// Counters for one augmentation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentSummary {
    /// Class directories processed
    pub classes: usize,
    /// Images that produced all their variants
    pub processed: usize,
    /// Images skipped after a decode or write failure
    pub skipped: usize,
    /// Output files written across all images
    pub variants_written: usize,
}

impl AugmentSummary {
    /// Folds in one successfully augmented image and its variant count.
    pub fn record_success(&mut self, variants: usize) {
        self.processed += 1;
        self.variants_written += variants;
    }

    /// Folds in one skipped image.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Total number of images the run looked at.
    pub fn total_images(&self) -> usize {
        self.processed + self.skipped
    }
}

impl std::fmt::Display for AugmentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Augmentation summary:")?;
        writeln!(f, "  Classes: {}", self.classes)?;
        writeln!(f, "  Images processed: {}", self.processed)?;
        writeln!(f, "  Images skipped: {}", self.skipped)?;
        write!(f, "  Variants written: {}", self.variants_written)
    }
}

/// Counters for one upload run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Class directories processed
    pub classes: usize,
    /// Objects uploaded and recorded in the manifests
    pub uploaded: usize,
    /// Files whose upload failed; excluded from all manifests
    pub failed: usize,
    /// Rows assigned to the training manifest
    pub train_rows: usize,
    /// Rows assigned to the evaluation manifest
    pub eval_rows: usize,
}

impl UploadSummary {
    /// Folds in one uploaded and recorded object.
    pub fn record_uploaded(&mut self) {
        self.uploaded += 1;
    }

    /// Folds in one failed upload.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }
}

impl std::fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Upload summary:")?;
        writeln!(f, "  Classes: {}", self.classes)?;
        writeln!(f, "  Objects uploaded: {}", self.uploaded)?;
        writeln!(f, "  Uploads failed: {}", self.failed)?;
        write!(
            f,
            "  Manifest rows: {} train, {} eval",
            self.train_rows, self.eval_rows
        )
    }
}
