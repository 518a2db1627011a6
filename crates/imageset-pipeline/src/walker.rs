//! Source tree discovery.
//!
//! The expected layout is one subdirectory per class with image files
//! directly inside it. Anything deeper is ignored; hidden entries and
//! files without an extension are skipped. Whether a file actually decodes
//! is decided downstream, where failures are counted per image.

use std::fs;
use std::path::{Path, PathBuf};

use imageset_core::{ClassDir, Error, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Discovers the class subdirectories directly under `source_dir`,
/// sorted by name for deterministic processing order.
pub fn discover_classes(source_dir: &Path) -> Result<Vec<ClassDir>> {
    if !source_dir.is_dir() {
        return Err(Error::NotFound(format!(
            "source directory {}",
            source_dir.display()
        )));
    }

    let mut classes = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(name) => name.to_string(),
            None => continue,
        };
        if name.starts_with('.') {
            continue;
        }

        debug!("Discovered class '{}' at {}", name, entry.path().display());
        classes.push(ClassDir::new(name, entry.path()));
    }

    classes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(classes)
}

/// Lists the candidate files directly inside one class directory, sorted.
///
/// A candidate is a regular, non-hidden file whose name carries an
/// extension; everything else is ignored here rather than reported.
pub fn class_files(class_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(class_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = match entry.file_name().to_str() {
            Some(name) => name,
            None => continue,
        };
        if name.starts_with('.') || !name.contains('.') {
            continue;
        }
        files.push(entry.path().to_path_buf());
    }

    files.sort();
    Ok(files)
}
