//! Augmentation stage driver.
//!
//! Walks a source tree with one subdirectory per class, renders one or two
//! JPEG variants per image, and writes them into a mirrored tree of
//! lowercased class directories. Per-image failures are logged and counted;
//! the batch always runs to completion.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

use imageset_core::{setup_cli_logging, AugmentConfig, Error, TargetSize};
use imageset_pipeline::{
    class_files, discover_classes, save_jpeg, variant_file_name, Augmenter, AugmentSummary,
};

#[derive(Parser)]
#[command(name = "augment")]
#[command(about = "Renders resized training variants from a class-labeled image tree", long_about = None)]
struct Cli {
    /// The source directory (one subdirectory per class)
    #[arg(short = 's', long = "src")]
    src_dir: PathBuf,

    /// The destination directory
    #[arg(short = 'd', long = "dst")]
    dst_dir: PathBuf,

    /// The resized image's width
    #[arg(short = 'W', long, default_value_t = 299)]
    width: u32,

    /// The resized image's height
    #[arg(short = 'H', long, default_value_t = 299)]
    height: u32,

    /// Number of parallel workers (default: all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_cli_logging(cli.verbose)?;

    let config = AugmentConfig {
        source_dir: cli.src_dir,
        dest_dir: cli.dst_dir,
        target_size: TargetSize::new(cli.width, cli.height),
    };
    config.validate().context("invalid configuration")?;

    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let summary = run(&config)?;
    info!("{summary}");
    Ok(())
}

fn run(config: &AugmentConfig) -> Result<AugmentSummary> {
    let augmenter = Augmenter::new(config.target_size)?;
    let classes = discover_classes(&config.source_dir)?;
    info!(
        "Found {} class directories in {}",
        classes.len(),
        config.source_dir.display()
    );

    fs::create_dir_all(&config.dest_dir).context("Failed to create destination directory")?;

    let mut summary = AugmentSummary::default();
    for class in &classes {
        info!("Processing class: {}", class.name);

        let output_dir = config.dest_dir.join(&class.output_name);
        fs::create_dir_all(&output_dir).context("Failed to create class output directory")?;

        let files = class_files(&class.path)?;
        info!("  Found {} images", files.len());

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );

        let results: Vec<_> = files
            .par_iter()
            .map(|source| {
                let written = process_file(&augmenter, source, &output_dir);
                if let Err(e) = &written {
                    warn!("Skipping {}: {e}", source.display());
                }
                pb.inc(1);
                written
            })
            .collect();
        pb.finish_with_message("Done");

        summary.classes += 1;
        for result in results {
            match result {
                Ok(variants) => summary.record_success(variants),
                Err(_) => summary.record_skip(),
            }
        }
    }

    Ok(summary)
}

/// Renders every variant for one source image; returns the number written.
fn process_file(
    augmenter: &Augmenter,
    source: &Path,
    output_dir: &Path,
) -> imageset_core::Result<usize> {
    let image = image::open(source).map_err(|e| Error::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    let variants = augmenter.augment(image)?;
    let mut written = 0;
    for variant in &variants {
        let name = variant_file_name(source, variant.kind.suffix())?;
        save_jpeg(&variant.image, &output_dir.join(name))?;
        written += 1;
    }
    Ok(written)
}
