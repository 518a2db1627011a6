//! Upload stage driver.
//!
//! Pushes the augmented class tree to the object store and writes the
//! manifest files downstream training consumes: the class dictionary, the
//! all-data manifest, its train/eval split, and the object-to-file map.
//! A failed upload is logged, counted, and left out of every manifest.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use imageset_core::{setup_cli_logging, UploadConfig};
use imageset_pipeline::manifest::DICTIONARY_FILE;
use imageset_pipeline::{
    class_files, discover_classes, object_name, object_url, write_class_dictionary, GcsClient,
    GcsCredentials, ManifestWriter, UploadSummary,
};

#[derive(Parser)]
#[command(name = "upload")]
#[command(about = "Uploads augmented images to the object store and writes manifests", long_about = None)]
struct Cli {
    /// Object store bucket name
    #[arg(long)]
    bucket: String,

    /// Key prefix the objects are stored under
    #[arg(long)]
    object_dir: String,

    /// Directory containing the augmented class tree
    #[arg(short = 's', long = "src", default_value = "augmented")]
    src_dir: PathBuf,

    /// JSON file supplying the bearer token
    #[arg(long, default_value = "google-credentials.json")]
    credentials: PathBuf,

    /// Directory the manifest files are written to
    #[arg(long, default_value = ".")]
    manifest_dir: PathBuf,

    /// Probability a record lands in the training manifest
    #[arg(long, default_value_t = 0.7)]
    train_fraction: f64,

    /// Seed for the train/eval assignment
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_cli_logging(cli.verbose)?;

    let config = UploadConfig {
        bucket: cli.bucket,
        object_dir: cli.object_dir,
        source_dir: cli.src_dir,
        credentials_file: cli.credentials,
        manifest_dir: cli.manifest_dir,
        train_fraction: cli.train_fraction,
        seed: cli.seed,
    };
    config.validate().context("invalid configuration")?;

    let summary = run(&config)?;
    info!("{summary}");
    Ok(())
}

fn run(config: &UploadConfig) -> Result<UploadSummary> {
    let credentials = GcsCredentials::from_file(&config.credentials_file)?;
    let client = GcsClient::new(&config.bucket, credentials)?;

    let classes = discover_classes(&config.source_dir)?;
    info!(
        "Found {} class directories in {}",
        classes.len(),
        config.source_dir.display()
    );

    fs::create_dir_all(&config.manifest_dir).context("Failed to create manifest directory")?;

    // The dictionary reflects the discovered classes, independent of
    // whether every file in them uploads.
    let dict_path = config.manifest_dir.join(DICTIONARY_FILE);
    let class_names: Vec<String> = classes.iter().map(|c| c.name.clone()).collect();
    write_class_dictionary(&dict_path, &class_names)?;
    info!("Wrote class dictionary to {}", dict_path.display());

    let mut manifest =
        ManifestWriter::create(&config.manifest_dir, config.train_fraction, config.seed)?;
    let mut summary = UploadSummary::default();

    for class in &classes {
        let files = class_files(&class.path)?;
        info!("Uploading class '{}': {} files", class.name, files.len());

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );
        pb.set_message(format!("Class '{}'", class.name));

        for file in &files {
            match upload_file(&client, config, &class.name, file, &mut manifest) {
                Ok(()) => summary.record_uploaded(),
                Err(e) => {
                    warn!("Skipping {}: {e}", file.display());
                    summary.record_failure();
                }
            }
            pb.inc(1);
        }
        pb.finish_with_message("Done");

        manifest.flush()?;
        summary.classes += 1;
    }

    let counts = manifest.finish()?;
    summary.train_rows = counts.train;
    summary.eval_rows = counts.eval;

    Ok(summary)
}

/// Uploads one file and records it in the manifests. The manifest rows are
/// written only after the upload succeeded.
fn upload_file(
    client: &GcsClient,
    config: &UploadConfig,
    class_name: &str,
    file: &Path,
    manifest: &mut ManifestWriter,
) -> imageset_core::Result<()> {
    let name = object_name(&config.object_dir, class_name, file)?;
    client.upload(file, &name)?;

    let url = object_url(&config.bucket, &name);
    manifest.record(&url, class_name, file)?;
    Ok(())
}
