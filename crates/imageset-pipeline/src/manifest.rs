//! Manifest emission for uploaded objects.
//!
//! Four files describe one upload run: `all_data.csv` maps every object URL
//! to its class label, `train_data.csv` and `eval_data.csv` partition the
//! same records by an independent seeded coin flip, and `file_map.tsv` maps
//! object URLs back to the local files they came from. `dict.txt` lists the
//! class names. Downstream training tooling consumes these files, so the
//! row bytes must not drift: CRLF terminators, minimal quoting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use imageset_core::{DataSplit, Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const ALL_DATA_FILE: &str = "all_data.csv";
pub const TRAIN_DATA_FILE: &str = "train_data.csv";
pub const EVAL_DATA_FILE: &str = "eval_data.csv";
pub const FILE_MAP_FILE: &str = "file_map.tsv";
pub const DICTIONARY_FILE: &str = "dict.txt";

/// Row counts accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestCounts {
    pub total: usize,
    pub train: usize,
    pub eval: usize,
}

/// Owns the manifest file handles for one upload run.
///
/// Opened once, flushed after each class chunk, closed deterministically by
/// [`ManifestWriter::finish`].
pub struct ManifestWriter {
    all: BufWriter<File>,
    train: BufWriter<File>,
    eval: BufWriter<File>,
    file_map: BufWriter<File>,
    rng: ChaCha8Rng,
    train_fraction: f64,
    counts: ManifestCounts,
}

impl ManifestWriter {
    /// Creates the four manifest files under `dir`, truncating existing ones.
    pub fn create(dir: &Path, train_fraction: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&train_fraction) {
            return Err(Error::Config(format!(
                "train fraction must be within [0.0, 1.0], got {train_fraction}"
            )));
        }

        let open = |name: &str| -> Result<BufWriter<File>> {
            Ok(BufWriter::new(File::create(dir.join(name))?))
        };

        Ok(Self {
            all: open(ALL_DATA_FILE)?,
            train: open(TRAIN_DATA_FILE)?,
            eval: open(EVAL_DATA_FILE)?,
            file_map: open(FILE_MAP_FILE)?,
            rng: ChaCha8Rng::seed_from_u64(seed),
            train_fraction,
            counts: ManifestCounts::default(),
        })
    }

    /// Appends one uploaded object: its all-data row, its file-map row, and
    /// a row in exactly one of train/eval chosen by an independent draw with
    /// the configured probability. Returns the assignment.
    pub fn record(
        &mut self,
        object_url: &str,
        class_label: &str,
        local_path: &Path,
    ) -> Result<DataSplit> {
        let class_row = csv_row(&[object_url, class_label], ',');
        self.all.write_all(class_row.as_bytes())?;

        let split = if self.rng.gen_bool(self.train_fraction) {
            DataSplit::Train
        } else {
            DataSplit::Eval
        };
        match split {
            DataSplit::Train => {
                self.train.write_all(class_row.as_bytes())?;
                self.counts.train += 1;
            }
            DataSplit::Eval => {
                self.eval.write_all(class_row.as_bytes())?;
                self.counts.eval += 1;
            }
        }

        let local = local_path.display().to_string();
        let map_row = csv_row(&[object_url, &local], '\t');
        self.file_map.write_all(map_row.as_bytes())?;

        self.counts.total += 1;
        Ok(split)
    }

    /// Flushes all manifests; called after each class chunk.
    pub fn flush(&mut self) -> Result<()> {
        self.all.flush()?;
        self.train.flush()?;
        self.eval.flush()?;
        self.file_map.flush()?;
        Ok(())
    }

    /// Final flush and close, returning the accumulated row counts.
    pub fn finish(mut self) -> Result<ManifestCounts> {
        self.flush()?;
        Ok(self.counts)
    }
}

/// Writes the class dictionary: one name per line, `\n` terminated.
pub fn write_class_dictionary(path: &Path, class_names: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for name in class_names {
        writer.write_all(name.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders one row with a CRLF terminator and minimal quoting.
fn csv_row(fields: &[&str], delimiter: char) -> String {
    let mut row = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            row.push(delimiter);
        }
        row.push_str(&csv_field(field, delimiter));
    }
    row.push_str("\r\n");
    row
}

/// Quotes a field only when it contains the delimiter, a quote, or a line
/// break; embedded quotes are doubled.
fn csv_field(field: &str, delimiter: char) -> String {
    let needs_quoting = field.contains(delimiter)
        || field.contains('"')
        || field.contains('\r')
        || field.contains('\n');
    if !needs_quoting {
        return field.to_string();
    }

    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push('"');
    for ch in field.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_all_data_rows_byte_exact() {
        let dir = TempDir::new().unwrap();
        let mut writer = ManifestWriter::create(dir.path(), 0.7, 42).unwrap();

        writer
            .record(
                "gs://bucket/prefix/koffer/abc.jpg",
                "koffer",
                Path::new("augmented/koffer/one.jpg"),
            )
            .unwrap();
        writer
            .record(
                "gs://bucket/prefix/tasche/def.jpg",
                "tasche",
                Path::new("augmented/tasche/two.jpg"),
            )
            .unwrap();
        writer.finish().unwrap();

        assert_eq!(
            read(&dir, ALL_DATA_FILE),
            "gs://bucket/prefix/koffer/abc.jpg,koffer\r\n\
             gs://bucket/prefix/tasche/def.jpg,tasche\r\n"
        );
        assert_eq!(
            read(&dir, FILE_MAP_FILE),
            "gs://bucket/prefix/koffer/abc.jpg\taugmented/koffer/one.jpg\r\n\
             gs://bucket/prefix/tasche/def.jpg\taugmented/tasche/two.jpg\r\n"
        );
    }

    #[test]
    fn test_every_record_lands_in_exactly_one_split() {
        let dir = TempDir::new().unwrap();
        let mut writer = ManifestWriter::create(dir.path(), 0.7, 42).unwrap();

        for i in 0..50 {
            let url = format!("gs://bucket/prefix/c/{i}.jpg");
            writer
                .record(&url, "c", &PathBuf::from(format!("augmented/c/{i}.jpg")))
                .unwrap();
        }
        let counts = writer.finish().unwrap();

        assert_eq!(counts.total, 50);
        assert_eq!(counts.train + counts.eval, 50);

        let train_rows = read(&dir, TRAIN_DATA_FILE).lines().count();
        let eval_rows = read(&dir, EVAL_DATA_FILE).lines().count();
        assert_eq!(train_rows, counts.train);
        assert_eq!(eval_rows, counts.eval);
    }

    #[test]
    fn test_split_assignment_reproducible() {
        let run = |dir: &TempDir| {
            let mut writer = ManifestWriter::create(dir.path(), 0.7, 1234).unwrap();
            for i in 0..20 {
                let url = format!("gs://bucket/prefix/c/{i}.jpg");
                writer
                    .record(&url, "c", &PathBuf::from(format!("c/{i}.jpg")))
                    .unwrap();
            }
            writer.finish().unwrap();
            read(dir, TRAIN_DATA_FILE)
        };

        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        assert_eq!(run(&first), run(&second));
    }

    #[test]
    fn test_extreme_fractions() {
        let dir = TempDir::new().unwrap();
        let mut writer = ManifestWriter::create(dir.path(), 1.0, 0).unwrap();
        for i in 0..10 {
            writer
                .record(
                    &format!("gs://b/p/c/{i}.jpg"),
                    "c",
                    &PathBuf::from(format!("c/{i}.jpg")),
                )
                .unwrap();
        }
        let counts = writer.finish().unwrap();
        assert_eq!(counts.train, 10);
        assert_eq!(counts.eval, 0);
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(ManifestWriter::create(dir.path(), 1.2, 0).is_err());
    }

    #[test]
    fn test_class_dictionary_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DICTIONARY_FILE);
        let names = vec![
            "koffer".to_string(),
            "rucksack".to_string(),
            "tasche".to_string(),
        ];

        write_class_dictionary(&path, &names).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "koffer\nrucksack\ntasche\n"
        );
    }

    #[test]
    fn test_field_quoting_matches_minimal_dialect() {
        assert_eq!(csv_field("plain", ','), "plain");
        assert_eq!(csv_field("with,comma", ','), "\"with,comma\"");
        assert_eq!(csv_field("has\"quote", ','), "\"has\"\"quote\"");
        assert_eq!(csv_field("line\nbreak", ','), "\"line\nbreak\"");
        // A comma is plain data when the delimiter is a tab.
        assert_eq!(csv_field("with,comma", '\t'), "with,comma");
        assert_eq!(csv_field("with\ttab", '\t'), "\"with\ttab\"");
    }

    #[test]
    fn test_row_rendering() {
        assert_eq!(csv_row(&["a", "b"], ','), "a,b\r\n");
        assert_eq!(csv_row(&["a", "b"], '\t'), "a\tb\r\n");
    }
}
