//! Object store client and object naming.
//!
//! Uploads go through the storage JSON API with a bearer token read from a
//! credentials file: one media-upload POST per file, followed by a metadata
//! PATCH recording the local origin path. Object names are derived from the
//! source file's basename by hashing, so re-running an upload overwrites the
//! same objects instead of accumulating duplicates. No retries; a failed
//! upload is the caller's to count and skip.

use std::fs;
use std::path::Path;
use std::time::Duration;

use imageset_core::{Error, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Base URL of the storage JSON API.
pub const STORAGE_API: &str = "https://storage.googleapis.com";

/// Request timeout applied to every upload and patch call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer token credentials for the object store.
#[derive(Debug, Clone, Deserialize)]
pub struct GcsCredentials {
    /// Pre-issued OAuth2 bearer token presented on every request
    pub token: String,
}

impl GcsCredentials {
    /// Loads credentials from a JSON file carrying the bearer token.
    ///
    /// A missing or malformed file is a configuration error; the run fails
    /// before any upload starts.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "cannot read credentials file {}: {e}",
                path.display()
            ))
        })?;
        let credentials: GcsCredentials = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!(
                "malformed credentials file {}: {e}",
                path.display()
            ))
        })?;
        if credentials.token.is_empty() {
            return Err(Error::Config(format!(
                "credentials file {} has an empty token",
                path.display()
            )));
        }
        Ok(credentials)
    }
}

/// Blocking client for one bucket of the object store.
#[derive(Debug, Clone)]
pub struct GcsClient {
    client: reqwest::blocking::Client,
    bucket: String,
    token: String,
}

impl GcsClient {
    /// Creates a client for `bucket` with the request timeout configured
    /// at construction.
    pub fn new(bucket: impl Into<String>, credentials: GcsCredentials) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            bucket: bucket.into(),
            token: credentials.token,
        })
    }

    /// Uploads `local_path` as `object_name`, then patches the object's
    /// metadata with `origin = <local path>`.
    pub fn upload(&self, local_path: &Path, object_name: &str) -> Result<()> {
        debug!("Uploading {} as {object_name}", local_path.display());
        let bytes = fs::read(local_path)?;

        let url = format!(
            "{STORAGE_API}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.bucket,
            percent_encode(object_name)
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(bytes)
            .send()
            .map_err(|e| Error::Upload(format!("media upload of {object_name}: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Upload(format!(
                "media upload of {object_name}: HTTP {}",
                response.status()
            )));
        }

        self.patch_origin(object_name, &local_path.display().to_string())
    }

    /// Sets the `origin` metadata entry on an already-uploaded object.
    fn patch_origin(&self, object_name: &str, origin: &str) -> Result<()> {
        let url = format!(
            "{STORAGE_API}/storage/v1/b/{}/o/{}",
            self.bucket,
            percent_encode(object_name)
        );
        let body = serde_json::json!({ "metadata": { "origin": origin } });
        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| Error::Upload(format!("metadata patch of {object_name}: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Upload(format!(
                "metadata patch of {object_name}: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Derives the object name for a local file:
/// `{object_dir}/{class_name}/{sha256 hex of basename}.jpg`.
///
/// The digest covers the basename including its extension, so a source name
/// always maps to the same object while sibling files that differ only in
/// extension stay distinct.
pub fn object_name(object_dir: &str, class_name: &str, file: &Path) -> Result<String> {
    let basename = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidPath(format!("no usable file name in {}", file.display())))?;

    let digest = Sha256::digest(basename.as_bytes());
    let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
    Ok(format!("{object_dir}/{class_name}/{hex}.jpg"))
}

/// Renders the `gs://` URL recorded in the manifests.
pub fn object_url(bucket: &str, object_name: &str) -> String {
    format!("gs://{bucket}/{object_name}")
}

/// Percent-encodes an object name for use inside a request URL.
///
/// Everything outside the unreserved set is encoded, including the `/`
/// separators the JSON API expects as `%2F`.
fn percent_encode(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}
