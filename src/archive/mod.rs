//! Archive download and payload extraction
//!
//! For every accepted link the archive is downloaded into a staging
//! directory, opened as a zip container, and each payload entry is written
//! flat into the output folder:
//! - directory entries and entries with other extensions are skipped
//! - entry names that could escape the output folder abort the archive
//! - staged archives are removed afterwards when they are not being kept

mod download;
mod extract;
mod layout;

pub use download::download_archive;
pub use extract::{clean_path, extract_payloads, has_extension};
pub use layout::{resolve_output_folder, OutputLayout};

use crate::crawler::Link;
use crate::url::{filename_from_url, resolve_link_url};
use crate::{FetchError, UrlError};
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while fetching or unpacking one archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Download failed: {0}")]
    Download(#[from] FetchError),

    #[error("Invalid archive URL: {0}")]
    Url(#[from] UrlError),

    #[error("No filename in archive URL {url}")]
    MissingFilename { url: String },

    #[error("Failed to open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("Failed to read entry {index} of {}: {source}", .path.display())]
    Entry {
        path: PathBuf,
        index: usize,
        source: zip::result::ZipError,
    },

    #[error("{}: illegal file path", .path.display())]
    IllegalPath { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for the path-traversal rejection
    pub fn is_illegal_path(&self) -> bool {
        matches!(self, Self::IllegalPath { .. })
    }
}

/// What one processed link left on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    /// Where the archive was staged
    pub archive: PathBuf,

    /// Whether the staged archive is still on disk
    pub archive_kept: bool,

    /// Payload files written, in archive order
    pub extracted: Vec<PathBuf>,
}

/// Downloads the archive behind `link` and extracts its payloads
///
/// `page_url` is the page the link was found on and is used to resolve
/// site-relative URLs.
///
/// # Returns
///
/// * `Ok(ProcessReport)` - The archive was unpacked
/// * `Err(ArchiveError)` - The link was abandoned; nothing outside the
///   output folder was written
pub async fn process_link(
    client: &Client,
    link: &Link,
    page_url: &str,
    layout: &OutputLayout,
    payload_extension: &str,
) -> Result<ProcessReport, ArchiveError> {
    let url = resolve_link_url(page_url, &link.url)?;

    let filename = filename_from_url(&link.url);
    if matches!(filename, "" | "." | "..") {
        return Err(ArchiveError::MissingFilename {
            url: link.url.clone(),
        });
    }

    layout.prepare()?;
    let archive = layout.staging_dir.join(filename);

    // A failed download leaves nothing of ours at `archive`
    let bytes = download_archive(client, url.as_str(), &archive).await?;
    tracing::debug!("Saved {} bytes to {}", bytes, archive.display());

    let result = extract_payloads(&archive, &layout.output_folder, payload_extension);

    let archive_kept = if layout.discard_archives {
        discard(&archive);
        false
    } else {
        archive.exists()
    };

    result.map(|extracted| ProcessReport {
        archive,
        archive_kept,
        extracted,
    })
}

/// Removes a staged archive; failures are logged and otherwise ignored
fn discard(archive: &Path) {
    if !archive.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_file(archive) {
        tracing::warn!("Failed to remove {}: {}", archive.display(), e);
    }
}
