//! Byte sources: turn one input into the tape image buffers it contains.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use reqwest::Url;
use tracing::debug;

use crate::io::{HttpRangeReader, LocalFileReader, ReadAt, read_all};
use crate::zip::ZipContainer;

/// Largest source accepted as a single tape image.
pub const MAX_IMAGE_SIZE: u64 = 16 * 1024 * 1024;

/// One tape image buffer, or the reason it could not be read.
#[derive(Debug)]
pub struct LoadedArchive {
    /// Input path or URL, plus the member name for zip containers.
    pub label: String,
    pub bytes: Result<Vec<u8>>,
}

pub fn is_http_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Whether `input` names a zip container. URLs are judged by their path,
/// so query strings and fragments do not hide the extension.
pub fn is_zip(input: &str) -> bool {
    let url = if is_http_url(input) {
        Url::parse(input).ok()
    } else {
        None
    };
    let path = url.as_ref().map_or(input, |u| u.path());
    path.to_ascii_lowercase().ends_with(".zip")
}

/// Open `input` and return every tape image it holds.
///
/// Plain images give one buffer. Zip containers give one buffer per
/// non-directory member, and a broken member does not affect the others.
/// Fails as a whole only when the input itself cannot be opened.
pub async fn load(input: &str) -> Result<Vec<LoadedArchive>> {
    if is_http_url(input) {
        let reader = Arc::new(HttpRangeReader::new(input.to_string()).await?);
        load_from(reader, input).await
    } else {
        let reader = Arc::new(LocalFileReader::new(Path::new(input))?);
        load_from(reader, input).await
    }
}

async fn load_from<R: ReadAt + 'static>(reader: Arc<R>, input: &str) -> Result<Vec<LoadedArchive>> {
    if !is_zip(input) {
        let bytes = read_all(reader.as_ref(), MAX_IMAGE_SIZE).await;
        return Ok(vec![LoadedArchive {
            label: input.to_string(),
            bytes,
        }]);
    }

    let container = ZipContainer::new(reader);
    let entries = container.entries().await?;
    debug!(input, members = entries.len(), "opened zip container");

    let mut archives = Vec::with_capacity(entries.len());
    for entry in entries.iter().filter(|e| !e.is_directory) {
        let bytes = if entry.uncompressed_size > MAX_IMAGE_SIZE {
            Err(anyhow::anyhow!(
                "{} is {} bytes, larger than a tape image can be",
                entry.file_name,
                entry.uncompressed_size
            ))
        } else {
            container.read_entry(entry).await
        };
        archives.push(LoadedArchive {
            label: format!("{}:{}", input, entry.file_name),
            bytes,
        });
    }

    Ok(archives)
}
