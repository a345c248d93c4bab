mod http;
mod local;

pub use http::HttpRangeReader;
pub use local::LocalFileReader;

use anyhow::{Result, bail};
use async_trait::async_trait;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Fill `buf` with the bytes starting at `offset`
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Read a whole source into memory, refusing anything above `limit` bytes.
pub async fn read_all<R: ReadAt + ?Sized>(reader: &R, limit: u64) -> Result<Vec<u8>> {
    let size = reader.size();
    if size > limit {
        bail!(
            "Source is {} bytes, larger than the {} byte limit",
            size,
            limit
        );
    }

    let mut buf = vec![0u8; size as usize];
    let read = reader.read_at(0, &mut buf).await?;
    buf.truncate(read);
    Ok(buf)
}
