use std::io::Read;
use std::sync::Arc;

use flate2::Crc;
use flate2::read::DeflateDecoder;
use tracing::debug;

use crate::io::ReadAt;
use anyhow::{Context, Result, bail};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipEntry};

/// Zip container whose members are read fully into memory
pub struct ZipContainer<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipContainer<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all members, directories included
    pub async fn entries(&self) -> Result<Vec<ZipEntry>> {
        self.parser.list_entries().await
    }

    /// Read and decompress one member, verifying its CRC-32.
    pub async fn read_entry(&self, entry: &ZipEntry) -> Result<Vec<u8>> {
        let data_offset = self.parser.data_offset(entry).await?;

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_at(data_offset, &mut raw).await?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let mut out = Vec::with_capacity(entry.uncompressed_size as usize);
                DeflateDecoder::new(raw.as_slice())
                    .read_to_end(&mut out)
                    .with_context(|| format!("Failed to inflate {}", entry.file_name))?;
                out
            }
            CompressionMethod::Unknown(method) => {
                bail!(
                    "Unsupported compression method {} for {} (only STORED and DEFLATE)",
                    method,
                    entry.file_name
                );
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            bail!(
                "Size mismatch for {}: expected {} bytes, got {}",
                entry.file_name,
                entry.uncompressed_size,
                data.len()
            );
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            bail!(
                "CRC mismatch for {}: expected {:08x}, got {:08x}",
                entry.file_name,
                entry.crc32,
                crc.sum()
            );
        }

        debug!(
            name = %entry.file_name,
            method = entry.compression_method.as_u16(),
            bytes = data.len(),
            "read zip entry"
        );
        Ok(data)
    }
}
