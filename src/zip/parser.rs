//! Low-level ZIP container parser.
//!
//! Reads the End of Central Directory first, then the Central Directory,
//! so listing a container only touches its tail. That keeps remote
//! containers cheap: two range requests before any entry is fetched.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::io::ReadAt;
use anyhow::{Result, bail};
use tracing::debug;

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
const MAX_COMMENT_SIZE: u64 = 65535;

/// Parser for the directory structures of a zip container.
pub struct ZipParser<R: ReadAt> {
    reader: Arc<R>,
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Locate the End of Central Directory record.
    ///
    /// Tries the comment-less position first, then scans backwards through
    /// the largest possible comment.
    pub async fn find_eocd(&self) -> Result<EndOfCentralDirectory> {
        let eocd_size = EndOfCentralDirectory::SIZE as u64;
        if self.size < eocd_size {
            bail!("Not a valid ZIP file");
        }

        let mut tail = vec![0u8; EndOfCentralDirectory::SIZE];
        self.reader.read_at(self.size - eocd_size, &mut tail).await?;
        if let Ok(eocd) = EndOfCentralDirectory::from_bytes(&tail)
            && eocd.comment_len == 0
        {
            return Ok(eocd);
        }

        let search_size = (MAX_COMMENT_SIZE + eocd_size).min(self.size);
        let search_start = self.size - search_size;
        let mut buf = vec![0u8; search_size as usize];
        self.reader.read_at(search_start, &mut buf).await?;

        for i in (0..=buf.len() - EndOfCentralDirectory::SIZE).rev() {
            let Ok(eocd) = EndOfCentralDirectory::from_bytes(&buf[i..]) else {
                continue;
            };
            // Only accept a candidate whose comment reaches exactly to the end
            if eocd.comment_len as usize == buf.len() - i - EndOfCentralDirectory::SIZE {
                return Ok(eocd);
            }
        }

        bail!("Not a valid ZIP file")
    }

    /// Read every Central Directory entry.
    pub async fn list_entries(&self) -> Result<Vec<ZipEntry>> {
        let eocd = self.find_eocd().await?;
        if eocd.is_zip64() {
            bail!("ZIP64 containers are not supported");
        }

        let mut cd_data = vec![0u8; eocd.cd_size as usize];
        self.reader
            .read_at(eocd.cd_offset as u64, &mut cd_data)
            .await?;

        let mut cursor = Cursor::new(cd_data.as_slice());
        let entries = (0..eocd.total_entries)
            .map(|_| Self::parse_cdfh(&mut cursor))
            .collect::<Result<Vec<_>>>()?;

        debug!(entries = entries.len(), "read zip central directory");
        Ok(entries)
    }

    fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> Result<ZipEntry> {
        let mut sig = [0u8; 4];
        cursor.read_exact(&mut sig)?;
        if sig != CDFH_SIGNATURE {
            bail!("Invalid Central Directory File Header");
        }

        // version made by, version needed, flags
        cursor.set_position(cursor.position() + 6);
        let compression_method = cursor.read_u16::<LittleEndian>()?;
        // modification time and date
        cursor.set_position(cursor.position() + 4);
        let crc32 = cursor.read_u32::<LittleEndian>()?;
        let compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
        let uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
        let file_name_length = cursor.read_u16::<LittleEndian>()?;
        let extra_field_length = cursor.read_u16::<LittleEndian>()?;
        let file_comment_length = cursor.read_u16::<LittleEndian>()?;
        // disk number, internal and external attributes
        cursor.set_position(cursor.position() + 8);
        let lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

        let mut file_name_bytes = vec![0u8; file_name_length as usize];
        cursor.read_exact(&mut file_name_bytes)?;
        let file_name = String::from_utf8_lossy(&file_name_bytes).to_string();
        let is_directory = file_name.ends_with('/');

        cursor.set_position(
            cursor.position() + extra_field_length as u64 + file_comment_length as u64,
        );

        Ok(ZipEntry {
            file_name,
            compression_method: CompressionMethod::from_u16(compression_method),
            compressed_size,
            uncompressed_size,
            crc32,
            lfh_offset,
            is_directory,
        })
    }

    /// Offset of an entry's data, just past its Local File Header.
    ///
    /// The local name and extra field may differ in length from the
    /// central copies, so the header has to be read.
    pub async fn data_offset(&self, entry: &ZipEntry) -> Result<u64> {
        let mut lfh = vec![0u8; LFH_SIZE];
        self.reader.read_at(entry.lfh_offset, &mut lfh).await?;

        if &lfh[0..4] != LFH_SIGNATURE {
            bail!("Invalid Local File Header for {}", entry.file_name);
        }

        let mut cursor = Cursor::new(&lfh[26..]);
        let file_name_length = cursor.read_u16::<LittleEndian>()? as u64;
        let extra_field_length = cursor.read_u16::<LittleEndian>()? as u64;

        Ok(entry.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }

    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }
}
