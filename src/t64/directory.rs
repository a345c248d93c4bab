//! Directory records and the decoder that walks them.

use std::fmt;

use tracing::{debug, trace};

use super::layout::{self, directory_end, record, record_offset};
use crate::error::{Result, T64Error};

/// Commodore DOS file types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Del,
    Seq,
    Prg,
    Usr,
    Rel,
    Unknown(u8),
}

impl FileType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x80 => FileType::Del,
            0x81 => FileType::Seq,
            0x82 => FileType::Prg,
            0x83 => FileType::Usr,
            0x84 => FileType::Rel,
            _ => FileType::Unknown(value),
        }
    }

    /// Upper-case label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Del => "DEL",
            FileType::Seq => "SEQ",
            FileType::Prg => "PRG",
            FileType::Usr => "USR",
            FileType::Rel => "REL",
            FileType::Unknown(_) => "UNK",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One decoded 32-byte directory slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Position in the directory, starting at 0.
    pub index: usize,
    pub entry_type: u8,
    pub file_type: FileType,
    /// Load address of the program.
    pub start_address: u16,
    /// One past the address of the last loaded byte.
    pub end_address: u16,
    /// Absolute offset of the program bytes in the archive.
    pub content_offset: u32,
    /// Raw 16-character name, padding included.
    pub name: String,
}

impl DirectoryRecord {
    /// Decode record `index` from `data`. The caller guarantees the slot is in bounds.
    fn decode(data: &[u8], index: usize) -> Self {
        let base = record_offset(index);
        trace!(index, base, "decoding directory record");

        Self {
            index,
            entry_type: layout::u8_at(data, record::ENTRY_TYPE, base),
            file_type: FileType::from_u8(layout::u8_at(data, record::FILE_TYPE, base)),
            start_address: layout::u16_at(data, record::START_ADDRESS, base),
            end_address: layout::u16_at(data, record::END_ADDRESS, base),
            content_offset: layout::u32_at(data, record::CONTENT_OFFSET, base),
            name: layout::text_at(data, record::NAME, base),
        }
    }

    /// Name with the padding stripped, original case kept.
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    /// Name used for matching and for output file names.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// `end_address - start_address`, or `None` when the range is reversed.
    pub fn content_length(&self) -> Option<u16> {
        self.end_address.checked_sub(self.start_address)
    }

    /// Output identifier: `name(ssss-eeee).type`.
    pub fn identifier(&self) -> String {
        format!(
            "{}({:04x}-{:04x}).{}",
            self.normalized_name(),
            self.start_address,
            self.end_address,
            self.file_type.label().to_ascii_lowercase()
        )
    }
}

/// Trim and lower-case a program name. Applying it twice changes nothing.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Decode all `entry_count` records that follow the header.
///
/// The whole directory extent is bounds-checked before the first record is
/// read. Records are not filtered on their entry type.
pub fn decode_directory(data: &[u8], entry_count: u16) -> Result<Vec<DirectoryRecord>> {
    let needed = directory_end(entry_count as usize);
    if needed > data.len() {
        return Err(T64Error::TruncatedArchive {
            needed,
            actual: data.len(),
        });
    }

    let records = (0..entry_count as usize)
        .map(|index| {
            let rec = DirectoryRecord::decode(data, index);
            debug!(
                index,
                name = rec.display_name(),
                file_type = %rec.file_type,
                start = rec.start_address,
                end = rec.end_address,
                offset = rec.content_offset,
                "directory record"
            );
            rec
        })
        .collect();

    Ok(records)
}
