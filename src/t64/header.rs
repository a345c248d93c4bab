//! Archive-level header fields.

use tracing::debug;

use super::layout::{self, HEADER_SIZE};
use crate::error::{Result, T64Error};

/// Decoded T64 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeHeader {
    /// Free-text tape description, usually a "C64S tape image file" signature.
    pub description: String,
    pub version: u16,
    /// Directory capacity reserved by the image.
    pub max_entries: u16,
    /// Number of directory records that follow the header.
    pub entry_count: u16,
    pub user_description: String,
}

impl TapeHeader {
    /// Parse the header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(T64Error::TruncatedArchive {
                needed: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let header = Self {
            description: layout::text_at(data, layout::DESCRIPTION, 0),
            version: layout::u16_at(data, layout::VERSION, 0),
            max_entries: layout::u16_at(data, layout::MAX_ENTRIES, 0),
            entry_count: layout::u16_at(data, layout::ENTRY_COUNT, 0),
            user_description: layout::text_at(data, layout::USER_DESCRIPTION, 0),
        };

        debug!(
            description = header.description.trim_end(),
            version = header.version,
            max_entries = header.max_entries,
            entry_count = header.entry_count,
            "parsed T64 header"
        );

        Ok(header)
    }
}
