//! T64 tape image decoding.
//!
//! A T64 image is a 64-byte header, a directory of fixed 32-byte records and
//! the raw program bytes. See [`layout`] for the exact field positions.
//!
//! - [`header`]: archive-level fields
//! - [`directory`]: directory records and file types
//! - [`content`]: program bytes and loadable payloads for one record
//! - [`listing`]: text rendering of an archive's directory
//! - [`extract`]: batch extraction into a [`ProgramSink`]

pub mod content;
pub mod directory;
pub mod extract;
pub mod header;
pub mod layout;
pub mod listing;

pub use content::{ResolvedContent, resolve};
pub use directory::{DirectoryRecord, FileType, decode_directory, normalize_name};
pub use extract::{ExtractOutcome, ExtractReport, Extractor, FsSink, ProgramSink, Selection};
pub use header::TapeHeader;
pub use listing::render_listing;

use crate::error::Result;

/// A decoded tape image borrowing its bytes.
#[derive(Debug, Clone)]
pub struct T64Archive<'a> {
    data: &'a [u8],
    pub header: TapeHeader,
    pub records: Vec<DirectoryRecord>,
}

impl<'a> T64Archive<'a> {
    /// Parse the header and the whole directory.
    ///
    /// Fails with `TruncatedArchive` if either does not fit in `data`.
    /// Program contents are not checked here; see [`T64Archive::resolve`].
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = TapeHeader::parse(data)?;
        let records = decode_directory(data, header.entry_count)?;
        Ok(Self {
            data,
            header,
            records,
        })
    }

    /// Content of one record of this archive.
    pub fn resolve(&self, record: &DirectoryRecord) -> Result<ResolvedContent<'a>> {
        resolve(self.data, record)
    }
}
