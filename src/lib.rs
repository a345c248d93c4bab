//! # t64dump
//!
//! List and extract the programs stored in C64 T64 tape images.
//!
//! A T64 image holds a fixed header, a directory of 32-byte records and the
//! raw program bytes. Each program is rebuilt as a loadable file: its
//! two-byte load address followed by the content, whose length is derived
//! from the record's address range.
//!
//! ## Features
//!
//! - Decode the header and directory of T64 images
//! - Read images from local files or HTTP/HTTPS URLs using Range requests
//! - Read every image inside a zip container (STORED or DEFLATE)
//! - Extract all programs or a selection by name, one bad record never
//!   stopping the rest
//!
//! ## Example
//!
//! ```no_run
//! use t64dump::{FsSink, Extractor, Selection, T64Archive, render_listing};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let data = std::fs::read("games.t64")?;
//!     let archive = T64Archive::parse(&data)?;
//!     print!("{}", render_listing(&archive));
//!
//!     let sink = FsSink::new("out");
//!     let report = Extractor::new(&sink).extract(&archive, &Selection::All).await;
//!     println!("{} programs extracted", report.extracted());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod source;
pub mod t64;
pub mod zip;

pub use cli::Cli;
pub use error::{Result, T64Error};
pub use io::{HttpRangeReader, LocalFileReader, ReadAt};
pub use source::LoadedArchive;
pub use t64::{
    DirectoryRecord, ExtractOutcome, ExtractReport, Extractor, FileType, FsSink, ProgramSink,
    Selection, T64Archive, TapeHeader, render_listing,
};
pub use zip::{ZipContainer, ZipEntry};
