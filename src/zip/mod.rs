//! ZIP containers wrapping tape images.
//!
//! Tape images are commonly distributed zipped, sometimes several per
//! container. Each member is read fully into memory and handed on as an
//! independent archive buffer.
//!
//! - [`structures`]: EOCD record, entry metadata, signatures
//! - [`parser`]: Central Directory and Local File Header parsing
//! - [`container`]: member decompression and CRC verification
//!
//! ## Supported Features
//!
//! - STORED and DEFLATE members
//! - Archive comments
//!
//! ## Limitations
//!
//! - No ZIP64, encryption or multi-disk support

mod container;
mod parser;
mod structures;

pub use container::ZipContainer;
pub use parser::ZipParser;
pub use structures::*;
