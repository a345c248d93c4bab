//! Byte layout of a T64 tape image.
//!
//! ```text
//! [0x00] Tape description          (32 bytes, text)
//! [0x20] Version                   (u16 LE)
//! [0x22] Max directory entries     (u16 LE)
//! [0x24] Used directory entries    (u16 LE)
//! [0x26] Reserved                  (2 bytes)
//! [0x28] User description          (24 bytes, text)
//! [0x40] Directory                 (entries × 32 bytes)
//! ```
//!
//! ## Directory record (32 bytes)
//! ```text
//! [0x00] Entry type                (u8)
//! [0x01] File type                 (u8, 0x80..=0x84 = DEL/SEQ/PRG/USR/REL)
//! [0x02] Start address             (u16 LE)
//! [0x04] End address               (u16 LE, one past the last byte)
//! [0x06] Reserved                  (2 bytes)
//! [0x08] Content offset            (u32 LE, absolute)
//! [0x0C] Reserved                  (4 bytes)
//! [0x10] File name                 (16 bytes, space padded)
//! ```

use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};

/// A fixed-position field: offset relative to its structure, and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub len: usize,
}

impl Field {
    const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Absolute byte range of this field for a structure starting at `base`.
    pub const fn at(&self, base: usize) -> Range<usize> {
        base + self.offset..base + self.offset + self.len
    }
}

pub const DESCRIPTION: Field = Field::new(0, 32);
pub const VERSION: Field = Field::new(32, 2);
pub const MAX_ENTRIES: Field = Field::new(34, 2);
pub const ENTRY_COUNT: Field = Field::new(36, 2);
pub const USER_DESCRIPTION: Field = Field::new(40, 24);

/// Size of the archive header, which is also where the directory starts.
pub const HEADER_SIZE: usize = 64;
pub const DIRECTORY_START: usize = HEADER_SIZE;
pub const RECORD_SIZE: usize = 32;

/// Field positions inside one directory record.
pub mod record {
    use super::Field;

    pub const ENTRY_TYPE: Field = Field::new(0, 1);
    pub const FILE_TYPE: Field = Field::new(1, 1);
    pub const START_ADDRESS: Field = Field::new(2, 2);
    pub const END_ADDRESS: Field = Field::new(4, 2);
    pub const CONTENT_OFFSET: Field = Field::new(8, 4);
    pub const NAME: Field = Field::new(16, 16);
}

/// Absolute offset of directory record `index`.
pub const fn record_offset(index: usize) -> usize {
    DIRECTORY_START + index * RECORD_SIZE
}

/// Bytes needed to hold the header plus `entries` directory records.
pub const fn directory_end(entries: usize) -> usize {
    record_offset(entries)
}

// The readers below index directly; callers check bounds once up front.

pub(crate) fn u8_at(data: &[u8], field: Field, base: usize) -> u8 {
    data[base + field.offset]
}

pub(crate) fn u16_at(data: &[u8], field: Field, base: usize) -> u16 {
    LittleEndian::read_u16(&data[field.at(base)])
}

pub(crate) fn u32_at(data: &[u8], field: Field, base: usize) -> u32 {
    LittleEndian::read_u32(&data[field.at(base)])
}

pub(crate) fn text_at(data: &[u8], field: Field, base: usize) -> String {
    decode_text(&data[field.at(base)])
}

/// Decode fixed-width tape text, one character per byte.
///
/// Never fails: NUL and shifted space (0xA0) pad like a space, and anything
/// outside printable ASCII becomes `?`.
pub fn decode_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x00 | 0xA0 => ' ',
            0x20..=0x7E => b as char,
            _ => '?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_offsets_are_contiguous() {
        assert_eq!(record_offset(0), 64);
        assert_eq!(record_offset(1), 96);
        assert_eq!(record_offset(3), 160);
        assert_eq!(directory_end(2), 128);
    }

    #[test]
    fn field_ranges() {
        assert_eq!(ENTRY_COUNT.at(0), 36..38);
        assert_eq!(record::NAME.at(record_offset(1)), 112..128);
        assert_eq!(record::CONTENT_OFFSET.at(64), 72..76);
    }

    #[test]
    fn multi_byte_fields_are_little_endian() {
        let data = [0x01, 0x08, 0x60, 0x00, 0x00, 0x00];
        assert_eq!(u16_at(&data, Field::new(0, 2), 0), 0x0801);
        assert_eq!(u32_at(&data, Field::new(2, 4), 0), 0x60);
    }

    #[test]
    fn text_decoding_is_total() {
        assert_eq!(decode_text(b"HELLO\x00\xa0"), "HELLO  ");
        assert_eq!(decode_text(&[0x41, 0x93, 0xff, 0x42]), "A??B");
    }
}
