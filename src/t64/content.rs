//! Resolve a directory record to its program bytes.

use std::ops::Range;

use tracing::trace;

use super::directory::DirectoryRecord;
use crate::error::{Result, T64Error};

/// Program bytes of one record, borrowed from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent<'a> {
    pub load_address: u16,
    /// Absolute range of the content inside the archive.
    pub range: Range<usize>,
    pub bytes: &'a [u8],
}

impl ResolvedContent<'_> {
    /// Loadable program file: load address (LE) followed by the content.
    pub fn payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(2 + self.bytes.len());
        payload.extend_from_slice(&self.load_address.to_le_bytes());
        payload.extend_from_slice(self.bytes);
        payload
    }
}

/// Locate the content of `record` in `data`.
///
/// The length comes from the address range, not from anything stored in
/// the archive, so a reversed range or a span past the end of the buffer
/// makes the record invalid.
pub fn resolve<'a>(data: &'a [u8], record: &DirectoryRecord) -> Result<ResolvedContent<'a>> {
    let length = record.content_length().ok_or_else(|| T64Error::InvalidRecord {
        index: record.index,
        reason: format!(
            "end address ${:04x} is below start address ${:04x}",
            record.end_address, record.start_address
        ),
    })?;

    let start = record.content_offset as usize;
    let end = start
        .checked_add(length as usize)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| T64Error::InvalidRecord {
            index: record.index,
            reason: format!(
                "content at {start}+{length} runs past the archive end ({} bytes)",
                data.len()
            ),
        })?;

    trace!(index = record.index, start, end, "resolved content");

    Ok(ResolvedContent {
        load_address: record.start_address,
        range: start..end,
        bytes: &data[start..end],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t64::FileType;

    fn record(start: u16, end: u16, offset: u32) -> DirectoryRecord {
        DirectoryRecord {
            index: 3,
            entry_type: 1,
            file_type: FileType::Prg,
            start_address: start,
            end_address: end,
            content_offset: offset,
            name: format!("{:<16}", "TEST"),
        }
    }

    fn buffer(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn slices_by_address_delta() {
        let data = buffer(200);
        let content = resolve(&data, &record(0x0801, 0x0810, 96)).unwrap();
        assert_eq!(content.range, 96..111);
        assert_eq!(content.bytes, &data[96..111]);
        assert_eq!(content.range.len(), (0x0810 - 0x0801) as usize);
    }

    #[test]
    fn payload_starts_with_load_address() {
        let data = buffer(200);
        let payload = resolve(&data, &record(0xc000, 0xc004, 100)).unwrap().payload();
        assert_eq!(payload, vec![0x00, 0xc0, 100, 101, 102, 103]);
        assert_eq!(u16::from_le_bytes([payload[0], payload[1]]), 0xc000);
    }

    #[test]
    fn content_may_end_exactly_at_buffer_end() {
        let data = buffer(111);
        assert!(resolve(&data, &record(0x0801, 0x0810, 96)).is_ok());
    }

    #[test]
    fn empty_range_gives_address_only_payload() {
        let data = buffer(64);
        let content = resolve(&data, &record(0x1000, 0x1000, 64)).unwrap();
        assert!(content.bytes.is_empty());
        assert_eq!(content.payload(), vec![0x00, 0x10]);
    }

    #[test]
    fn reversed_range_is_invalid() {
        let err = resolve(&buffer(200), &record(0x0810, 0x0801, 96)).unwrap_err();
        assert!(matches!(err, T64Error::InvalidRecord { index: 3, .. }));
    }

    #[test]
    fn span_past_end_is_invalid() {
        let err = resolve(&buffer(110), &record(0x0801, 0x0810, 96)).unwrap_err();
        assert!(matches!(err, T64Error::InvalidRecord { index: 3, .. }));

        let err = resolve(&buffer(110), &record(0x0801, 0x0810, u32::MAX)).unwrap_err();
        assert!(matches!(err, T64Error::InvalidRecord { .. }));
    }
}
