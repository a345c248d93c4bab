//! Human-readable directory listing.

use std::fmt::Write;

use super::T64Archive;

/// Render the header and one row per directory record.
///
/// Only decoded fields are shown; contents are never resolved, so records
/// with a broken address range still list with their raw addresses.
pub fn render_listing(archive: &T64Archive<'_>) -> String {
    let header = &archive.header;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Tape description:\n{}", header.description.trim_end());
    let _ = writeln!(out, "\nUser description:\n{}", header.user_description.trim_end());
    let _ = writeln!(
        out,
        "\nVersion: ${:04x}  Capacity: {} entries",
        header.version, header.max_entries
    );
    let _ = writeln!(out, "Number of directory entries: {}", header.entry_count);

    if archive.records.is_empty() {
        return out;
    }

    let _ = writeln!(
        out,
        "\n{:<16}  {:<9}  {:<10}  {}",
        "Filename", "File Type", "Start Addr", "End Addr"
    );
    let _ = writeln!(out, "{}", "-".repeat(51));

    for rec in &archive.records {
        let _ = writeln!(
            out,
            "{:<16}  {:<9}  ${:04x}       ${:04x}",
            rec.display_name(),
            rec.file_type.label(),
            rec.start_address,
            rec.end_address
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(entries: &[(u8, u16, u16, &str)]) -> Vec<u8> {
        let mut data = vec![0u8; 64];
        data[..20].copy_from_slice(b"C64S tape image file");
        data[36..38].copy_from_slice(&(entries.len() as u16).to_le_bytes());
        data[40..46].copy_from_slice(b"DEMOS!");
        for &(ty, start, end, name) in entries {
            let mut r = [0x20u8; 32];
            r[..16].fill(0);
            r[0] = 1;
            r[1] = ty;
            r[2..4].copy_from_slice(&start.to_le_bytes());
            r[4..6].copy_from_slice(&end.to_le_bytes());
            r[16..16 + name.len()].copy_from_slice(name.as_bytes());
            data.extend_from_slice(&r);
        }
        data
    }

    #[test]
    fn lists_header_and_rows() {
        let data = image(&[(0x82, 0x0801, 0x0810, "HELLO"), (0x81, 0x1000, 0x1200, "NOTES")]);
        let archive = T64Archive::parse(&data).unwrap();
        let text = render_listing(&archive);

        assert!(text.contains("Tape description:\nC64S tape image file\n"));
        assert!(text.contains("User description:\nDEMOS!\n"));
        assert!(text.contains("Number of directory entries: 2"));
        assert!(text.contains("HELLO             PRG        $0801       $0810"));
        assert!(text.contains("NOTES             SEQ        $1000       $1200"));
    }

    #[test]
    fn unknown_type_and_reversed_range_still_list() {
        let data = image(&[(0x00, 0x2000, 0x1000, "WEIRD")]);
        let archive = T64Archive::parse(&data).unwrap();
        assert!(archive.resolve(&archive.records[0]).is_err());

        let text = render_listing(&archive);
        assert!(text.contains("WEIRD             UNK        $2000       $1000"));
    }

    #[test]
    fn empty_directory_has_no_table() {
        let data = image(&[]);
        let archive = T64Archive::parse(&data).unwrap();
        let text = render_listing(&archive);
        assert!(text.contains("Number of directory entries: 0"));
        assert!(!text.contains("Filename"));
    }
}
