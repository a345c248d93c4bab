//! Builders for tape images and zip containers shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::Crc;
use flate2::write::DeflateEncoder;

pub struct Program {
    pub file_type: u8,
    pub start: u16,
    pub end: u16,
    pub name: &'static str,
}

/// Build a T64 image with the programs stored back to back after the directory.
pub fn build_t64(programs: &[Program]) -> Vec<u8> {
    let mut data = vec![0u8; 64];
    data[..32].copy_from_slice(format!("{:<32}", "C64S tape image file").as_bytes());
    data[32..34].copy_from_slice(&0x0100u16.to_le_bytes());
    data[34..36].copy_from_slice(&(programs.len() as u16).to_le_bytes());
    data[36..38].copy_from_slice(&(programs.len() as u16).to_le_bytes());
    data[40..64].copy_from_slice(format!("{:<24}", "TEST TAPE").as_bytes());

    let mut offset = 64 + programs.len() * 32;
    let mut contents = Vec::new();
    for p in programs {
        let mut record = [0u8; 32];
        record[0] = 1;
        record[1] = p.file_type;
        record[2..4].copy_from_slice(&p.start.to_le_bytes());
        record[4..6].copy_from_slice(&p.end.to_le_bytes());
        record[8..12].copy_from_slice(&(offset as u32).to_le_bytes());
        record[16..32].copy_from_slice(format!("{:<16}", p.name).as_bytes());
        data.extend_from_slice(&record);

        let len = p.end.saturating_sub(p.start) as usize;
        contents.extend((0..len).map(|i| (i as u8) ^ 0x5a));
        offset += len;
    }
    data.extend(contents);
    data
}

pub struct Member {
    pub name: &'static str,
    pub data: Vec<u8>,
    pub deflate: bool,
}

/// Build a minimal zip container with an archive comment.
/// CRCs are computed unless `bad_crc` names a member.
pub fn build_zip(members: &[Member], bad_crc: Option<&str>, comment: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for m in members {
        let mut crc = Crc::new();
        crc.update(&m.data);
        let crc = if bad_crc == Some(m.name) {
            crc.sum() ^ 1
        } else {
            crc.sum()
        };

        let (method, stored) = if m.deflate {
            let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
            enc.write_all(&m.data).unwrap();
            (8u16, enc.finish().unwrap())
        } else {
            (0u16, m.data.clone())
        };

        let lfh_offset = out.len() as u32;
        out.extend_from_slice(b"PK\x03\x04");
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&method.to_le_bytes());
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&(stored.len() as u32).to_le_bytes());
        out.extend_from_slice(&(m.data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(m.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(m.name.as_bytes());
        out.extend_from_slice(&stored);

        central.extend_from_slice(b"PK\x01\x02");
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&method.to_le_bytes());
        central.extend_from_slice(&[0, 0, 0, 0]);
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(&(stored.len() as u32).to_le_bytes());
        central.extend_from_slice(&(m.data.len() as u32).to_le_bytes());
        central.extend_from_slice(&(m.name.len() as u16).to_le_bytes());
        central.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        central.extend_from_slice(&lfh_offset.to_le_bytes());
        central.extend_from_slice(m.name.as_bytes());
    }

    let cd_offset = out.len() as u32;
    out.extend_from_slice(&central);
    out.extend_from_slice(b"PK\x05\x06");
    out.extend_from_slice(&[0, 0, 0, 0]);
    out.extend_from_slice(&(members.len() as u16).to_le_bytes());
    out.extend_from_slice(&(members.len() as u16).to_le_bytes());
    out.extend_from_slice(&(central.len() as u32).to_le_bytes());
    out.extend_from_slice(&cd_offset.to_le_bytes());
    out.extend_from_slice(&(comment.len() as u16).to_le_bytes());
    out.extend_from_slice(comment);
    out
}

pub fn write(dir: &Path, name: &str, data: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path.to_string_lossy().into_owned()
}

/// A program whose end address lies below its start address.
pub fn reversed(name: &'static str) -> Program {
    Program {
        file_type: 0x82,
        start: 0x0900,
        end: 0x0810,
        name,
    }
}
