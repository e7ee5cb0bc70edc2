//! Deterministic ZIP container for OOXML packages.
//!
//! Entries are DEFLATE-compressed, stored in insertion order and stamped
//! with the DOS epoch, so the same parts always yield the same bytes.

use crate::error::{Error, Result};
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::{Compression, Crc};
use std::io::{Read, Write};

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;
const LOCAL_HEADER_LEN: usize = 30;

const VERSION: u16 = 20;
const FLAG_UTF8: u16 = 0x0800;
const METHOD_STORED: u16 = 0;
const METHOD_DEFLATE: u16 = 8;
const DOS_TIME: u16 = 0;
// 1980-01-01
const DOS_DATE: u16 = (1 << 5) | 1;

/// Magic bytes at the start of every ZIP archive.
pub const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug)]
struct CentralEntry {
    name: String,
    crc: u32,
    compressed_size: u32,
    size: u32,
    offset: u32,
}

/// Writes a ZIP archive entry by entry.
#[derive(Debug, Default)]
pub struct PackageWriter {
    buffer: Vec<u8>,
    entries: Vec<CentralEntry>,
}

impl PackageWriter {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part. Names must be unique.
    pub fn add(&mut self, name: &str, data: &[u8]) -> Result<()> {
        if self.entries.iter().any(|e| e.name == name) {
            return Err(Error::Package(format!("duplicate part name: {}", name)));
        }

        let mut crc = Crc::new();
        crc.update(data);

        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        let compressed = encoder.finish()?;

        let entry = CentralEntry {
            name: name.to_string(),
            crc: crc.sum(),
            compressed_size: to_u32(compressed.len(), name)?,
            size: to_u32(data.len(), name)?,
            offset: to_u32(self.buffer.len(), name)?,
        };

        let buf = &mut self.buffer;
        put_u32(buf, LOCAL_HEADER_SIG);
        put_u16(buf, VERSION);
        put_u16(buf, FLAG_UTF8);
        put_u16(buf, METHOD_DEFLATE);
        put_u16(buf, DOS_TIME);
        put_u16(buf, DOS_DATE);
        put_u32(buf, entry.crc);
        put_u32(buf, entry.compressed_size);
        put_u32(buf, entry.size);
        put_u16(buf, name_len(name)?);
        put_u16(buf, 0);
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(&compressed);

        self.entries.push(entry);
        Ok(())
    }

    /// Write the central directory and return the archive bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let directory_offset = to_u32(self.buffer.len(), "central directory")?;
        let entry_count = u16::try_from(self.entries.len())
            .map_err(|_| Error::Package("too many parts".to_string()))?;

        for entry in &self.entries {
            let buf = &mut self.buffer;
            put_u32(buf, CENTRAL_HEADER_SIG);
            put_u16(buf, VERSION);
            put_u16(buf, VERSION);
            put_u16(buf, FLAG_UTF8);
            put_u16(buf, METHOD_DEFLATE);
            put_u16(buf, DOS_TIME);
            put_u16(buf, DOS_DATE);
            put_u32(buf, entry.crc);
            put_u32(buf, entry.compressed_size);
            put_u32(buf, entry.size);
            put_u16(buf, name_len(&entry.name)?);
            put_u16(buf, 0); // extra
            put_u16(buf, 0); // comment
            put_u16(buf, 0); // disk
            put_u16(buf, 0); // internal attributes
            put_u32(buf, 0); // external attributes
            put_u32(buf, entry.offset);
            buf.extend_from_slice(entry.name.as_bytes());
        }

        let directory_size = to_u32(self.buffer.len(), "central directory")? - directory_offset;
        let buf = &mut self.buffer;
        put_u32(buf, END_OF_CENTRAL_DIR_SIG);
        put_u16(buf, 0);
        put_u16(buf, 0);
        put_u16(buf, entry_count);
        put_u16(buf, entry_count);
        put_u32(buf, directory_size);
        put_u32(buf, directory_offset);
        put_u16(buf, 0);

        log::debug!(
            "Packaged {} parts into {} bytes",
            self.entries.len(),
            self.buffer.len()
        );
        Ok(self.buffer)
    }
}

/// A part located by walking local file headers.
#[derive(Debug, Clone, Copy)]
struct LocalEntry<'a> {
    name: &'a str,
    method: u16,
    data: &'a [u8],
}

fn local_entries(bytes: &[u8]) -> Result<Vec<LocalEntry<'_>>> {
    let mut entries = Vec::new();
    let mut offset = 0;

    while bytes.len() >= offset + LOCAL_HEADER_LEN && read_u32(bytes, offset) == LOCAL_HEADER_SIG {
        let method = read_u16(bytes, offset + 8);
        let compressed_size = read_u32(bytes, offset + 18) as usize;
        let name_len = read_u16(bytes, offset + 26) as usize;
        let extra_len = read_u16(bytes, offset + 28) as usize;

        let name_start = offset + LOCAL_HEADER_LEN;
        let data_start = name_start + name_len + extra_len;
        let data_end = data_start + compressed_size;
        if data_end > bytes.len() {
            return Err(Error::Package("truncated part data".to_string()));
        }

        let name = std::str::from_utf8(&bytes[name_start..name_start + name_len])
            .map_err(|_| Error::Package("part name is not UTF-8".to_string()))?;
        entries.push(LocalEntry {
            name,
            method,
            data: &bytes[data_start..data_end],
        });
        offset = data_end;
    }

    if entries.is_empty() {
        return Err(Error::Package("no parts found".to_string()));
    }
    Ok(entries)
}

/// Names of the parts in a package, in archive order.
pub fn entry_names(bytes: &[u8]) -> Result<Vec<String>> {
    Ok(local_entries(bytes)?
        .into_iter()
        .map(|entry| entry.name.to_string())
        .collect())
}

/// Read and decompress one part, `None` when it is absent.
pub fn read_entry(bytes: &[u8], name: &str) -> Result<Option<Vec<u8>>> {
    let Some(entry) = local_entries(bytes)?.into_iter().find(|e| e.name == name) else {
        return Ok(None);
    };

    match entry.method {
        METHOD_STORED => Ok(Some(entry.data.to_vec())),
        METHOD_DEFLATE => {
            let mut data = Vec::new();
            DeflateDecoder::new(entry.data).read_to_end(&mut data)?;
            Ok(Some(data))
        }
        other => Err(Error::Package(format!(
            "unsupported compression method {} for {}",
            other, name
        ))),
    }
}

fn to_u32(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Package(format!("{} exceeds 4 GiB", what)))
}

fn name_len(name: &str) -> Result<u16> {
    u16::try_from(name.len()).map_err(|_| Error::Package(format!("part name too long: {}", name)))
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
