//! `package.toc` parsing
//!
//! The installation's `DATA` space carries a table of contents naming every
//! package and the byte range of its chunk directory. Rows are fixed-size:
//! a NUL-padded name, the name's hash, then the directory offset, directory
//! size, and file count.

use crate::error::{Error, Result};
use crate::types::PackageRegion;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;
use tracing::debug;

/// On-disk size of one toc row.
pub const TOC_ENTRY_SIZE: usize = 0x50;

/// Bytes reserved for the package name in each row.
pub const TOC_NAME_LEN: usize = 0x40;

/// One row of `package.toc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Package file name, e.g. `config.pak`.
    pub name: String,
    /// Hash of `name` as the build pipeline recorded it.
    pub name_hash: u32,
    /// Where this package's chunk directory lives inside its container.
    pub region: PackageRegion,
}

/// Parse every toc row from `stream`. The table must be a whole number of
/// rows; trailing bytes mean a damaged file.
pub fn parse<R: Read>(stream: &mut R) -> Result<Vec<TocEntry>> {
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw)?;
    if raw.len() % TOC_ENTRY_SIZE != 0 {
        return Err(Error::InvalidToc(format!(
            "{} bytes is not a whole number of {TOC_ENTRY_SIZE}-byte rows",
            raw.len()
        )));
    }

    let mut entries = Vec::with_capacity(raw.len() / TOC_ENTRY_SIZE);
    for row in raw.chunks_exact(TOC_ENTRY_SIZE) {
        let name_bytes = &row[..TOC_NAME_LEN];
        let name_len = name_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(TOC_NAME_LEN);
        if name_len == 0 {
            return Err(Error::InvalidToc("row with an empty package name".into()));
        }
        let name = String::from_utf8_lossy(&name_bytes[..name_len]).into_owned();

        let mut rest = &row[TOC_NAME_LEN..];
        let name_hash = rest.read_u32::<LittleEndian>()?;
        let directory_offset = u64::from(rest.read_u32::<LittleEndian>()?);
        let directory_size = rest.read_u32::<LittleEndian>()?;
        let file_count = rest.read_u32::<LittleEndian>()?;

        entries.push(TocEntry {
            name,
            name_hash,
            region: PackageRegion {
                directory_offset,
                directory_size,
                file_count,
            },
        });
    }

    debug!("package.toc: {} packages", entries.len());
    Ok(entries)
}

/// Serialize rows in the on-disc layout. Test fixtures only.
pub fn build(entries: &[TocEntry]) -> Vec<u8> {
    let mut out = Vec::with_capacity(entries.len() * TOC_ENTRY_SIZE);
    for entry in entries {
        let mut name = [0u8; TOC_NAME_LEN];
        name[..entry.name.len()].copy_from_slice(entry.name.as_bytes());
        out.extend_from_slice(&name);
        out.extend_from_slice(&entry.name_hash.to_le_bytes());
        out.extend_from_slice(&(entry.region.directory_offset as u32).to_le_bytes());
        out.extend_from_slice(&entry.region.directory_size.to_le_bytes());
        out.extend_from_slice(&entry.region.file_count.to_le_bytes());
    }
    out
}
