//! Trailing string table
//!
//! The chunk directory is followed in the container by the literal names its
//! records refer to by hash: a `u32` entry count, then that many
//! length-prefixed strings. The table is only needed while the directory is
//! being processed; resolved names are copied into the file records.

use crate::error::{Error, Result};
use crate::hash::hash_name;
use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::HashMap;
use std::io::Read;
use tracing::trace;

/// Longest plausible name entry. Anything bigger is a corrupt table, not a
/// path.
const MAX_NAME_LEN: u32 = 4096;

/// Hash-keyed lookup over the container's literal names.
#[derive(Debug, Default)]
pub struct StringTable {
    entries: HashMap<u32, String>,
}

impl StringTable {
    /// Parse the table from the bytes immediately following the directory.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        let count = r.read_u32::<LittleEndian>()?;
        // Capacity is a hint only; a damaged count must not drive the
        // allocation, the per-entry reads will fail soon enough.
        let mut entries = HashMap::with_capacity(count.min(4096) as usize);

        for _ in 0..count {
            let len = r.read_u32::<LittleEndian>()?;
            if len > MAX_NAME_LEN {
                return Err(Error::OversizedName(len));
            }
            let mut buf = vec![0u8; len as usize];
            r.read_exact(&mut buf)?;
            let name = String::from_utf8_lossy(&buf).into_owned();
            entries.insert(hash_name(&name), name);
        }

        trace!("string table: {count} entries");
        Ok(Self { entries })
    }

    /// Look up the literal name for a hashed reference.
    pub fn resolve(&self, hash: u32) -> Option<&str> {
        self.entries.get(&hash).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialize names in the on-disc layout. Test fixtures only.
pub fn build_string_table(names: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(names.len() as u32).to_le_bytes());
    for name in names {
        out.extend_from_slice(&(name.len() as u32).to_le_bytes());
        out.extend_from_slice(name.as_bytes());
    }
    out
}
