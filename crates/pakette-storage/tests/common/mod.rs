//! Shared fixture support: assembles complete synthetic packages in the
//! on-disc layout (chunk payloads, tagged directory, trailing string table).

// Each integration test binary compiles its own copy; not every binary uses
// every helper.
#![allow(dead_code)]

use pakette_formats::hash::hash_name;
use pakette_formats::strings::build_string_table;
use pakette_formats::tags::TAG_FILE;
use pakette_storage::types::PackageRegion;
use std::io::Write;
use tempfile::NamedTempFile;

/// Asset type name stamped on every fixture file.
pub const FIXTURE_TYPE: &str = "rawdata";

/// Opaque creation stamp used by fixtures.
pub const FIXTURE_STAMP: u32 = 0x2002_0408;

pub struct ChunkSpec {
    /// Uncompressed chunk content.
    pub plain: Vec<u8>,
    /// Store the chunk LZSS-compressed instead of verbatim.
    pub compress: bool,
}

pub struct FileSpec {
    pub name: String,
    pub chunks: Vec<ChunkSpec>,
}

impl FileSpec {
    pub fn new(name: &str, chunks: Vec<ChunkSpec>) -> Self {
        Self {
            name: name.to_owned(),
            chunks,
        }
    }

    pub fn plaintext(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.plain);
        }
        out
    }
}

/// Encode `data` as LZSS literal tokens only: one 0xff flag byte per eight
/// literals. Always larger than the input, so the stored size differs from
/// the uncompressed size and the chunk registers as compressed.
pub fn encode_literals(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 8 + 1);
    for block in data.chunks(8) {
        out.push(0xff);
        out.extend_from_slice(block);
    }
    out
}

pub struct BuiltPackage {
    pub bytes: Vec<u8>,
    pub region: PackageRegion,
}

/// Lay out a complete container: payloads first, then the tagged directory,
/// then the string table directly after it.
pub fn build_package(files: &[FileSpec]) -> BuiltPackage {
    let mut payload = Vec::new();
    let mut directory = Vec::new();

    for file in files {
        let total: u32 = file.chunks.iter().map(|c| c.plain.len() as u32).sum();
        let count = file.chunks.len() as u16;
        let mut file_offset = 0u32;

        for (index, chunk) in file.chunks.iter().enumerate() {
            let stored = if chunk.compress {
                encode_literals(&chunk.plain)
            } else {
                chunk.plain.clone()
            };
            let source_offset = payload.len() as u32;
            payload.extend_from_slice(&stored);

            directory.extend(pfil_record(
                &file.name,
                index as u16,
                count,
                file_offset,
                chunk.plain.len() as u32,
                stored.len() as u32,
                source_offset,
                total,
            ));
            file_offset += chunk.plain.len() as u32;
        }
    }

    let mut names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    names.push(FIXTURE_TYPE);

    let directory_offset = payload.len() as u64;
    let directory_size = directory.len() as u32;
    let mut bytes = payload;
    bytes.extend_from_slice(&directory);
    bytes.extend_from_slice(&build_string_table(&names));

    BuiltPackage {
        bytes,
        region: PackageRegion {
            directory_offset,
            directory_size,
            file_count: files.len() as u32,
        },
    }
}

/// Write a built package to disk for path-based consumers.
pub fn write_package(files: &[FileSpec]) -> (NamedTempFile, PackageRegion) {
    let built = build_package(files);
    let mut tmp = NamedTempFile::new().expect("create temp package");
    tmp.write_all(&built.bytes).expect("write temp package");
    tmp.flush().expect("flush temp package");
    (tmp, built.region)
}

#[allow(clippy::too_many_arguments)]
fn pfil_record(
    name: &str,
    chunk_number: u16,
    chunk_count: u16,
    chunk_offset: u32,
    chunk_size: u32,
    data_size: u32,
    data_offset: u32,
    total: u32,
) -> Vec<u8> {
    let name_hash = hash_name(name);
    let type_hash = hash_name(FIXTURE_TYPE);
    let mut b = Vec::with_capacity(100);
    b.extend_from_slice(&TAG_FILE.to_le_bytes());
    b.push(1); // version_major
    b.push(0); // version_minor
    b.extend_from_slice(&0i16.to_le_bytes()); // version_build
    b.extend_from_slice(&FIXTURE_STAMP.to_le_bytes()); // day_created
    b.extend_from_slice(&chunk_number.to_le_bytes());
    b.extend_from_slice(&chunk_count.to_le_bytes());
    // name, source, source-convert, source-compress all point at the name.
    for _ in 0..4 {
        b.extend_from_slice(&name_hash.to_le_bytes());
    }
    b.extend_from_slice(&type_hash.to_le_bytes());
    b.extend_from_slice(&0u32.to_le_bytes()); // pad_bytes
    b.extend_from_slice(&0u32.to_le_bytes()); // flags
    b.extend_from_slice(&0u32.to_le_bytes()); // data_ptr
    b.extend_from_slice(&chunk_size.to_le_bytes());
    b.extend_from_slice(&chunk_offset.to_le_bytes());
    b.extend_from_slice(&data_size.to_le_bytes());
    b.extend_from_slice(&data_offset.to_le_bytes());
    b.extend_from_slice(&total.to_le_bytes());
    b.extend_from_slice(&[0u8; 32]); // trailing sub-header
    b
}
