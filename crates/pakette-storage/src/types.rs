//! Common types shared across the package filesystem

use std::fmt;

/// Byte range of one package's chunk directory within its container,
/// as supplied by `package.toc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageRegion {
    /// Where the tagged directory records start.
    pub directory_offset: u64,
    /// Size of the directory region in bytes. The string table follows
    /// immediately after this region in the stream.
    pub directory_size: u32,
    /// Number of files the toc claims the package holds. Informational;
    /// the directory itself is authoritative.
    pub file_count: u32,
}

/// One contiguous stored run of a logical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDescriptor {
    /// Position of this chunk in the file's chunk list.
    pub index: u16,
    /// Byte offset of this chunk's first uncompressed byte within the file.
    pub file_offset: u32,
    /// Offset of the stored bytes within the container.
    pub source_offset: u32,
    /// Stored size in the container.
    pub source_size: u32,
    /// Size after decompression.
    pub uncompressed_size: u32,
    /// Derived: stored size differs from uncompressed size.
    pub compressed: bool,
}

/// One logical file: resolved names, sizes, and the ordered chunk list.
///
/// Built once while the directory is parsed and never mutated; open readers
/// share it by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Logical path, as stored (case-sensitive).
    pub name: String,
    /// Build-pipeline provenance names.
    pub source_name: String,
    pub source_convert_name: String,
    pub source_compress_name: String,
    /// Asset type name.
    pub type_name: String,
    /// Total uncompressed size.
    pub total_size: u32,
    /// Creation stamp; encoding undocumented, kept opaque.
    pub date_stamp: u32,
    /// Chunks ordered by index, partitioning `[0, total_size)`.
    pub chunks: Vec<ChunkDescriptor>,
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bytes, {} chunks)",
            self.name,
            self.total_size,
            self.chunks.len()
        )
    }
}

/// One `PGRP` record with its name resolved. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub entry_count: u32,
    pub flags_mask: u32,
}
