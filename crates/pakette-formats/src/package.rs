//! Package directory record layouts
//!
//! The chunk directory is a flat run of tagged records. `PGRP` opens a group
//! of entries; `PFIL` describes one chunk of one logical file, with chunk 0
//! additionally carrying the file-level fields. All fields are little-endian
//! and every name is a 32-bit hash into the trailing string table.
//!
//! Records are decoded field by field from the reader; nothing is
//! reinterpreted in place.

use crate::error::Result;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Largest uncompressed chunk the format produces. Reader buffers are sized
/// to this; a chunk reporting more is a malformed container.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024;

/// On-disk size of a `PGRP` record, including the tag.
pub const GROUP_RECORD_SIZE: usize = 16;

/// On-disk size of a `PFIL` record, including the tag.
pub const FILE_RECORD_SIZE: usize = 100;

/// `PGRP` record body: one group of directory entries.
///
/// Groups are informational; file access never consults them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHeader {
    /// Hash of this group's name.
    pub name_hash: u32,
    /// Number of entries in the group.
    pub entry_count: u32,
    /// Flags for every entry in the group.
    pub flags_mask: u32,
}

impl GroupHeader {
    /// Parse the 12-byte body following an already-consumed `PGRP` tag.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        Ok(Self {
            name_hash: r.read_u32::<LittleEndian>()?,
            entry_count: r.read_u32::<LittleEndian>()?,
            flags_mask: r.read_u32::<LittleEndian>()?,
        })
    }
}

/// Per-chunk compression parameters trailing every `PFIL` record.
///
/// The game engine fills this in but its readers never consult it; the
/// decoder's geometry is fixed. Decoded here so tooling can inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LzssHeader {
    pub next: u32,
    pub byte_id: u8,
    pub header_size: u8,
    pub max_match: u8,
    pub fill_byte: u8,
    pub ring_size: u16,
    pub error_id: u16,
    pub uncompressed_bytes: u32,
    pub compressed_bytes: u32,
    pub crc: u32,
    pub file_id: u32,
    pub compressed_data_crc: u32,
}

impl LzssHeader {
    /// On-disk size in bytes.
    pub const SIZE: usize = 32;

    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        Ok(Self {
            next: r.read_u32::<LittleEndian>()?,
            byte_id: r.read_u8()?,
            header_size: r.read_u8()?,
            max_match: r.read_u8()?,
            fill_byte: r.read_u8()?,
            ring_size: r.read_u16::<LittleEndian>()?,
            error_id: r.read_u16::<LittleEndian>()?,
            uncompressed_bytes: r.read_u32::<LittleEndian>()?,
            compressed_bytes: r.read_u32::<LittleEndian>()?,
            crc: r.read_u32::<LittleEndian>()?,
            file_id: r.read_u32::<LittleEndian>()?,
            compressed_data_crc: r.read_u32::<LittleEndian>()?,
        })
    }
}

/// `PFIL` record body: one chunk of one logical file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub version_build: i16,

    /// Creation stamp. Encoding is undocumented; treated as opaque.
    pub day_created: u32,

    /// Index of this chunk within the file, `0..chunk_count`.
    pub chunk_number: u16,
    /// Total chunks in the file. Meaningful on chunk 0.
    pub chunk_count: u16,

    /// Name hashes resolved through the trailing string table.
    pub index_name: u32,
    pub index_source_name: u32,
    pub index_source_convert_name: u32,
    pub index_source_compress_name: u32,
    pub index_type: u32,

    pub pad_bytes: u32,
    pub flags: u32,
    /// Console pointer slot, meaningless on disc.
    pub data_ptr: u32,

    /// Uncompressed size of this chunk.
    pub chunk_size: u32,
    /// Byte offset of this chunk within the logical file.
    pub chunk_offset: u32,
    /// Stored (possibly compressed) size of this chunk in the container.
    pub data_size: u32,
    /// Offset of this chunk's stored bytes within the container.
    pub data_offset: u32,

    /// Total uncompressed size of the whole file. Meaningful on chunk 0.
    pub total_file_size: u32,

    pub lzss: LzssHeader,
}

impl FileHeader {
    /// Parse the 96-byte body following an already-consumed `PFIL` tag.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        Ok(Self {
            version_major: r.read_u8()?,
            version_minor: r.read_u8()?,
            version_build: r.read_i16::<LittleEndian>()?,
            day_created: r.read_u32::<LittleEndian>()?,
            chunk_number: r.read_u16::<LittleEndian>()?,
            chunk_count: r.read_u16::<LittleEndian>()?,
            index_name: r.read_u32::<LittleEndian>()?,
            index_source_name: r.read_u32::<LittleEndian>()?,
            index_source_convert_name: r.read_u32::<LittleEndian>()?,
            index_source_compress_name: r.read_u32::<LittleEndian>()?,
            index_type: r.read_u32::<LittleEndian>()?,
            pad_bytes: r.read_u32::<LittleEndian>()?,
            flags: r.read_u32::<LittleEndian>()?,
            data_ptr: r.read_u32::<LittleEndian>()?,
            chunk_size: r.read_u32::<LittleEndian>()?,
            chunk_offset: r.read_u32::<LittleEndian>()?,
            data_size: r.read_u32::<LittleEndian>()?,
            data_offset: r.read_u32::<LittleEndian>()?,
            total_file_size: r.read_u32::<LittleEndian>()?,
            lzss: LzssHeader::parse(r)?,
        })
    }

    /// Whether this chunk's payload is LZSS-compressed in the container.
    ///
    /// Compression is derived, not stored: a chunk whose stored size equals
    /// its uncompressed size was written verbatim.
    pub fn is_compressed(&self) -> bool {
        self.chunk_size != self.data_size
    }
}
