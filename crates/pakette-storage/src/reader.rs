//! Chunked file reader
//!
//! One reader exists per open handle. It walks the file's chunk list,
//! faulting each chunk in from its private backing stream and decompressing
//! on demand, so sequential reads touch each stored chunk exactly once and
//! seeks only reload when they cross a chunk boundary.
//!
//! Readers never share mutable state: the chunk metadata is an `Arc` into
//! the parsed directory, and the stream, cursor, and buffers are owned.

use crate::error::{Error, Result};
use crate::types::FileRecord;
use pakette_formats::MAX_CHUNK_SIZE;
use pakette_formats::lzss;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;
use tracing::{trace, warn};

/// Cursor over one logical file inside a package.
pub struct ChunkReader<S> {
    record: Arc<FileRecord>,
    stream: S,

    /// Index of the chunk currently held decoded.
    chunk_index: usize,
    /// Uncompressed length of the current chunk.
    chunk_len: usize,
    /// Read position within the current chunk's decoded bytes.
    chunk_pos: usize,
    /// Absolute position, `0..=total_size`.
    file_pos: u64,

    decode_buf: Vec<u8>,
    read_buf: Vec<u8>,
}

impl<S: Read + Seek> ChunkReader<S> {
    /// Bind a file record to a private backing stream and fault in chunk 0.
    pub fn open(record: Arc<FileRecord>, stream: S) -> Result<Self> {
        let mut reader = Self {
            record,
            stream,
            chunk_index: 0,
            chunk_len: 0,
            chunk_pos: 0,
            file_pos: 0,
            decode_buf: vec![0u8; MAX_CHUNK_SIZE],
            read_buf: vec![0u8; MAX_CHUNK_SIZE],
        };
        if !reader.record.chunks.is_empty() {
            reader.load_chunk(0)?;
        }
        Ok(reader)
    }

    /// The record this reader is bound to.
    pub fn record(&self) -> &Arc<FileRecord> {
        &self.record
    }

    /// Total uncompressed size of the file.
    pub fn size(&self) -> u32 {
        self.record.total_size
    }

    /// Current absolute position.
    pub fn tell(&self) -> u64 {
        self.file_pos
    }

    /// Fault chunk `index` in: read its stored bytes and decode them.
    fn load_chunk(&mut self, index: usize) -> Result<()> {
        let chunk = self.record.chunks[index];
        let stored = chunk.source_size as usize;
        let uncompressed = chunk.uncompressed_size as usize;
        if stored > self.read_buf.len() || uncompressed > self.decode_buf.len() {
            return Err(Error::OversizedChunk {
                name: self.record.name.clone(),
                index,
            });
        }

        trace!(
            "fault chunk {index} of {:?}: {stored} stored bytes at {:#x}",
            self.record.name, chunk.source_offset
        );
        self.stream
            .seek(SeekFrom::Start(u64::from(chunk.source_offset)))?;
        self.stream.read_exact(&mut self.read_buf[..stored])?;

        if chunk.compressed {
            let written =
                lzss::decompress(&self.read_buf[..stored], &mut self.decode_buf[..uncompressed]);
            if written < uncompressed {
                // The stream ended early; the remainder stays deterministic.
                warn!(
                    "chunk {index} of {:?} decoded short: {written} of {uncompressed} bytes",
                    self.record.name
                );
                self.decode_buf[written..uncompressed].fill(0);
            }
        } else {
            self.decode_buf[..uncompressed].copy_from_slice(&self.read_buf[..stored]);
        }

        self.chunk_index = index;
        self.chunk_len = uncompressed;
        self.chunk_pos = 0;
        Ok(())
    }

    /// Copy up to `dst.len()` bytes at the current position, faulting in
    /// successive chunks as each is exhausted. Returns the number of bytes
    /// copied: less than requested at end of file, 0 once the position has
    /// reached the file size or for an empty `dst`.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        let mut copied = 0;
        while copied < dst.len() {
            let available = self.chunk_len - self.chunk_pos;
            if available == 0 {
                let next = self.chunk_index + 1;
                if next >= self.record.chunks.len() {
                    break;
                }
                self.load_chunk(next)?;
                continue;
            }

            let n = available.min(dst.len() - copied);
            dst[copied..copied + n]
                .copy_from_slice(&self.decode_buf[self.chunk_pos..self.chunk_pos + n]);
            self.chunk_pos += n;
            self.file_pos += n as u64;
            copied += n;
        }
        Ok(copied)
    }

    /// Move the cursor. Targets outside `[0, size]` fail without touching
    /// any state. Crossing into a different chunk faults it in.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let size = i64::from(self.record.total_size);
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).unwrap_or(i64::MAX),
            SeekFrom::Current(delta) => (self.file_pos as i64).saturating_add(delta),
            SeekFrom::End(delta) => size.saturating_add(delta),
        };
        if target < 0 || target > size {
            return Err(Error::SeekOutOfRange {
                target,
                size: self.record.total_size,
            });
        }
        let target = target as u64;

        // Locate the covering chunk with a linear scan; chunk counts are
        // small. A position of exactly `size` parks on the last chunk.
        let mut index = 0usize;
        let mut chunk_start = 0u64;
        let mut acc = 0u64;
        for (i, chunk) in self.record.chunks.iter().enumerate() {
            index = i;
            chunk_start = acc;
            acc += u64::from(chunk.uncompressed_size);
            if target < acc {
                break;
            }
        }

        if !self.record.chunks.is_empty() && index != self.chunk_index {
            self.load_chunk(index)?;
        }
        self.chunk_pos = (target - chunk_start) as usize;
        self.file_pos = target;
        Ok(target)
    }
}
