//! Container directory parsing
//!
//! A package's chunk directory is a flat run of tagged records (`PGRP`,
//! `PFIL`) at a known offset, followed immediately by the string table the
//! records refer to by hash. Parsing replays the directory once and builds
//! an immutable table of file records; every failure here is fatal to the
//! package, so a half-parsed directory is never observable.

use crate::error::{Error, Result};
use crate::types::{ChunkDescriptor, FileRecord, GroupRecord, PackageRegion};
use byteorder::{LittleEndian, ReadBytesExt};
use pakette_formats::package::{FileHeader, GroupHeader};
use pakette_formats::strings::StringTable;
use pakette_formats::tags::{TAG_FILE, TAG_GROUP, tag_name};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Parsed directory: every file record and group in one package.
#[derive(Debug, Default)]
pub struct PackageDirectory {
    files: HashMap<String, Arc<FileRecord>>,
    groups: Vec<GroupRecord>,
}

/// A file record under construction: chunk slots fill as `PFIL` records
/// arrive, then the whole thing is validated and frozen.
struct PendingFile {
    record: FileRecord,
    slots: Vec<Option<ChunkDescriptor>>,
}

impl PendingFile {
    fn begin(header: &FileHeader, table: &StringTable) -> Result<Self> {
        let resolve = |hash: u32| -> Result<String> {
            table
                .resolve(hash)
                .map(str::to_owned)
                .ok_or(Error::UnresolvedName { hash })
        };

        Ok(Self {
            record: FileRecord {
                name: resolve(header.index_name)?,
                source_name: resolve(header.index_source_name)?,
                source_convert_name: resolve(header.index_source_convert_name)?,
                source_compress_name: resolve(header.index_source_compress_name)?,
                type_name: resolve(header.index_type)?,
                total_size: header.total_file_size,
                date_stamp: header.day_created,
                chunks: Vec::new(),
            },
            slots: (0..header.chunk_count).map(|_| None).collect(),
        })
    }

    fn fill(&mut self, header: &FileHeader) -> Result<()> {
        let index = header.chunk_number;
        let count = self.slots.len() as u16;
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or_else(|| Error::ChunkIndexOutOfRange {
                name: self.record.name.clone(),
                index,
                count,
            })?;
        if slot.is_some() {
            return Err(Error::DuplicateChunk {
                name: self.record.name.clone(),
                index,
            });
        }

        *slot = Some(ChunkDescriptor {
            index,
            file_offset: header.chunk_offset,
            source_offset: header.data_offset,
            source_size: header.data_size,
            uncompressed_size: header.chunk_size,
            compressed: header.is_compressed(),
        });
        Ok(())
    }

    /// Check every slot arrived and the chunk list partitions
    /// `[0, total_size)` without gaps or overlaps.
    fn finish(self) -> Result<FileRecord> {
        let mut record = self.record;
        let mut chunks = Vec::with_capacity(self.slots.len());
        for (index, slot) in self.slots.into_iter().enumerate() {
            chunks.push(slot.ok_or_else(|| Error::MissingChunk {
                name: record.name.clone(),
                index: index as u16,
            })?);
        }

        let mut expected_offset = 0u64;
        for chunk in &chunks {
            if u64::from(chunk.file_offset) != expected_offset {
                return Err(Error::ChunkCoverage {
                    name: record.name,
                });
            }
            expected_offset += u64::from(chunk.uncompressed_size);
        }
        if expected_offset != u64::from(record.total_size) {
            return Err(Error::ChunkCoverage {
                name: record.name,
            });
        }

        record.chunks = chunks;
        Ok(record)
    }
}

impl PackageDirectory {
    /// Parse the directory and string table from a package stream.
    pub fn parse<R: Read + Seek>(stream: &mut R, region: &PackageRegion) -> Result<Self> {
        let mut buf = vec![0u8; region.directory_size as usize];
        stream
            .seek(SeekFrom::Start(region.directory_offset))
            .map_err(Error::ReadDirectory)?;
        stream.read_exact(&mut buf).map_err(Error::ReadDirectory)?;

        // The string table sits immediately after the directory region.
        let table = StringTable::parse(stream).map_err(Error::ReadStringTable)?;
        trace!(
            "directory region {} bytes, {} string table entries",
            buf.len(),
            table.len()
        );

        let mut directory = Self::default();
        directory.replay(&buf, &table)?;
        debug!(
            "parsed package directory: {} files, {} groups",
            directory.files.len(),
            directory.groups.len()
        );
        Ok(directory)
    }

    fn replay(&mut self, buf: &[u8], table: &StringTable) -> Result<()> {
        let len = buf.len() as u64;
        let mut cursor = Cursor::new(buf);
        let mut current: Option<PendingFile> = None;

        loop {
            let offset = cursor.position();
            if len - offset < 4 {
                // A tag read that would cross the end of the region is
                // end-of-directory, not an error.
                break;
            }
            let tag = cursor
                .read_u32::<LittleEndian>()
                .map_err(|_| Error::TruncatedDirectory(offset))?;

            match tag {
                TAG_GROUP => {
                    let header = GroupHeader::parse(&mut cursor)
                        .map_err(|_| Error::TruncatedDirectory(offset))?;
                    let name = table
                        .resolve(header.name_hash)
                        .ok_or(Error::UnresolvedName {
                            hash: header.name_hash,
                        })?
                        .to_owned();
                    trace!("group {name:?}: {} entries", header.entry_count);
                    self.groups.push(GroupRecord {
                        name,
                        entry_count: header.entry_count,
                        flags_mask: header.flags_mask,
                    });
                }
                TAG_FILE => {
                    let header = FileHeader::parse(&mut cursor)
                        .map_err(|_| Error::TruncatedDirectory(offset))?;
                    if header.chunk_number == 0 {
                        if let Some(pending) = current.take() {
                            self.insert(pending.finish()?);
                        }
                        current = Some(PendingFile::begin(&header, table)?);
                    }
                    current
                        .as_mut()
                        .ok_or(Error::OrphanChunk)?
                        .fill(&header)?;
                }
                other => {
                    error!("unknown record tag {} at offset {offset}", tag_name(other));
                    return Err(Error::UnknownRecordTag {
                        tag: other,
                        offset,
                    });
                }
            }
        }

        if let Some(pending) = current.take() {
            self.insert(pending.finish()?);
        }
        Ok(())
    }

    fn insert(&mut self, record: FileRecord) {
        trace!("file {record}");
        if let Some(previous) = self.files.insert(record.name.clone(), Arc::new(record)) {
            warn!("duplicate file record {:?}, keeping the later one", previous.name);
        }
    }

    /// Look up a file by its stored (case-sensitive) path.
    pub fn get(&self, path: &str) -> Option<&Arc<FileRecord>> {
        self.files.get(path)
    }

    /// Every file in the package, in no particular order.
    pub fn files(&self) -> impl Iterator<Item = &Arc<FileRecord>> {
        self.files.values()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Group records in directory order.
    pub fn groups(&self) -> &[GroupRecord] {
        &self.groups
    }
}
