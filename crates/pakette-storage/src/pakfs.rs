//! Package filesystem facade
//!
//! Ties the directory, reader, and handle pool together behind POSIX-like
//! open/read/seek/tell/close calls. Construction *is* initialization: a
//! `PakFilesystem` value only exists once its directory parsed completely,
//! so callers never observe a partially initialized package.

use crate::directory::PackageDirectory;
use crate::error::{Error, Result};
use crate::pool::{Handle, HandlePool};
use crate::reader::ChunkReader;
use crate::types::{FileRecord, GroupRecord, PackageRegion};
use std::fs::File;
use std::io::{BufReader, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Reader over a package backed by an on-disk container file.
pub type PakReader = ChunkReader<BufReader<File>>;

/// One mounted package: an immutable directory plus a bounded table of open
/// file readers.
pub struct PakFilesystem {
    package_path: PathBuf,
    directory: PackageDirectory,
    pool: HandlePool<PakReader>,
}

impl PakFilesystem {
    /// Open file limit per package instance. Fixed by the memory budget the
    /// format was designed around; exceeding it fails `open`, it never
    /// grows.
    pub const MAX_OPEN_FILES: usize = 32;

    /// Mount a package: read its chunk directory and string table from
    /// `path` at the region `package.toc` assigned to it.
    pub fn open(path: impl AsRef<Path>, region: &PackageRegion) -> Result<Self> {
        let package_path = path.as_ref().to_path_buf();
        let file = File::open(&package_path).map_err(Error::ReadDirectory)?;
        let mut stream = BufReader::new(file);
        let directory = PackageDirectory::parse(&mut stream, region)?;
        debug!(
            "mounted package {:?}: {} files",
            package_path,
            directory.file_count()
        );

        Ok(Self {
            package_path,
            directory,
            pool: HandlePool::new(Self::MAX_OPEN_FILES),
        })
    }

    /// Open a logical file by its stored (case-sensitive) path. Each open
    /// handle gets its own backing stream and decode buffers.
    pub fn open_file(&mut self, path: &str) -> Result<Handle> {
        let record = self
            .directory
            .get(path)
            .ok_or_else(|| Error::FileNotFound(path.to_owned()))?
            .clone();
        if self.pool.is_full() {
            return Err(Error::TooManyOpenFiles(self.pool.capacity()));
        }

        let stream = BufReader::new(File::open(&self.package_path)?);
        let reader = ChunkReader::open(record, stream)?;
        self.pool
            .allocate(reader)
            .ok_or(Error::TooManyOpenFiles(Self::MAX_OPEN_FILES))
    }

    /// Read up to `dst.len()` bytes at the handle's position.
    pub fn read(&mut self, handle: Handle, dst: &mut [u8]) -> Result<usize> {
        self.reader_mut(handle)?.read(dst)
    }

    /// Reposition the handle. Fails outside `[0, size]`, leaving the
    /// position untouched.
    pub fn seek(&mut self, handle: Handle, pos: SeekFrom) -> Result<u64> {
        self.reader_mut(handle)?.seek(pos)
    }

    /// Current position of the handle.
    pub fn tell(&self, handle: Handle) -> Result<u64> {
        Ok(self.reader(handle)?.tell())
    }

    /// Total uncompressed size of the handle's file.
    pub fn size(&self, handle: Handle) -> Result<u32> {
        Ok(self.reader(handle)?.size())
    }

    /// Close the handle, freeing its slot for reuse.
    pub fn close(&mut self, handle: Handle) -> Result<()> {
        self.pool
            .release(handle)
            .map(drop)
            .ok_or(Error::InvalidHandle(handle))
    }

    /// The record behind an open handle.
    pub fn record(&self, handle: Handle) -> Result<&Arc<FileRecord>> {
        Ok(self.reader(handle)?.record())
    }

    /// Every file in the package, in no particular order.
    pub fn files(&self) -> impl Iterator<Item = &Arc<FileRecord>> {
        self.directory.files()
    }

    /// Metadata for one file, without opening it.
    pub fn metadata(&self, path: &str) -> Option<&Arc<FileRecord>> {
        self.directory.get(path)
    }

    /// Group records, in directory order.
    pub fn groups(&self) -> &[GroupRecord] {
        self.directory.groups()
    }

    pub fn file_count(&self) -> usize {
        self.directory.file_count()
    }

    /// Number of handles currently open.
    pub fn open_count(&self) -> usize {
        self.pool.occupied()
    }

    fn reader(&self, handle: Handle) -> Result<&PakReader> {
        self.pool.get(handle).ok_or(Error::InvalidHandle(handle))
    }

    fn reader_mut(&mut self, handle: Handle) -> Result<&mut PakReader> {
        self.pool
            .get_mut(handle)
            .ok_or(Error::InvalidHandle(handle))
    }
}
