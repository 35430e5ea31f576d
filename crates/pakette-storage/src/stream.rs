//! Stream adapter over an open package file handle
//!
//! Generic stream consumers want `std::io::Read + Seek`, not handles. The
//! adapter owns one handle for its lifetime and closes it on drop. Unlike
//! the facade, its constructor has no sentinel convention to offer: a
//! missing file surfaces as an error from `open`.

use crate::error::Error;
use crate::pakfs::PakFilesystem;
use crate::pool::Handle;
use std::io::{self, Read, Seek, SeekFrom};

/// `Read + Seek` view of one file inside a mounted package.
pub struct PakStream<'fs> {
    fs: &'fs mut PakFilesystem,
    handle: Handle,
    size: u32,
}

impl<'fs> PakStream<'fs> {
    /// Open `path` inside the package and wrap the handle.
    pub fn open(fs: &'fs mut PakFilesystem, path: &str) -> crate::Result<Self> {
        let handle = fs.open_file(path)?;
        let size = fs.size(handle)?;
        Ok(Self { fs, handle, size })
    }

    /// Total uncompressed size of the wrapped file.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether the cursor has reached the end of the file.
    pub fn has_ended(&self) -> bool {
        self.fs.tell(self.handle).unwrap_or(u64::from(self.size)) == u64::from(self.size)
    }
}

impl Read for PakStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fs.read(self.handle, buf).map_err(io::Error::other)
    }
}

impl Seek for PakStream<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.fs.seek(self.handle, pos).map_err(|e| match e {
            Error::SeekOutOfRange { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
            other => io::Error::other(other),
        })
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        self.fs.tell(self.handle).map_err(io::Error::other)
    }
}

impl Drop for PakStream<'_> {
    fn drop(&mut self) {
        let _ = self.fs.close(self.handle);
    }
}
