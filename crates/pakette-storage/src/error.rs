//! Error types for package storage operations

use crate::pool::Handle;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Initialization failures. Each of these is fatal to the package
    // instance: the constructor returns the error and no instance exists.
    #[error("failed to read chunk directory: {0}")]
    ReadDirectory(#[source] io::Error),

    #[error("failed to read string table: {0}")]
    ReadStringTable(#[source] pakette_formats::Error),

    #[error("directory record truncated at offset {0}")]
    TruncatedDirectory(u64),

    #[error("unknown directory record tag {tag:#010x} at offset {offset}")]
    UnknownRecordTag { tag: u32, offset: u64 },

    #[error("no string table entry for name hash {hash:#010x}")]
    UnresolvedName { hash: u32 },

    #[error("chunk record with no owning file record")]
    OrphanChunk,

    #[error("chunk {index} out of range for {name:?} ({count} chunks)")]
    ChunkIndexOutOfRange { name: String, index: u16, count: u16 },

    #[error("chunk {index} of {name:?} appears more than once")]
    DuplicateChunk { name: String, index: u16 },

    #[error("chunk {index} of {name:?} never appeared in the directory")]
    MissingChunk { name: String, index: u16 },

    #[error("chunk list of {name:?} does not cover the file contiguously")]
    ChunkCoverage { name: String },

    // Per-operation failures.
    #[error("file {0:?} does not exist in this package")]
    FileNotFound(String),

    #[error("invalid or stale file handle {0:?}")]
    InvalidHandle(Handle),

    #[error("all {0} file handles are in use")]
    TooManyOpenFiles(usize),

    #[error("seek to {target} is outside the file (size {size})")]
    SeekOutOfRange { target: i64, size: u32 },

    #[error("chunk {index} of {name:?} exceeds the maximum chunk size")]
    OversizedChunk { name: String, index: usize },

    // Host filesystem failures.
    #[error("{0:?} is not a game root (missing DATA/IRX/MOVIES/MUSIC)")]
    NotAGameRoot(PathBuf),

    #[error("no known game build matches the installation at {0:?}")]
    UnknownGameVersion(PathBuf),

    #[error("package.toc: {0}")]
    InvalidToc(String),

    #[error("package {0:?} is not listed in package.toc")]
    PackageNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Format(#[from] pakette_formats::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
