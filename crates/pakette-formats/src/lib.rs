//! File format parsers for PS2-era game package (`.pak`) containers
//!
//! A package stores many logical files as runs of independently compressed
//! chunks. A tagged-record directory at a known offset describes every file
//! and chunk; a trailing string table holds the literal names the directory
//! refers to by 32-bit hash.
//!
//! This crate is the pure format layer: record layouts, the name hash, the
//! string table, and the LZSS chunk codec. It performs no file I/O of its
//! own — everything parses from `std::io::Read` sources or byte slices.
//! Storage-level concerns (directory replay, chunked readers, handle
//! management) live in `pakette-storage`.

pub mod error;
pub mod hash;
pub mod lzss;
pub mod package;
pub mod strings;
pub mod tags;

pub use error::{Error, Result};
pub use package::{FileHeader, GroupHeader, LzssHeader, MAX_CHUNK_SIZE};
pub use strings::StringTable;
