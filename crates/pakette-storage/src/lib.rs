//! Read-only package filesystem for PS2-era game installations
//!
//! A game installation extracted from disc carries its assets inside a small
//! number of `.pak` containers, each holding many logical files split into
//! independently compressed chunks. This crate opens such an installation,
//! parses each container's chunk directory once, and hands out POSIX-like
//! file handles with open/read/seek/tell/close semantics — decompressing
//! chunks on demand rather than unpacking whole containers.
//!
//! Everything here is synchronous and single-threaded by design: facade
//! operations take `&mut self`, every open handle owns its buffers and
//! backing stream exclusively, and the parsed directory is immutable for the
//! package's lifetime.

pub mod directory;
pub mod error;
pub mod gamefs;
pub mod pakfs;
pub mod pool;
pub mod reader;
pub mod stream;
pub mod toc;
pub mod types;
pub mod version;

pub use directory::PackageDirectory;
pub use error::{Error, Result};
pub use gamefs::{AssetKind, GameFilesystem};
pub use pakfs::PakFilesystem;
pub use pool::{Handle, HandlePool};
pub use reader::ChunkReader;
pub use stream::PakStream;
pub use types::{ChunkDescriptor, FileRecord, GroupRecord, PackageRegion};
pub use version::{Build, GameVersion, Region};
