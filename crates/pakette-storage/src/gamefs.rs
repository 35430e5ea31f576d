//! Game installation filesystem
//!
//! The host side of the package stack: validates a directory extracted from
//! disc, identifies the build, resolves asset names to on-disk artifacts,
//! and supplies each package's directory region from `package.toc`.
//!
//! `DATA` assets do not ship under their logical names: the disc carries
//! them as the uppercase-hex content hash of the name plus a `.DAT`
//! extension. The clear name is tried second so re-packed or debug trees
//! keep working. All other asset spaces are clear-named.

use crate::error::{Error, Result};
use crate::pakfs::PakFilesystem;
use crate::toc;
use crate::types::PackageRegion;
use crate::version::{self, GameVersion};
use pakette_formats::hash::hash_name;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The four asset spaces an installation root carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Data,
    Irx,
    Movies,
    Music,
}

impl AssetKind {
    /// Folder name under the installation root.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Data => "DATA",
            Self::Irx => "IRX",
            Self::Movies => "MOVIES",
            Self::Music => "MUSIC",
        }
    }

    const ALL: [Self; 4] = [Self::Data, Self::Irx, Self::Movies, Self::Music];
}

/// A validated game installation.
pub struct GameFilesystem {
    root: PathBuf,
    version: GameVersion,
    packages: HashMap<String, PackageRegion>,
}

impl GameFilesystem {
    /// Validate `root` as a game installation and load its package table.
    ///
    /// Fails if the directory layout is wrong, no known build matches, or
    /// `package.toc` is missing or damaged.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for kind in AssetKind::ALL {
            if !root.join(kind.folder()).is_dir() {
                return Err(Error::NotAGameRoot(root));
            }
        }

        let version = version::detect(&root)?;
        info!("detected game build: {version}");

        let mut fs = Self {
            root,
            version,
            packages: HashMap::new(),
        };
        let mut toc_stream = fs.open_asset("package.toc", AssetKind::Data)?;
        for entry in toc::parse(&mut toc_stream)? {
            debug!(
                "package {}: directory {:#x}+{:#x}, {} files",
                entry.name,
                entry.region.directory_offset,
                entry.region.directory_size,
                entry.region.file_count
            );
            fs.packages.insert(entry.name, entry.region);
        }
        Ok(fs)
    }

    /// The identified build.
    pub fn version(&self) -> GameVersion {
        self.version
    }

    /// Installation root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Package name to directory region, as listed by `package.toc`.
    pub fn packages(&self) -> &HashMap<String, PackageRegion> {
        &self.packages
    }

    /// Resolve an asset name to the path it actually lives at.
    pub fn asset_path(&self, name: &str, kind: AssetKind) -> PathBuf {
        let folder = self.root.join(kind.folder());
        if kind == AssetKind::Data {
            let hashed = folder.join(format!("{:X}.DAT", hash_name(name)));
            if hashed.is_file() {
                return hashed;
            }
        }
        folder.join(name)
    }

    /// Open a named asset file.
    pub fn open_asset(&self, name: &str, kind: AssetKind) -> Result<File> {
        Ok(File::open(self.asset_path(name, kind))?)
    }

    /// Mount a package listed in `package.toc`.
    pub fn open_package(&self, name: &str) -> Result<PakFilesystem> {
        let region = self
            .packages
            .get(name)
            .ok_or_else(|| Error::PackageNotFound(name.to_owned()))?;
        PakFilesystem::open(self.asset_path(name, AssetKind::Data), region)
    }
}
