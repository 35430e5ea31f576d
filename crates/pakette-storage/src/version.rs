//! Game build identification
//!
//! Installations are told apart by the serial-named boot executable in the
//! root. The executable is digested with SHA-256 so a build can be pinned
//! exactly once a reference digest is known; entries without one match on
//! the serial alone.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NtscU,
    Pal,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NtscU => "NTSC-U",
            Self::Pal => "PAL",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Build {
    Prealpha,
    FirstLookDemo,
    Retail,
    Retail2,
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prealpha => "Pre-Alpha",
            Self::FirstLookDemo => "First Look Demo",
            Self::Retail => "Version 1.0",
            Self::Retail2 => "Version 2.0",
        })
    }
}

/// Region + build pair identifying one shipped disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameVersion {
    pub region: Region,
    pub build: Build,
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.region, self.build)
    }
}

/// One disc we know how to recognize.
#[derive(Debug, Clone, Copy)]
pub struct KnownBuild {
    pub version: GameVersion,
    /// Boot executable file name in the installation root.
    pub serial: &'static str,
    /// Hex SHA-256 of the boot executable, where one has been recorded.
    pub digest: Option<&'static str>,
}

/// Discs recognized out of the box. Digests get filled in as dumps are
/// verified.
pub const KNOWN_BUILDS: &[KnownBuild] = &[
    KnownBuild {
        version: GameVersion {
            region: Region::NtscU,
            build: Build::Retail,
        },
        serial: "SLUS_202.29",
        digest: None,
    },
    KnownBuild {
        version: GameVersion {
            region: Region::Pal,
            build: Build::Retail,
        },
        serial: "SLES_506.20",
        digest: None,
    },
];

fn sha256_hex(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Identify the build installed at `root` against `builds`.
pub fn detect_with(root: &Path, builds: &[KnownBuild]) -> Result<GameVersion> {
    for known in builds {
        let executable = root.join(known.serial);
        if !executable.is_file() {
            continue;
        }

        let digest = sha256_hex(&executable)?;
        debug!("boot executable {}: sha256 {digest}", known.serial);
        match known.digest {
            Some(reference) if !reference.eq_ignore_ascii_case(&digest) => {
                info!(
                    "{} present but its digest does not match the recorded dump",
                    known.serial
                );
            }
            _ => return Ok(known.version),
        }
    }

    Err(Error::UnknownGameVersion(root.to_path_buf()))
}

/// Identify the build installed at `root`.
pub fn detect(root: &Path) -> Result<GameVersion> {
    detect_with(root, KNOWN_BUILDS)
}
