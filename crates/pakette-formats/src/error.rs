//! Error types for package format parsing

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("string table entry of {0} bytes exceeds the name length limit")]
    OversizedName(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
