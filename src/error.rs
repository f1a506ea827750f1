use std::fmt;

/// Failures that can occur while parsing and loading a cartridge image.
///
/// These are the only errors the core treats as fatal: once a cartridge is
/// loaded, runtime anomalies are logged and handled with defined fallback
/// semantics instead of propagating an error (see the crate-level docs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The 16-byte iNES header magic ("NES\x1A") was not found.
    UnrecognizedFormat,
    /// The header named a mapper number other than 0 (NROM).
    UnsupportedMapper(u8),
    /// The byte stream was shorter than the header claims it should be.
    Truncated,
    /// The underlying byte source could not be read.
    IoError(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::UnrecognizedFormat => write!(f, "not an iNES file (bad magic)"),
            LoadError::UnsupportedMapper(n) => write!(f, "unsupported mapper {n}"),
            LoadError::Truncated => write!(f, "file is truncated"),
            LoadError::IoError(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::IoError(err.to_string())
    }
}
