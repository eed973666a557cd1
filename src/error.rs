//! Error type shared by the collaborators around the transpiler.
//!
//! The transpiler itself never fails; these errors come from importing
//! documents, reading images and loading configuration.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ForgeError {
    /// The source document could not be turned into HTML.
    ConversionFailed(String),
    /// An image file could not be read or decoded.
    UnreadableFile(String),
    /// A template configuration could not be parsed.
    InvalidConfig(String),
    Io(io::Error),
}

impl fmt::Display for ForgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForgeError::ConversionFailed(msg) => write!(f, "conversion failed: {msg}"),
            ForgeError::UnreadableFile(msg) => write!(f, "unreadable file: {msg}"),
            ForgeError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            ForgeError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ForgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForgeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ForgeError {
    fn from(e: io::Error) -> Self {
        ForgeError::Io(e)
    }
}
