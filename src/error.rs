//! Unified error types for rcsnitch.
//!
//! The bridge core itself never fails: malformed input is dropped.
//! These errors come from the edges: host-side encoding, code parsing,
//! capture files, configuration and serial I/O.

use core::fmt;
use std::io;

use crate::codes::CodeError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible library operation funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// Serial or file I/O failed.
    Io(io::Error),
    /// A message payload does not fit in one frame (carries its length).
    MessageTooLong(usize),
    /// An RF code string was malformed.
    InvalidCode(CodeError),
    /// A capture file could not be parsed (line number, reason).
    InvalidCapture { line: usize, reason: &'static str },
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O: {e}"),
            Self::MessageTooLong(len) => {
                write!(f, "message of {len} bytes exceeds the 15-byte frame limit")
            }
            Self::InvalidCode(e) => write!(f, "invalid code: {e}"),
            Self::InvalidCapture { line, reason } => {
                write!(f, "invalid capture file at line {line}: {reason}")
            }
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidCode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<CodeError> for Error {
    fn from(e: CodeError) -> Self {
        Self::InvalidCode(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
