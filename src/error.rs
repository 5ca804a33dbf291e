//! Error handling for METAR decoding operations.
//!
//! Two layers live here. [`ChunkDecodeError`] is produced by a single chunk
//! decoder when its grammar production does not match; the chain records it
//! on the decoded report as a [`DecodingException`] and never surfaces it as
//! a `Result::Err`. [`Error`] covers the ambient layers around the engine:
//! configuration, file I/O, serialization and unit conversion.

use crate::decoder::chunk::{ChunkRole, consume_one_chunk};
use crate::models::Unit;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the METAR decoder
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the decode loop
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration file '{}': {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Decoded report could not be serialized
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Conversion between incompatible units
    #[error("Conversion between '{from}' and '{to}' is not defined")]
    UnitConversion { from: Unit, to: Unit },

    /// The process-wide default strictness was already fixed
    #[error("Default strictness already set to {current}")]
    DefaultStrictnessAlreadySet { current: bool },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration file parsing error
    pub fn config_file(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigFile {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a unit conversion error
    pub fn unit_conversion(from: Unit, to: Unit) -> Self {
        Self::UnitConversion { from, to }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigFile {
            path: PathBuf::from("<inline>"),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

/// Why a chunk decoder rejected the text at the current position
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChunkErrorKind {
    #[error("Station ICAO code not found (4 char expected)")]
    IcaoNotFound,

    #[error("Missing or badly formatted day/hour/minute information (\"ddhhmmZ\" expected)")]
    BadDayHourMinute,

    #[error("Invalid values for day/hour/minute")]
    InvalidDayHourMinuteRanges,

    #[error("Invalid report status, expecting AUTO, NIL, or any other 3 letter word")]
    InvalidReportStatus,

    #[error("No information expected after NIL status")]
    InformationAfterNil,

    #[error("Bad format for surface wind information")]
    SurfaceWindBadFormat,

    #[error("No information measured for surface wind")]
    NoSurfaceWindMeasured,

    #[error("Wind direction should be in [0,360]")]
    InvalidWindDirection,

    #[error("Wind direction variations should be in [0,360]")]
    InvalidWindDirectionVariations,

    #[error("Bad format for visibility information")]
    VisibilityBadFormat,

    #[error("Invalid runway QFU runway visual range information")]
    InvalidRunwayVisualRangeRunway,

    #[error("Invalid runway QFU wind shear information")]
    InvalidWindShearRunway,

    #[error("Bad format for clouds information")]
    CloudsBadFormat,

    #[error("Atmospheric pressure not found")]
    PressureNotFound,
}

/// Failure of one chunk decoder at one position of the report
///
/// `remaining` is the text the decoder was given, untouched. `next_remaining`
/// is the same text with its first whitespace-delimited token discarded, or
/// `None` when there is no further token to discard.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{role} chunk: {kind}")]
pub struct ChunkDecodeError {
    pub role: ChunkRole,
    pub kind: ChunkErrorKind,
    pub remaining: String,
    pub next_remaining: Option<String>,
}

impl ChunkDecodeError {
    pub fn new(role: ChunkRole, kind: ChunkErrorKind, remaining: &str) -> Self {
        let skipped = consume_one_chunk(remaining);
        let next_remaining = (skipped.len() != remaining.len()).then(|| skipped.to_string());

        Self {
            role,
            kind,
            remaining: remaining.to_string(),
            next_remaining,
        }
    }

    /// Text the chain continues from when recovery is not possible
    pub fn resume_text(&self) -> &str {
        self.next_remaining.as_deref().unwrap_or(&self.remaining)
    }
}

/// How the chain dealt with a chunk failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Disposition {
    /// Lenient mode, the skip-one-token retry also failed
    Malformed,
    /// Lenient mode, the retry after discarding one token succeeded
    RecoveredViaSkip,
    /// Strict mode, decoding stopped at this chunk
    StrictAbort,
}

/// A chunk failure recorded on a decoded report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodingException {
    pub error: ChunkDecodeError,
    pub disposition: Disposition,
}

impl DecodingException {
    pub fn new(error: ChunkDecodeError, disposition: Disposition) -> Self {
        Self { error, disposition }
    }

    /// Soft warnings are failures the chain recovered from
    pub fn is_soft(&self) -> bool {
        self.disposition == Disposition::RecoveredViaSkip
    }

    pub fn role(&self) -> ChunkRole {
        self.error.role
    }

    pub fn kind(&self) -> ChunkErrorKind {
        self.error.kind
    }
}

impl std::fmt::Display for DecodingException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.error, self.disposition)
    }
}
