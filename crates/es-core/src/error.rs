use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{CommandKind, ScriptLine};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("File with path {} does not exist.", .0.display())]
    FileNotFound(PathBuf),
    #[error("Unsupported endscript version, expected version {0}.")]
    UnsupportedVersion(u32),
    #[error("Invalid number of arguments: got {actual}, expected {expected}.")]
    ArgCountMismatch { actual: usize, expected: usize },
    #[error("Unrecognizable command named \"{0}\".")]
    UnrecognizedCommand(String),
    #[error("Command of type {0} cannot be executed in a single-command mode.")]
    NotSinglyExecutable(CommandKind),
    #[error("Include cycle detected: {0}")]
    CircularInclude(String),
    #[error("Invalid argument \"{token}\", expected {expected}.")]
    InvalidArgument { token: String, expected: String },
    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
    #[error("Malformed launch descriptor: {0}")]
    LaunchFormat(String),
    #[error("Malformed description document: {0}")]
    DescriptionFormat(String),
    #[error("{0}")]
    Execution(String),
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::FileNotFound(_) => "FILE_NOT_FOUND",
            ErrorKind::UnsupportedVersion(_) => "UNSUPPORTED_VERSION",
            ErrorKind::ArgCountMismatch { .. } => "ARG_COUNT_MISMATCH",
            ErrorKind::UnrecognizedCommand(_) => "UNRECOGNIZED_COMMAND",
            ErrorKind::NotSinglyExecutable(_) => "NOT_SINGLY_EXECUTABLE",
            ErrorKind::CircularInclude(_) => "CIRCULAR_INCLUDE",
            ErrorKind::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ErrorKind::Io { .. } => "IO",
            ErrorKind::LaunchFormat(_) => "LAUNCH_FORMAT",
            ErrorKind::DescriptionFormat(_) => "DESCRIPTION_FORMAT",
            ErrorKind::Execution(_) => "EXECUTION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndscriptError {
    pub kind: ErrorKind,
    pub location: Option<ScriptLine>,
}

impl fmt::Display for EndscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.kind)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

impl std::error::Error for EndscriptError {}

impl EndscriptError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    pub fn with_location(kind: ErrorKind, location: ScriptLine) -> Self {
        Self {
            kind,
            location: Some(location),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Attaches `location` unless an inner frame already did.
    pub fn at(mut self, location: &ScriptLine) -> Self {
        if self.location.is_none() {
            self.location = Some(location.clone());
        }
        self
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(ErrorKind::FileNotFound(path.into()))
    }

    pub fn arg_count(actual: usize, expected: usize) -> Self {
        Self::new(ErrorKind::ArgCountMismatch { actual, expected })
    }

    pub fn invalid_argument(token: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            token: token.into(),
            expected: expected.into(),
        })
    }

    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: error.to_string(),
        })
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Execution(message.into()))
    }
}

impl From<ErrorKind> for EndscriptError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
