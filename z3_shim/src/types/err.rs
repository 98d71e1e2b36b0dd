//! Error types used in the library.
//!
//! Errors fall into three groups:
//! - [LoadError], the native library could not be found, opened, or lacks some entry point.
//! - [NativeError], the error register of a context held a failure code after a checked call.
//!   These are recoverable, and the context may continue to be used.
//! - [UsageError], the library was used incorrectly, e.g. before a native library was loaded or with a handle from another context.
//!
//! Each group is wrapped by [ErrorKind], which is the error type of every fallible operation.
//  As with the structs they describe, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use std::{ffi::c_uint, path::PathBuf};

use thiserror::Error;

use crate::context::ContextId;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Context creation returned a null context, and so no register exists to consult.
    #[error("the native library failed to create a context")]
    NullContext,

    /// Config creation returned a null config.
    #[error("the native library failed to create a config")]
    NullConfig,
}

impl ErrorKind {
    /// The native error code, if the error came from the register of a context.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ErrorKind::Native(e) => Some(e.code),
            _ => None,
        }
    }
}

/// A single attempt to open a candidate library.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadAttempt {
    pub path: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for LoadAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Errors when loading the native library.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LoadError {
    /// The system loader refused the path.
    #[error("failed to open {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    /// The library was opened, but some entry point is missing.
    /// Likely an older or unrelated library.
    #[error("missing native symbol {symbol}: {reason}")]
    MissingSymbol { symbol: &'static str, reason: String },

    /// Every candidate in the discovery order failed.
    #[error("no native library found ({} candidates tried)", .attempts.len())]
    NotFound { attempts: Vec<LoadAttempt> },
}

/// A failure recorded in the error register of a context.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{operation} failed with {code:?}: {message}")]
pub struct NativeError {
    /// The native operation, without the `Z3_` prefix.
    pub operation: &'static str,

    /// The value of the register immediately after the call.
    pub code: ErrorCode,

    /// The message the context gave for `code`, read before any other call on the context.
    pub message: String,
}

/// Errors in the use of the library, rather than in the native library.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum UsageError {
    /// No library has been loaded, and none could be discovered.
    #[error("no native library is loaded: init must be invoked with a library path before use")]
    NotInitialised,

    /// A handle was given to a context other than the context which produced it.
    #[error("{operation} was given a handle from context {found}, but is scoped to context {expected}")]
    ForeignHandle {
        operation: &'static str,
        expected: ContextId,
        found: ContextId,
    },

    /// Text passed to the native library may not contain a NUL byte.
    #[error("{operation} was given text with a NUL byte at position {position}")]
    InteriorNul {
        operation: &'static str,
        position: usize,
    },

    /// More arguments than the native count type allows.
    #[error("{operation} was given {count} arguments")]
    ArgumentCount { operation: &'static str, count: usize },

    /// Two contexts given to a single operation were created from different libraries.
    #[error("{operation} was given contexts from different native libraries")]
    ForeignLibrary { operation: &'static str },
}

/// The values of the error register.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorCode {
    Ok,
    SortError,
    IndexOutOfBounds,
    InvalidArg,
    ParserError,
    NoParser,
    InvalidPattern,
    MemoutFail,
    FileAccessError,
    InternalFatal,
    InvalidUsage,
    DecRefError,
    Exception,

    /// A code outside of the known enumeration, kept as given.
    Unknown(c_uint),
}

impl ErrorCode {
    pub fn is_ok(&self) -> bool {
        matches!(self, ErrorCode::Ok)
    }

    pub fn as_raw(&self) -> c_uint {
        match self {
            ErrorCode::Ok => 0,
            ErrorCode::SortError => 1,
            ErrorCode::IndexOutOfBounds => 2,
            ErrorCode::InvalidArg => 3,
            ErrorCode::ParserError => 4,
            ErrorCode::NoParser => 5,
            ErrorCode::InvalidPattern => 6,
            ErrorCode::MemoutFail => 7,
            ErrorCode::FileAccessError => 8,
            ErrorCode::InternalFatal => 9,
            ErrorCode::InvalidUsage => 10,
            ErrorCode::DecRefError => 11,
            ErrorCode::Exception => 12,
            ErrorCode::Unknown(raw) => *raw,
        }
    }
}

impl From<c_uint> for ErrorCode {
    fn from(raw: c_uint) -> Self {
        match raw {
            0 => ErrorCode::Ok,
            1 => ErrorCode::SortError,
            2 => ErrorCode::IndexOutOfBounds,
            3 => ErrorCode::InvalidArg,
            4 => ErrorCode::ParserError,
            5 => ErrorCode::NoParser,
            6 => ErrorCode::InvalidPattern,
            7 => ErrorCode::MemoutFail,
            8 => ErrorCode::FileAccessError,
            9 => ErrorCode::InternalFatal,
            10 => ErrorCode::InvalidUsage,
            11 => ErrorCode::DecRefError,
            12 => ErrorCode::Exception,
            other => ErrorCode::Unknown(other),
        }
    }
}
