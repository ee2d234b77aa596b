//! Error types for parsing, writing, and record traversal.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::Kind;

/// Errors that can occur while parsing, writing, or traversing a record.
///
/// Every variant aborts the operation that raised it. There is no partial
/// recovery: a traversal that fails halfway leaves already-visited fields
/// as they were assigned.
#[derive(Error, Debug)]
pub enum PrefError {
    /// A JSON node did not hold the variant the caller asked for.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A `true`, `false` or `null` token was misspelled.
    #[error("malformed literal at byte {offset}: expected `{expected}`")]
    MalformedLiteral {
        expected: &'static str,
        offset: usize,
    },

    /// The parser could not classify the next character.
    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedToken { found: char, offset: usize },

    /// Input ended in the middle of a token.
    #[error("unexpected end of input inside {context}")]
    UnexpectedEnd { context: &'static str },

    /// Characters that looked like a number did not form one.
    #[error("malformed number {text:?} at byte {offset}")]
    MalformedNumber { text: String, offset: usize },

    /// Containers were nested more deeply than the parser allows.
    #[error("nesting too deep at byte {offset}")]
    DepthLimit { offset: usize },

    /// Reading from a caller-supplied stream failed.
    #[error("failed to read input stream: {0}")]
    Stream(#[source] std::io::Error),

    /// A file could not be written, or an opened file could not be read.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout prefsync-core.
pub type Result<T> = std::result::Result<T, PrefError>;
