//! Error types for the Kit Protocol interpreter.

use kit_common::{FromHexError, KitStatus};
use thiserror::Error;

/// A message that could not be parsed. Always answered with
/// `CommandNotValid`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No message terminator in the buffer.
    #[error("message has no terminator")]
    Incomplete,

    /// A required section separator is missing.
    #[error("missing {section} section")]
    MissingSection { section: &'static str },

    /// A section is present but empty.
    #[error("empty {section} section")]
    EmptySection { section: &'static str },

    /// First character of the target section is not a known target.
    #[error("unknown target {0:?}")]
    UnknownTarget(char),

    /// Mnemonic does not name a command of the target's family.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    /// Subcommand is neither select nor interface.
    #[error("unknown subcommand {0:?}")]
    UnknownSubcommand(String),

    /// A data-begin delimiter without its data-end delimiter.
    #[error("unterminated data in {section} section")]
    UnterminatedData { section: &'static str },

    /// A section that needs enclosed data has none.
    #[error("missing data in {section} section")]
    MissingData { section: &'static str },

    /// Handle or index of the wrong width.
    #[error("invalid handle width: expected {expected} hex digits, got {actual}")]
    InvalidHandleWidth { expected: usize, actual: usize },

    /// Handle, index or payload is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] FromHexError),

    /// Interface directive value too short to name a bus.
    #[error("invalid interface {0:?}")]
    InvalidInterface(String),

    /// Payload longer than the configured maximum.
    #[error("payload too large: max {max} hex characters, got {actual}")]
    PayloadTooLarge { max: usize, actual: usize },
}

/// Errors returned by the interpreter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpreterError {
    /// The message could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The interpreter was built without a handler.
    #[error("no command handler installed")]
    MissingHandler,

    /// Configuration rejected at build time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl InterpreterError {
    /// Wire status reported for this error.
    pub fn status(&self) -> KitStatus {
        match self {
            InterpreterError::Parse(_) => KitStatus::CommandNotValid,
            InterpreterError::MissingHandler | InterpreterError::InvalidConfig(_) => {
                KitStatus::InvalidParam
            }
        }
    }
}

/// Result type for interpreter operations.
pub type InterpreterResult<T> = Result<T, InterpreterError>;

/// Errors from the host-side message codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Buffered bytes exceed the maximum without a terminator.
    #[error("buffer overflow: max {max} bytes, got {actual}")]
    BufferOverflow { max: usize, actual: usize },
}
