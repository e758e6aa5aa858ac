//! Error types shared by the whole crate.

use thiserror::Error;

/// Error variants for tree construction, serialization and decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument is unusable (unknown symbol, bad bit character).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The alphabet or a frequency exceeds what the tree can represent.
    #[error("input too large: {0}")]
    InputTooLarge(String),

    /// A serialized tree description could not be parsed.
    #[error("malformed tree description at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The bit source ran dry before the end-of-stream symbol was decoded.
    #[error("bit stream ended after {decoded} symbols without reaching end-of-stream symbol {eof}")]
    TruncatedStream {
        /// Number of symbols emitted before the input ran out.
        decoded: usize,
        /// The end-of-stream symbol that was expected.
        eof: u32,
    },

    /// A tree breaks a node invariant (one-child node, unlabelled leaf, duplicate symbol).
    #[error("structural violation: {0}")]
    StructuralViolation(String),

    /// A symbol does not fit the alphabet it is used with.
    #[error("symbol {symbol} is outside the alphabet of size {alphabet_size}")]
    SymbolOutOfRange {
        /// The offending symbol.
        symbol: u32,
        /// Size of the alphabet in use.
        alphabet_size: usize,
    },

    /// An I/O error occurred while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Creates an [`Error::MalformedInput`] for the given 1-based line.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::StructuralViolation`].
    pub fn structural(msg: impl Into<String>) -> Self {
        Error::StructuralViolation(msg.into())
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
