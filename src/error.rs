//! Error type shared by the codec and the file tools.
//!
//! Nothing in the codec retries: the transformation is deterministic, so any of these
//! errors will come back the same way on a second attempt.

use thiserror::Error;

/// Everything that can go wrong while compressing or decompressing.
#[derive(Error, Debug)]
pub enum HuffError {
    /// A tree was requested for a frequency table with no symbols in it.
    #[error("cannot build a Huffman tree from an empty frequency table")]
    EmptyFrequencyTable,

    /// The frequency distribution would need a code longer than we can hold.
    #[error("code for symbol {symbol:#04x} needs {depth} bits (max {max})")]
    CodeTooLong { symbol: u8, depth: usize, max: usize },

    /// Encoding hit a symbol the code table does not know about.
    #[error("symbol {0:#04x} is not in the code table")]
    MissingSymbol(u8),

    /// The container is structurally broken (too short, bad padding header, ...).
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The accumulated bits grew past the longest known code without a match.
    #[error("unknown code {code:#b} ({len} bits) at bit {position}")]
    UnknownCode { code: u64, len: u8, position: usize },

    /// The bitstream ended in the middle of a code.
    #[error("bitstream ended with {len} undecoded bits")]
    UndecodableTail { len: u8 },

    /// The archive header could not be read.
    #[error("bad archive: {0}")]
    BadArchive(String),

    /// Decoding produced a different number of symbols than the archive recorded.
    #[error("expected {expected} bytes, decoded {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// Decompressed text was requested but the bytes are not UTF-8.
    #[error("decoded data is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// I/O from the file tools, passed through untouched.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate wide result alias.
pub type Result<T> = std::result::Result<T, HuffError>;
