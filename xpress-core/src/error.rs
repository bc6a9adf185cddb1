//! Error types for xpress decoding.
//!
//! Every decoder in the workspace reports failures through [`XpressError`].
//! Errors are surfaced on first detection; a failed decode never returns the
//! partial output it had produced.

use thiserror::Error;

/// The main error type for xpress operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XpressError {
    /// A read ran past the end of the input buffer.
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Byte offset of the failed read.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the input.
        available: usize,
    },

    /// Structurally malformed header or length field.
    #[error("Invalid format at offset {offset}: {message}")]
    InvalidFormat {
        /// Byte offset where the problem was detected.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// The code-length table assigns more leaves than the decoding table holds.
    #[error("Invalid Huffman table: symbol {symbol} overflows the decoding table")]
    InvalidHuffmanTable {
        /// Symbol whose slots did not fit.
        symbol: u16,
    },

    /// The code-length table does not fill the whole decoding table.
    #[error("Huffman table underflow: {filled} of {expected} entries filled")]
    HuffmanTableUnderflow {
        /// Number of entries filled.
        filled: usize,
        /// Number of entries in a complete table.
        expected: usize,
    },

    /// Back-reference reaches before the start of the output.
    #[error("Invalid back-reference distance: {distance} exceeds history size {history_size}")]
    InvalidDistance {
        /// The requested distance.
        distance: usize,
        /// Bytes of output available at that point.
        history_size: usize,
    },

    /// A compressed LZNT1 chunk was encountered.
    #[error("Compressed block at offset {offset} is not supported")]
    UnsupportedCompressedBlock {
        /// Byte offset of the chunk header.
        offset: usize,
    },

    /// Decoded output would grow past the configured ceiling.
    #[error("Output limit exceeded: limit is {limit} bytes")]
    OutputLimitExceeded {
        /// The configured ceiling.
        limit: usize,
    },

    /// Unknown compression format identifier.
    #[error("Unknown compression format: {id}")]
    UnknownFormat {
        /// The identifier that was given.
        id: u16,
    },
}

/// Result type alias for xpress operations.
pub type Result<T> = std::result::Result<T, XpressError>;

impl XpressError {
    /// Create a truncated input error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available,
        }
    }

    /// Create an invalid format error.
    pub fn invalid_format(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid Huffman table error.
    pub fn invalid_huffman_table(symbol: u16) -> Self {
        Self::InvalidHuffmanTable { symbol }
    }

    /// Create a Huffman table underflow error.
    pub fn huffman_underflow(filled: usize, expected: usize) -> Self {
        Self::HuffmanTableUnderflow { filled, expected }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, history_size: usize) -> Self {
        Self::InvalidDistance {
            distance,
            history_size,
        }
    }

    /// Create an unsupported compressed block error.
    pub fn unsupported_block(offset: usize) -> Self {
        Self::UnsupportedCompressedBlock { offset }
    }

    /// Create an output limit error.
    pub fn output_limit(limit: usize) -> Self {
        Self::OutputLimitExceeded { limit }
    }

    /// Create an unknown format error.
    pub fn unknown_format(id: u16) -> Self {
        Self::UnknownFormat { id }
    }

    /// Check whether this error reports a read past the end of input.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
