//! Error types for OxiHuff operations.
//!
//! Every failure a compress or decompress invocation can hit is a variant of
//! [`OxiHuffError`]. All of them are fatal for the invocation that raised
//! them; partially written output should be discarded by the caller.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream does not start with the expected 32-bit magic number.
    #[error(
        "Bad magic number: expected {expected:#010x}, found {}",
        .found.map_or_else(|| "end of stream".to_string(), |m| format!("{m:#010x}"))
    )]
    BadMagicNumber {
        /// The magic number this codec writes.
        expected: u32,
        /// What was read instead, `None` if the stream held fewer than 32 bits.
        found: Option<u32>,
    },

    /// The serialized tree header is incomplete or structurally invalid.
    #[error("Malformed header at bit position {bit_position}: {message}")]
    MalformedHeader {
        /// Bit position where the problem was detected.
        bit_position: u64,
        /// Description of the header error.
        message: String,
    },

    /// The payload ended before the end-of-stream marker was decoded.
    #[error(
        "Truncated stream at bit position {bit_position}: no end-of-stream marker after {decoded} decoded bytes"
    )]
    TruncatedStream {
        /// Bit position where the input ran out.
        bit_position: u64,
        /// Number of bytes successfully decoded before truncation.
        decoded: u64,
    },

    /// Decoding would produce more output than the configured limit.
    #[error("Output limit exceeded: decoded data is larger than {limit} bytes")]
    OutputLimitExceeded {
        /// Maximum number of output bytes allowed.
        limit: u64,
    },

    /// A bit-level read or write asked for more bits than fit in one call.
    #[error("Invalid bit count: {count} (must be 0-32)")]
    InvalidBitCount {
        /// The requested bit count.
        count: u8,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create a bad magic number error.
    pub fn bad_magic(expected: u32, found: Option<u32>) -> Self {
        Self::BadMagicNumber { expected, found }
    }

    /// Create a malformed header error.
    pub fn malformed_header(bit_position: u64, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            bit_position,
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64, decoded: u64) -> Self {
        Self::TruncatedStream {
            bit_position,
            decoded,
        }
    }

    /// Create an output limit error.
    pub fn output_limit(limit: u64) -> Self {
        Self::OutputLimitExceeded { limit }
    }

    /// Create an invalid bit count error.
    pub fn invalid_bit_count(count: u8) -> Self {
        Self::InvalidBitCount { count }
    }

    /// Whether this error reports corrupt or foreign input rather than an
    /// environment failure.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::BadMagicNumber { .. } | Self::MalformedHeader { .. } | Self::TruncatedStream { .. }
        )
    }
}
