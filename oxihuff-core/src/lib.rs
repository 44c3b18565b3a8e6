//! # OxiHuff Core
//!
//! Core components for the OxiHuff compression library.
//!
//! This crate provides the building blocks the Huffman codec is written
//! against:
//!
//! - [`bitstream`]: MSB-first bit-level I/O (`BitReader`, `BitWriter`)
//! - [`traits`]: `BitSource`, `BitSink` and `Rewind` stream traits
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxihuff compress / decompress / test / info         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec                                                   │
//! │     counting, tree building, header, encode/decode      │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     BitReader/BitWriter, stream traits, errors          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::BitReader;
//! use std::io::Cursor;
//!
//! let data = vec![0xAB, 0xCD];
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(12).unwrap(), Some(0xABC));
//! assert_eq!(reader.read_bits(8).unwrap(), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};
pub use traits::{BitSink, BitSource, Rewind};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiHuffError, Result};
    pub use crate::traits::{BitSink, BitSource, Rewind};
}
