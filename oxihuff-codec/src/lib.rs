//! # OxiHuff Codec
//!
//! Pure Rust Huffman compression with the code tree embedded in the output.
//!
//! Compression makes two passes over its input. The first pass counts every
//! byte value, builds a Huffman tree from the counts (plus an end-of-stream
//! marker that is always present) and derives a prefix code for each symbol.
//! The second pass writes the stream:
//!
//! | Field   | Width    | Value                                          |
//! |---------|----------|------------------------------------------------|
//! | Magic   | 32 bits  | `0xFACE8201`                                   |
//! | Header  | variable | pre-order tree: `0` internal, `1` + 9-bit leaf |
//! | Payload | variable | one code per input byte, then the end marker   |
//!
//! All fields are MSB-first and the last byte is zero-padded. Neither the
//! header nor the payload carries a length; both end by structure.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Streams
//!
//! Anything implementing the `oxihuff_core` bit traits can be used directly;
//! compression needs a rewindable source for its second pass.
//!
//! ```rust
//! use oxihuff_codec::{compress_stream, decompress_stream};
//! use oxihuff_core::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut source = BitReader::new(Cursor::new(b"hello, hello".to_vec()));
//! let mut sink = BitWriter::new(Vec::new());
//! let stats = compress_stream(&mut source, &mut sink).unwrap();
//! assert_eq!(stats.input_bytes, 12);
//!
//! let compressed = sink.into_inner().unwrap();
//! let mut output = BitWriter::new(Vec::new());
//! decompress_stream(&mut BitReader::new(Cursor::new(compressed)), &mut output).unwrap();
//! assert_eq!(output.into_inner().unwrap(), b"hello, hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod constants;
pub mod decode;
pub mod encode;
pub mod freq;
pub mod header;
pub mod inspect;
pub mod stats;
pub mod tree;

// Re-exports
pub use code::{Code, CodeTable};
pub use constants::{HUFF_NUMBER, HUFF_TREE, PSEUDO_EOF};
pub use decode::{HuffmanDecoder, decompress_stream};
pub use encode::{HuffmanEncoder, compress_stream};
pub use freq::FrequencyTable;
pub use inspect::{StreamInfo, SymbolCode, inspect};
pub use oxihuff_core::{OxiHuffError, Result};
pub use stats::{CompressionStats, DecompressionStats};
pub use tree::{HuffNode, HuffmanTree};

use oxihuff_core::{BitReader, BitWriter};
use std::io::Cursor;

/// Compress a byte buffer.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{compress, HUFF_TREE};
///
/// let compressed = compress(b"").unwrap();
/// assert_eq!(&compressed[..4], &HUFF_TREE.to_be_bytes());
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let encoder = HuffmanEncoder::for_bytes(data);
    let mut source = BitReader::new(Cursor::new(data));
    let mut sink = BitWriter::new(Vec::with_capacity(data.len() / 2 + 64));
    encoder.encode(&mut source, &mut sink)?;
    sink.into_inner()
}

/// Decompress a buffer produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode_with(HuffmanDecoder::new(), data)
}

/// Decompress, failing with `OutputLimitExceeded` rather than producing
/// more than `limit` bytes.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{compress, decompress_with_limit, OxiHuffError};
///
/// let compressed = compress(&[0u8; 1000]).unwrap();
/// let err = decompress_with_limit(&compressed, 100).unwrap_err();
/// assert!(matches!(err, OxiHuffError::OutputLimitExceeded { limit: 100 }));
/// ```
pub fn decompress_with_limit(data: &[u8], limit: u64) -> Result<Vec<u8>> {
    decode_with(HuffmanDecoder::new().with_max_output(limit), data)
}

fn decode_with(decoder: HuffmanDecoder, data: &[u8]) -> Result<Vec<u8>> {
    let mut source = BitReader::new(Cursor::new(data));
    let mut sink = BitWriter::new(Vec::with_capacity(data.len() * 2));
    decoder.decode(&mut source, &mut sink)?;
    sink.into_inner()
}

/// Whether `data` starts with the OxiHuff magic number.
pub fn is_huffman_stream(data: &[u8]) -> bool {
    header::has_magic(data)
}
