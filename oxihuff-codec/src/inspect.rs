//! Stream inspection without decoding the payload.

use crate::constants::{HUFF_TREE, PSEUDO_EOF};
use crate::header::{read_header, read_magic};
use oxihuff_core::{BitReader, Result};
use std::io::Cursor;

/// Code length of one symbol in a stream's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolCode {
    /// Symbol value (256 is the end marker).
    pub symbol: u16,
    /// Code length in bits.
    pub length: usize,
}

/// What the header of a compressed stream says.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreamInfo {
    /// Magic number (always `HUFF_TREE` for a parsed stream).
    pub magic: u32,
    /// Size of the tree header in bits.
    pub header_bits: u64,
    /// Size of the whole compressed stream in bytes.
    pub compressed_bytes: u64,
    /// Number of tree leaves, end marker included.
    pub leaf_count: usize,
    /// Length of the longest code.
    pub max_code_length: usize,
    /// Code length of every symbol in the tree, ascending by symbol.
    pub codes: Vec<SymbolCode>,
}

impl StreamInfo {
    /// Payload bits available after the header, padding included.
    pub fn payload_capacity_bits(&self) -> u64 {
        (self.compressed_bytes * 8).saturating_sub(32 + self.header_bits)
    }

    /// Number of literal byte values the stream can contain.
    pub fn literal_count(&self) -> usize {
        self.codes.iter().filter(|c| c.symbol != PSEUDO_EOF).count()
    }
}

/// Parse the magic number and tree header of a compressed buffer.
///
/// # Errors
///
/// `BadMagicNumber` or `MalformedHeader`, exactly as decompression would
/// report them.
pub fn inspect(data: &[u8]) -> Result<StreamInfo> {
    let mut reader = BitReader::new(Cursor::new(data));
    read_magic(&mut reader)?;

    let header_start = reader.bits_read();
    let tree = read_header(&mut reader)?;
    let header_bits = reader.bits_read() - header_start;

    let codes = tree
        .code_lengths()
        .into_iter()
        .map(|(symbol, length)| SymbolCode { symbol, length })
        .collect();

    Ok(StreamInfo {
        magic: HUFF_TREE,
        header_bits,
        compressed_bytes: data.len() as u64,
        leaf_count: tree.leaf_count(),
        max_code_length: tree.depth(),
        codes,
    })
}
