//! Huffman encoder (compression).

use crate::code::CodeTable;
use crate::constants::{BITS_PER_WORD, PSEUDO_EOF};
use crate::freq::FrequencyTable;
use crate::header::{write_header, write_magic};
use crate::stats::CompressionStats;
use crate::tree::HuffmanTree;
use oxihuff_core::{BitSink, BitSource, OxiHuffError, Result, Rewind};
use std::io;

/// Huffman encoder holding the tree and codes for one input.
///
/// Compression is two passes over the same input: [`HuffmanEncoder::scan`]
/// counts symbols and builds the tree, then [`HuffmanEncoder::encode`]
/// rewinds the input and writes the compressed stream.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    /// Counts from the first pass.
    freqs: FrequencyTable,
    /// Tree built from `freqs`.
    tree: HuffmanTree,
    /// Codes derived from `tree`.
    codes: CodeTable,
}

impl HuffmanEncoder {
    /// Create an encoder for the given symbol counts.
    pub fn new(freqs: FrequencyTable) -> Self {
        let tree = HuffmanTree::from_frequencies(&freqs);
        let codes = CodeTable::from_tree(&tree);
        Self { freqs, tree, codes }
    }

    /// Run the counting pass over `source`, leaving it exhausted.
    pub fn scan<S: BitSource + ?Sized>(source: &mut S) -> Result<Self> {
        let freqs = FrequencyTable::count(source)?;
        Ok(Self::new(freqs))
    }

    /// Create an encoder for an in-memory buffer.
    pub fn for_bytes(data: &[u8]) -> Self {
        Self::new(FrequencyTable::from_bytes(data))
    }

    /// Counts the tree was built from.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freqs
    }

    /// The Huffman tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The code table.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Write the compressed stream.
    ///
    /// # Format
    ///
    /// 1. 32-bit magic number
    /// 2. Pre-order tree header
    /// 3. Code of every input byte, in order
    /// 4. Code of the end marker
    ///
    /// `source` is rewound first and must yield the same bytes as the
    /// counting pass. The sink is closed (zero-padded to a byte boundary)
    /// when done.
    pub fn encode<S, K>(&self, source: &mut S, sink: &mut K) -> Result<CompressionStats>
    where
        S: Rewind + ?Sized,
        K: BitSink + ?Sized,
    {
        source.reset()?;
        let start = sink.bits_written();

        write_magic(sink)?;
        let header_bits = write_header(&self.tree, sink)?;
        debug_assert_eq!(header_bits, crate::header::header_bits(&self.tree));
        let payload_start = sink.bits_written();

        let mut input_bytes = 0u64;
        while let Some(value) = source.read_bits(BITS_PER_WORD)? {
            let code = self.codes.get(value as u16).ok_or_else(|| {
                OxiHuffError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("input changed between passes: byte {value:#04x} was not counted"),
                ))
            })?;
            code.write_to(sink)?;
            input_bytes += 1;
        }

        if input_bytes != self.freqs.input_len() {
            return Err(OxiHuffError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "input changed between passes: counted {} bytes, encoded {input_bytes}",
                    self.freqs.input_len()
                ),
            )));
        }

        if let Some(eof) = self.codes.get(PSEUDO_EOF) {
            eof.write_to(sink)?;
        }
        let payload_bits = sink.bits_written() - payload_start;
        let output_bits = sink.bits_written() - start;
        sink.close()?;

        let stats = CompressionStats {
            input_bytes,
            header_bits,
            payload_bits,
            output_bits,
            leaf_count: self.tree.leaf_count(),
            max_code_length: self.tree.depth(),
        };
        log::debug!(
            "compressed {} bytes into {} bytes ({} header bits, {} payload bits)",
            stats.input_bytes,
            stats.output_bytes(),
            stats.header_bits,
            stats.payload_bits
        );
        Ok(stats)
    }
}

/// Compress everything in `source` into `sink` (both passes).
pub fn compress_stream<S, K>(source: &mut S, sink: &mut K) -> Result<CompressionStats>
where
    S: Rewind + ?Sized,
    K: BitSink + ?Sized,
{
    source.reset()?;
    let encoder = HuffmanEncoder::scan(source)?;
    encoder.encode(source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HUFF_TREE;
    use oxihuff_core::{BitReader, BitWriter};
    use std::io::Cursor;

    fn compress_bytes(data: &[u8]) -> (Vec<u8>, CompressionStats) {
        let mut reader = BitReader::new(Cursor::new(data));
        let mut writer = BitWriter::new(Vec::new());
        let stats = compress_stream(&mut reader, &mut writer).unwrap();
        (writer.into_inner().unwrap(), stats)
    }

    #[test]
    fn test_aaab_exact_bytes() {
        let (output, stats) = compress_bytes(b"aaab");

        // magic | 0 0 1[b] 1[EOF] 1[a] | 1 1 1 00 01 | pad
        assert_eq!(
            output,
            vec![0xFA, 0xCE, 0x82, 0x01, 0x26, 0x2C, 0x02, 0x61, 0xE2]
        );
        assert_eq!(stats.input_bytes, 4);
        assert_eq!(stats.header_bits, 32);
        assert_eq!(stats.payload_bits, 7);
        assert_eq!(stats.output_bits, 71);
        assert_eq!(stats.output_bytes(), 9);
        assert_eq!(stats.leaf_count, 3);
    }

    #[test]
    fn test_empty_input_exact_bytes() {
        let (output, stats) = compress_bytes(b"");

        // magic | 0 1[0] 1[EOF] | 1 | pad
        assert_eq!(output, vec![0xFA, 0xCE, 0x82, 0x01, 0x40, 0x18, 0x04]);
        assert_eq!(stats.input_bytes, 0);
        assert_eq!(stats.payload_bits, 1);
    }

    #[test]
    fn test_output_starts_with_magic() {
        let (output, _) = compress_bytes(b"some text to compress");
        assert_eq!(&output[..4], &HUFF_TREE.to_be_bytes());
    }

    #[test]
    fn test_payload_matches_code_table() {
        let data = b"mississippi river";
        let encoder = HuffmanEncoder::for_bytes(data);
        let (_, stats) = compress_bytes(data);

        let expected = encoder
            .codes()
            .encoded_bits(encoder.frequencies().as_slice());
        assert_eq!(stats.payload_bits, expected);
    }

    #[test]
    fn test_changed_input_rejected() {
        let encoder = HuffmanEncoder::for_bytes(b"aaaa");
        let mut reader = BitReader::new(Cursor::new(b"aaab".to_vec()));
        let mut writer = BitWriter::new(Vec::new());

        let result = encoder.encode(&mut reader, &mut writer);
        assert!(matches!(result, Err(OxiHuffError::Io(_))));
    }

    #[test]
    fn test_encoder_reusable_for_same_input() {
        let data = b"repeatable";
        let encoder = HuffmanEncoder::for_bytes(data);

        let mut first = BitWriter::new(Vec::new());
        let mut second = BitWriter::new(Vec::new());
        let mut reader = BitReader::new(Cursor::new(data));
        encoder.encode(&mut reader, &mut first).unwrap();
        encoder.encode(&mut reader, &mut second).unwrap();

        assert_eq!(first.into_inner().unwrap(), second.into_inner().unwrap());
    }
}
