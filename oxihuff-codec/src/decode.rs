//! Huffman decoder (decompression).

use crate::constants::{BITS_PER_WORD, PSEUDO_EOF};
use crate::header::{read_header, read_magic};
use crate::stats::DecompressionStats;
use crate::tree::HuffNode;
use oxihuff_core::{BitSink, BitSource, OxiHuffError, Result};

/// Huffman decoder.
///
/// The decoder carries no tree of its own; every stream brings its tree
/// in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffmanDecoder {
    /// Upper bound on decoded bytes, `None` for unlimited.
    max_output: Option<u64>,
}

impl HuffmanDecoder {
    /// Create a decoder without an output limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `OutputLimitExceeded` instead of producing more than
    /// `limit` bytes.
    pub fn with_max_output(mut self, limit: u64) -> Self {
        self.max_output = Some(limit);
        self
    }

    /// The configured output limit.
    pub fn max_output(&self) -> Option<u64> {
        self.max_output
    }

    /// Decode one compressed stream from `source` into `sink`.
    ///
    /// The magic number is checked before anything is written. After the
    /// header, bits are consumed one at a time, walking from the root
    /// (`0` left, `1` right); each literal leaf emits its byte and restarts
    /// the walk, the end-marker leaf ends decoding. The sink is closed on
    /// success only.
    ///
    /// # Errors
    ///
    /// - `BadMagicNumber` if the stream does not start with the magic number
    /// - `MalformedHeader` if the tree header is cut short or invalid
    /// - `TruncatedStream` if the input ends before the end marker
    /// - `OutputLimitExceeded` if the output limit would be passed
    pub fn decode<S, K>(&self, source: &mut S, sink: &mut K) -> Result<DecompressionStats>
    where
        S: BitSource + ?Sized,
        K: BitSink + ?Sized,
    {
        let start = source.bits_read();
        read_magic(source)?;

        let header_start = source.bits_read();
        let tree = read_header(source)?;
        let header_bits = source.bits_read() - header_start;

        let root = tree.root();
        let mut node = root;
        let mut produced = 0u64;

        loop {
            let position = source.bits_read();
            let bit = source
                .read_bit()?
                .ok_or_else(|| OxiHuffError::truncated(position, produced))?;

            node = node.child(bit).ok_or_else(|| {
                OxiHuffError::malformed_header(position, "decoder walked past a leaf")
            })?;

            if let HuffNode::Leaf { symbol, .. } = node {
                if *symbol == PSEUDO_EOF {
                    break;
                }
                if let Some(limit) = self.max_output {
                    if produced >= limit {
                        return Err(OxiHuffError::output_limit(limit));
                    }
                }
                sink.write_bits(*symbol as u32, BITS_PER_WORD)?;
                produced += 1;
                node = root;
            }
        }

        sink.close()?;

        let stats = DecompressionStats {
            input_bits: source.bits_read() - start,
            header_bits,
            output_bytes: produced,
            leaf_count: tree.leaf_count(),
        };
        log::debug!(
            "decompressed {} bytes from {} bits ({} header bits)",
            stats.output_bytes,
            stats.input_bits,
            stats.header_bits
        );
        Ok(stats)
    }
}

/// Decode one compressed stream from `source` into `sink` with default
/// settings.
pub fn decompress_stream<S, K>(source: &mut S, sink: &mut K) -> Result<DecompressionStats>
where
    S: BitSource + ?Sized,
    K: BitSink + ?Sized,
{
    HuffmanDecoder::new().decode(source, sink)
}
