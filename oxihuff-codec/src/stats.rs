//! Bit accounting for compress and decompress runs.

/// Figures from one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompressionStats {
    /// Bytes read in the encoding pass.
    pub input_bytes: u64,
    /// Bits of the tree header.
    pub header_bits: u64,
    /// Bits of encoded symbols, end marker included.
    pub payload_bits: u64,
    /// Bits written in total, magic number included, padding excluded.
    pub output_bits: u64,
    /// Number of leaves in the tree.
    pub leaf_count: usize,
    /// Length of the longest code.
    pub max_code_length: usize,
}

impl CompressionStats {
    /// Output size in bytes after padding.
    pub fn output_bytes(&self) -> u64 {
        self.output_bits.div_ceil(8)
    }

    /// Compressed size relative to the input (`None` for empty input).
    pub fn ratio(&self) -> Option<f64> {
        (self.input_bytes > 0).then(|| self.output_bytes() as f64 / self.input_bytes as f64)
    }

    /// Average payload bits per input byte (`None` for empty input).
    pub fn bits_per_byte(&self) -> Option<f64> {
        (self.input_bytes > 0).then(|| self.payload_bits as f64 / self.input_bytes as f64)
    }
}

/// Figures from one decompression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecompressionStats {
    /// Bits consumed, magic number included, padding excluded.
    pub input_bits: u64,
    /// Bits of the tree header.
    pub header_bits: u64,
    /// Bytes produced.
    pub output_bytes: u64,
    /// Number of leaves in the tree.
    pub leaf_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let stats = CompressionStats {
            input_bytes: 100,
            output_bits: 401,
            payload_bits: 300,
            ..Default::default()
        };
        assert_eq!(stats.output_bytes(), 51);
        assert_eq!(stats.ratio(), Some(0.51));
        assert_eq!(stats.bits_per_byte(), Some(3.0));
    }

    #[test]
    fn test_empty_ratio() {
        let stats = CompressionStats::default();
        assert_eq!(stats.ratio(), None);
        assert_eq!(stats.bits_per_byte(), None);
    }
}
