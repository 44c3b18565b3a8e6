//! Symbol frequency counting (first compression pass).

use crate::constants::{BITS_PER_WORD, PSEUDO_EOF, SYMBOL_COUNT};
use oxihuff_core::{BitSource, Result};

/// Occurrence counts for every symbol, end marker included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Create a table with every count at zero except the end marker,
    /// which is always 1.
    pub fn new() -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        counts[PSEUDO_EOF as usize] = 1;
        Self { counts }
    }

    /// Count the bytes of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Count 8-bit values from `source` until it is exhausted.
    ///
    /// The source is left at its end; the caller rewinds it before
    /// the encoding pass. A trailing partial byte is ignored.
    pub fn count<S: BitSource + ?Sized>(source: &mut S) -> Result<Self> {
        let mut table = Self::new();
        while let Some(value) = source.read_bits(BITS_PER_WORD)? {
            table.counts[value as usize] += 1;
        }
        table.counts[PSEUDO_EOF as usize] = 1;

        log::debug!(
            "counted {} bytes, {} distinct",
            table.input_len(),
            table.distinct_bytes()
        );
        Ok(table)
    }

    /// Count of `symbol` (0 for symbols outside the alphabet).
    pub fn get(&self, symbol: u16) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// Raw counts indexed by symbol.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Symbols with a non-zero count, ascending, with their counts.
    pub fn present(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u16, count))
    }

    /// Number of input bytes counted.
    pub fn input_len(&self) -> u64 {
        self.counts[..PSEUDO_EOF as usize].iter().sum()
    }

    /// Number of distinct byte values seen.
    pub fn distinct_bytes(&self) -> usize {
        self.counts[..PSEUDO_EOF as usize]
            .iter()
            .filter(|&&count| count > 0)
            .count()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxihuff_core::BitReader;
    use std::io::Cursor;

    #[test]
    fn test_count_from_stream() {
        let mut reader = BitReader::new(Cursor::new(b"aaab".to_vec()));
        let table = FrequencyTable::count(&mut reader).unwrap();

        assert_eq!(table.get(b'a' as u16), 3);
        assert_eq!(table.get(b'b' as u16), 1);
        assert_eq!(table.get(PSEUDO_EOF), 1);
        assert_eq!(table.input_len(), 4);
        assert_eq!(table.distinct_bytes(), 2);
        assert_eq!(table, FrequencyTable::from_bytes(b"aaab"));
    }

    #[test]
    fn test_empty_input_has_end_marker() {
        let mut reader = BitReader::new(Cursor::new(Vec::new()));
        let table = FrequencyTable::count(&mut reader).unwrap();

        let present: Vec<_> = table.present().collect();
        assert_eq!(present, vec![(PSEUDO_EOF, 1)]);
        assert_eq!(table.input_len(), 0);
    }

    #[test]
    fn test_end_marker_is_forced_not_incremented() {
        let table = FrequencyTable::from_bytes(&[0xFF; 10]);
        assert_eq!(table.get(PSEUDO_EOF), 1);
        assert_eq!(table.get(0xFF), 10);
        assert_eq!(table.get(999), 0);
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        let table = FrequencyTable::from_bytes(&data);
        assert_eq!(table.distinct_bytes(), 256);
        assert_eq!(table.present().count(), 257);
    }
}
