//! Prefix codes derived from a Huffman tree.

use crate::constants::{MAX_CODE_LENGTH, SYMBOL_COUNT};
use crate::tree::{HuffNode, HuffmanTree};
use oxihuff_core::{BitSink, Result};
use std::fmt;

/// A variable-length code: `len` bits stored in the low end of `bits`,
/// first bit most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// The empty code.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Create a code from its bits and length.
    pub fn new(bits: u128, len: u8) -> Self {
        debug_assert!(len as usize <= MAX_CODE_LENGTH);
        let mask = if len as usize >= 128 {
            u128::MAX
        } else {
            (1u128 << len) - 1
        };
        Code {
            bits: bits & mask,
            len,
        }
    }

    /// The code with `bit` appended.
    #[inline]
    pub fn push(self, bit: bool) -> Self {
        Code {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        }
    }

    /// Code bits, right-aligned.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `self` is a prefix of `other` (every code is a prefix of
    /// itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && other
                .bits
                .checked_shr((other.len - self.len) as u32)
                .unwrap_or(0)
                == self.bits
    }

    /// Write the code to `sink`, first bit first, in chunks of up to
    /// 32 bits.
    #[inline]
    pub fn write_to<K: BitSink + ?Sized>(&self, sink: &mut K) -> Result<()> {
        let mut remaining = self.len;
        while remaining > 0 {
            let chunk = remaining.min(32);
            remaining -= chunk;
            let value = ((self.bits >> remaining) as u32) & mask32(chunk);
            sink.write_bits(value, chunk)?;
        }
        Ok(())
    }
}

#[inline]
fn mask32(count: u8) -> u32 {
    if count >= 32 {
        u32::MAX
    } else {
        (1u32 << count) - 1
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code of every symbol present in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Derive codes by walking the tree: left appends `0`, right appends `1`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        Self::walk(tree.root(), Code::EMPTY, &mut codes);

        let table = Self { codes };
        if log::log_enabled!(log::Level::Trace) {
            for (symbol, code) in table.iter() {
                log::trace!("code {symbol:>3}: {code}");
            }
        }
        table
    }

    fn walk(node: &HuffNode, code: Code, codes: &mut [Option<Code>]) {
        match node {
            HuffNode::Leaf { symbol, .. } => {
                if let Some(slot) = codes.get_mut(*symbol as usize) {
                    *slot = Some(code);
                }
            }
            HuffNode::Internal { left, right, .. } => {
                Self::walk(left, code.push(false), codes);
                Self::walk(right, code.push(true), codes);
            }
        }
    }

    /// Code of `symbol`, `None` if it is not in the tree.
    #[inline]
    pub fn get(&self, symbol: u16) -> Option<&Code> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    /// Present symbols with their codes, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u16, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total payload bits for the given per-symbol counts.
    pub fn encoded_bits(&self, counts: &[u64]) -> u64 {
        self.iter()
            .map(|(symbol, code)| {
                counts.get(symbol as usize).copied().unwrap_or(0) * code.len() as u64
            })
            .sum()
    }
}
