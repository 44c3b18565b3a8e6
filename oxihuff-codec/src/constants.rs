//! Format constants.

/// Bits per input symbol (one byte).
pub const BITS_PER_WORD: u8 = 8;

/// Width of the magic number field.
pub const BITS_PER_INT: u8 = 32;

/// Number of literal symbols.
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;

/// End-of-stream marker symbol.
pub const PSEUDO_EOF: u16 = ALPH_SIZE as u16;

/// Number of distinct symbols, literals plus the end marker.
pub const SYMBOL_COUNT: usize = ALPH_SIZE + 1;

/// Width of a leaf's symbol field in the tree header.
pub const SYMBOL_BITS: u8 = BITS_PER_WORD + 1;

/// Family number shared by every OxiHuff stream format.
pub const HUFF_NUMBER: u32 = 0xFACE_8200;

/// Magic number of streams carrying a pre-order tree header.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// Longest code (deepest leaf) accepted from a tree header.
///
/// A tree built from 64-bit counts is never deeper than about 90 levels.
pub const MAX_CODE_LENGTH: usize = 128;
