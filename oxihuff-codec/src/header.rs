//! Tree header serialization.
//!
//! The tree is stored pre-order: an internal node is a `0` bit followed by
//! its left and right subtrees, a leaf is a `1` bit followed by its 9-bit
//! symbol. The encoding is self-delimiting, so no length field is needed.
//!
//! ```text
//!   root                 0
//!   ├── internal         0
//!   │   ├── 'b'          1 001100010
//!   │   └── EOF          1 100000000
//!   └── 'a'              1 001100001
//! ```

use crate::constants::{
    BITS_PER_INT, HUFF_TREE, MAX_CODE_LENGTH, PSEUDO_EOF, SYMBOL_BITS, SYMBOL_COUNT,
};
use crate::tree::{HuffNode, HuffmanTree};
use oxihuff_core::{BitSink, BitSource, OxiHuffError, Result};

/// Write the 32-bit format magic number.
pub fn write_magic<K: BitSink + ?Sized>(sink: &mut K) -> Result<()> {
    sink.write_bits(HUFF_TREE, BITS_PER_INT)
}

/// Read the 32-bit magic number and check it against [`HUFF_TREE`].
pub fn read_magic<S: BitSource + ?Sized>(source: &mut S) -> Result<()> {
    match source.read_bits(BITS_PER_INT)? {
        Some(HUFF_TREE) => Ok(()),
        found => Err(OxiHuffError::bad_magic(HUFF_TREE, found)),
    }
}

/// Whether `data` starts with the format magic number.
pub fn has_magic(data: &[u8]) -> bool {
    data.get(..4)
        .is_some_and(|magic| magic == HUFF_TREE.to_be_bytes().as_slice())
}

/// Write the tree header. Returns the number of bits written.
pub fn write_header<K: BitSink + ?Sized>(tree: &HuffmanTree, sink: &mut K) -> Result<u64> {
    let start = sink.bits_written();
    write_node(tree.root(), sink)?;
    Ok(sink.bits_written() - start)
}

fn write_node<K: BitSink + ?Sized>(node: &HuffNode, sink: &mut K) -> Result<()> {
    match node {
        HuffNode::Internal { left, right, .. } => {
            sink.write_bit(false)?;
            write_node(left, sink)?;
            write_node(right, sink)
        }
        HuffNode::Leaf { symbol, .. } => {
            sink.write_bit(true)?;
            sink.write_bits(*symbol as u32, SYMBOL_BITS)
        }
    }
}

/// Size of the header for `tree`, in bits.
pub fn header_bits(tree: &HuffmanTree) -> u64 {
    let leaves = tree.leaf_count() as u64;
    // A full binary tree has one internal node fewer than it has leaves.
    (leaves - 1) + leaves * (1 + SYMBOL_BITS as u64)
}

/// Read a tree header.
///
/// Fails with `MalformedHeader` if the stream ends inside the header, or if
/// the tree is not one an encoder could have written: a leaf at the root, a
/// symbol above the end marker, a repeated symbol, a path longer than
/// `MAX_CODE_LENGTH`, or no end marker at all.
pub fn read_header<S: BitSource + ?Sized>(source: &mut S) -> Result<HuffmanTree> {
    let mut seen = [false; SYMBOL_COUNT];
    let start = source.bits_read();
    let root = read_node(source, 0, &mut seen)?;

    if !seen[PSEUDO_EOF as usize] {
        return Err(OxiHuffError::malformed_header(
            source.bits_read(),
            "tree has no end-of-stream leaf",
        ));
    }

    let tree = HuffmanTree::from_root(root).ok_or_else(|| {
        OxiHuffError::malformed_header(start, "root of the tree is a leaf")
    })?;

    log::debug!(
        "read tree header: {} bits, {} leaves",
        source.bits_read() - start,
        tree.leaf_count()
    );
    Ok(tree)
}

fn read_node<S: BitSource + ?Sized>(
    source: &mut S,
    depth: usize,
    seen: &mut [bool; SYMBOL_COUNT],
) -> Result<HuffNode> {
    let position = source.bits_read();
    let is_leaf = source
        .read_bit()?
        .ok_or_else(|| OxiHuffError::malformed_header(position, "stream ended inside tree"))?;

    if !is_leaf {
        if depth >= MAX_CODE_LENGTH {
            return Err(OxiHuffError::malformed_header(
                position,
                format!("tree deeper than {MAX_CODE_LENGTH} levels"),
            ));
        }
        let left = read_node(source, depth + 1, seen)?;
        let right = read_node(source, depth + 1, seen)?;
        return Ok(HuffNode::merge(left, right));
    }

    let symbol = source.read_bits(SYMBOL_BITS)?.ok_or_else(|| {
        OxiHuffError::malformed_header(source.bits_read(), "stream ended inside leaf symbol")
    })? as u16;

    if symbol > PSEUDO_EOF {
        return Err(OxiHuffError::malformed_header(
            position,
            format!("leaf symbol {symbol} out of range"),
        ));
    }
    if std::mem::replace(&mut seen[symbol as usize], true) {
        return Err(OxiHuffError::malformed_header(
            position,
            format!("duplicate leaf symbol {symbol}"),
        ));
    }

    Ok(HuffNode::leaf(symbol, 0))
}
