//! Huffman tree construction.
//!
//! The tree is built bottom-up from a [`FrequencyTable`] with a min-heap
//! and is immutable afterwards. Each internal node owns its two children.
//!
//! # Tie-breaking
//!
//! Nodes are ordered by `(weight, sequence)`. Leaves receive sequence
//! numbers in ascending symbol order (end marker last), and every merged
//! node takes the next free number. Of the two nodes extracted for a merge,
//! the first becomes the left (`0`) child. This makes the tree, and with it
//! the compressed bytes, fully determined by the input.

use crate::constants::{ALPH_SIZE, PSEUDO_EOF};
use crate::freq::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Symbol used for the zero-weight leaf that pairs with a lone end marker.
pub const FILLER_SYMBOL: u16 = 0;

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    /// A symbol with its weight (0 for trees read from a header).
    Leaf {
        /// Symbol value, 0-255 for bytes or `PSEUDO_EOF`.
        symbol: u16,
        /// Occurrence count.
        weight: u64,
    },
    /// An inner node with exactly two children.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Child reached by a `0` bit.
        left: Box<HuffNode>,
        /// Child reached by a `1` bit.
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    /// Create a leaf.
    pub fn leaf(symbol: u16, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Combine two subtrees; `left` ends up on the `0` side.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Weight of this node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// The leaf's symbol, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u16> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    ///
    /// Returns `None` on a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&HuffNode> {
        match self {
            HuffNode::Internal { left, right, .. } => Some(if bit { right } else { left }),
            HuffNode::Leaf { .. } => None,
        }
    }

    fn collect_leaves(&self, depth: usize, out: &mut Vec<(u16, usize)>) {
        match self {
            HuffNode::Leaf { symbol, .. } => out.push((*symbol, depth)),
            HuffNode::Internal { left, right, .. } => {
                left.collect_leaves(depth + 1, out);
                right.collect_leaves(depth + 1, out);
            }
        }
    }
}

/// Heap slot: min-ordered by `(weight, seq)`.
struct Pending {
    seq: u32,
    node: HuffNode,
}

impl Pending {
    fn key(&self) -> (u64, u32) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest key.
        other.key().cmp(&self.key())
    }
}

/// A complete Huffman tree whose root is always an internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// Every byte with a non-zero count becomes a leaf, and the end marker
    /// is always added with weight 1. If the end marker ends up alone
    /// (empty input), it is paired with a zero-weight leaf for
    /// [`FILLER_SYMBOL`] so that it still gets a one-bit code.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let mut heap = BinaryHeap::with_capacity(ALPH_SIZE + 1);
        let mut seq = 0u32;
        let mut push = |heap: &mut BinaryHeap<Pending>, node: HuffNode| {
            heap.push(Pending { seq, node });
            seq += 1;
        };

        for symbol in 0..PSEUDO_EOF {
            let count = freqs.get(symbol);
            if count > 0 {
                push(&mut heap, HuffNode::leaf(symbol, count));
            }
        }
        push(&mut heap, HuffNode::leaf(PSEUDO_EOF, 1));

        if heap.len() == 1 {
            push(&mut heap, HuffNode::leaf(FILLER_SYMBOL, 0));
        }

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            push(&mut heap, HuffNode::merge(left.node, right.node));
        }

        // The loop always leaves exactly one internal node behind.
        let root = match heap.pop() {
            Some(pending) => pending.node,
            None => HuffNode::merge(
                HuffNode::leaf(FILLER_SYMBOL, 0),
                HuffNode::leaf(PSEUDO_EOF, 1),
            ),
        };

        let tree = Self { root };
        log::debug!(
            "built Huffman tree: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.root.weight()
        );
        tree
    }

    /// Build the tree for an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Wrap an existing root. Returns `None` if the root is a leaf.
    pub fn from_root(root: HuffNode) -> Option<Self> {
        if root.is_leaf() {
            None
        } else {
            Some(Self { root })
        }
    }

    /// The root node.
    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Every leaf as `(symbol, depth)`, in left-to-right order.
    ///
    /// The depth of a leaf is the length of its code.
    pub fn leaves(&self) -> Vec<(u16, usize)> {
        let mut out = Vec::new();
        self.root.collect_leaves(0, &mut out);
        out
    }

    /// Code length of every symbol present, sorted by symbol.
    pub fn code_lengths(&self) -> Vec<(u16, usize)> {
        let mut leaves = self.leaves();
        leaves.sort_unstable();
        leaves
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.leaves()
            .iter()
            .map(|&(_, depth)| depth)
            .max()
            .unwrap_or(0)
    }

    /// Whether `symbol` is a leaf of this tree.
    pub fn contains(&self, symbol: u16) -> bool {
        self.leaves().iter().any(|&(s, _)| s == symbol)
    }
}
