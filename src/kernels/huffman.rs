//! This module contains the Huffman kernel: frequency counting, tree
//! construction, code assignment, and the encode/decode pair built on them.
//!
//! Unlike the other kernels, Huffman coding is table-driven. `Huffman::encode`
//! returns the `CodeTable` it built alongside the bits, and `Huffman::decode`
//! takes that table back as an argument. Nothing is remembered between calls.
//!
//! The tree lives in an arena (`Vec<HuffNode>`) addressed by `NodeId`. A node's id
//! is also its insertion index: leaves are created first, in order of the
//! symbol's first appearance, and each merged node takes the next id. Nodes are
//! merged in `(weight, id)` order, which makes the tree shape, and therefore
//! every codeword, reproducible.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap};
use std::fmt::Write as _;

use crate::bits::{BitSeq, Bits};
use crate::error::CodecError;

/// Index of a node inside a `HuffmanTree` arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        symbol: char,
    },
    Internal {
        weight: usize,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffNode {
    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Counts symbol occurrences, keeping the order in which symbols first appear.
pub fn frequencies(text: &str) -> Vec<(char, usize)> {
    let mut slots: HashMap<char, usize> = HashMap::new();
    let mut counts: Vec<(char, usize)> = Vec::new();
    for c in text.chars() {
        let slot = *slots.entry(c).or_insert_with(|| {
            counts.push((c, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }
    counts
}

//==================================================================================
// 1. Tree
//==================================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    pub fn from_text(text: &str) -> Self {
        Self::from_frequencies(&frequencies(text))
    }

    /// Builds the tree by repeatedly merging the two lightest nodes. The first node
    /// taken becomes the left child.
    pub fn from_frequencies(frequencies: &[(char, usize)]) -> Self {
        let mut nodes: Vec<HuffNode> = frequencies
            .iter()
            .map(|&(symbol, weight)| HuffNode::Leaf { weight, symbol })
            .collect();

        let mut heap: BinaryHeap<Reverse<(usize, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Reverse((node.weight(), id)))
            .collect();

        while heap.len() > 1 {
            let (Some(Reverse((w1, left))), Some(Reverse((w2, right)))) = (heap.pop(), heap.pop())
            else {
                break;
            };
            let id = nodes.len();
            nodes.push(HuffNode::Internal {
                weight: w1 + w2,
                left,
                right,
            });
            heap.push(Reverse((w1 + w2, id)));
        }

        let root = heap.pop().map(|Reverse((_, id))| id);
        Self { nodes, root }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&HuffNode> {
        self.nodes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total weight, i.e. the number of symbols in the text the tree was built from.
    pub fn weight(&self) -> usize {
        self.root
            .and_then(|id| self.nodes.get(id))
            .map_or(0, HuffNode::weight)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, HuffNode::Leaf { .. }))
            .count()
    }

    /// Walks the tree depth-first, `0` for a left edge and `1` for a right edge.
    /// A tree that is a single leaf assigns that symbol the codeword `0`.
    pub fn generate_table(&self) -> BTreeMap<char, BitSeq> {
        let mut table = BTreeMap::new();
        let Some(root) = self.root else {
            return table;
        };

        if let Some(HuffNode::Leaf { symbol, .. }) = self.nodes.get(root) {
            let mut code = BitSeq::new();
            code.push(false);
            table.insert(*symbol, code);
            return table;
        }

        let mut stack: Vec<(NodeId, BitSeq)> = vec![(root, BitSeq::new())];
        while let Some((id, code)) = stack.pop() {
            match &self.nodes[id] {
                HuffNode::Leaf { symbol, .. } => {
                    table.insert(*symbol, code);
                }
                HuffNode::Internal { left, right, .. } => {
                    let mut right_code = code.clone();
                    right_code.push(true);
                    let mut left_code = code;
                    left_code.push(false);
                    stack.push((*right, right_code));
                    stack.push((*left, left_code));
                }
            }
        }
        table
    }

    /// Renders the tree one node per line, pre-order with the left subtree first,
    /// indented two spaces per level. Leaves show `'c' (weight)`, internal nodes
    /// `* (weight)`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match &self.nodes[id] {
                HuffNode::Leaf { weight, symbol } => {
                    let _ = writeln!(out, "{}{:?} ({})", indent, symbol, weight);
                }
                HuffNode::Internal { weight, left, right } => {
                    let _ = writeln!(out, "{}* ({})", indent, weight);
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        out
    }
}

//==================================================================================
// 2. Code Table
//==================================================================================

/// The symbol-to-codeword mapping produced by one `Huffman::encode` call, together
/// with the tree it was derived from. Decoding requires the table of the encode
/// that produced the bits.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    tree: HuffmanTree,
    codes: BTreeMap<char, BitSeq>,
    inverse: HashMap<BitSeq, char>,
    max_len: usize,
}

impl CodeTable {
    pub fn from_tree(tree: HuffmanTree) -> Self {
        let codes = tree.generate_table();
        let inverse = codes
            .iter()
            .map(|(&symbol, code)| (code.clone(), symbol))
            .collect();
        let max_len = codes.values().map(|code| code.len()).max().unwrap_or(0);
        Self {
            tree,
            codes,
            inverse,
            max_len,
        }
    }

    pub fn codeword(&self, symbol: char) -> Option<&Bits> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    /// Iterates over `(symbol, codeword)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Bits)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_codeword_len(&self) -> usize {
        self.max_len
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn display_tree(&self) -> String {
        self.tree.render()
    }

    /// True when no two symbols share a codeword and no codeword is a prefix of
    /// another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Bits> = self.codes.values().map(|c| c.as_bitslice()).collect();
        // Lexicographic order puts any prefix directly before one of its extensions.
        codes.sort();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    fn symbol_for(&self, candidate: &BitSeq) -> Option<char> {
        self.inverse.get(candidate).copied()
    }
}

//==================================================================================
// 3. Codec
//==================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Huffman;

impl Huffman {
    pub fn new() -> Self {
        Huffman
    }

    /// Builds a fresh tree and table from `text` and encodes `text` with it.
    /// Empty text yields no bits and an empty table.
    pub fn encode(&self, text: &str) -> Result<(BitSeq, CodeTable), CodecError> {
        let table = CodeTable::from_tree(HuffmanTree::from_text(text));
        log::debug!(
            "huffman: {} distinct symbols, {} nodes, longest codeword {} bits",
            table.len(),
            table.tree().nodes.len(),
            table.max_codeword_len()
        );

        let mut out = BitSeq::new();
        for c in text.chars() {
            let code = table.codeword(c).ok_or_else(|| {
                CodecError::InternalError(format!("no Huffman codeword for {:?}", c))
            })?;
            out.extend_from_bitslice(code);
        }
        Ok((out, table))
    }

    /// Decodes `bits` with the table returned by the encode that produced them.
    pub fn decode(&self, bits: &Bits, table: &CodeTable) -> Result<String, CodecError> {
        if bits.is_empty() {
            return Ok(String::new());
        }
        if table.is_empty() {
            return Err(CodecError::StatePrecondition(
                "Huffman decode needs the code table from a previous encode".to_string(),
            ));
        }

        let mut text = String::new();
        let mut candidate = BitSeq::with_capacity(table.max_codeword_len());
        for (position, bit) in bits.iter().by_vals().enumerate() {
            candidate.push(bit);
            if let Some(symbol) = table.symbol_for(&candidate) {
                log::trace!("huffman: {} bits -> {:?}", candidate.len(), symbol);
                text.push(symbol);
                candidate.clear();
            } else if candidate.len() >= table.max_codeword_len() {
                return Err(CodecError::MalformedStream(format!(
                    "no Huffman codeword matches the bits ending at {}",
                    position
                )));
            }
        }

        if !candidate.is_empty() {
            return Err(CodecError::truncated("Huffman codeword", bits.len()));
        }
        Ok(text)
    }
}
