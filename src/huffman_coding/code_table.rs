//! Turns a Huffman tree into the forward (symbol -> code) and reverse (code -> symbol) tables.
//!
//! Codes are paths from the root: a step to the left child appends a 0, a step to the right
//! child appends a 1. Because every symbol sits on a leaf, no code can be a prefix of another.
//! The one case the tree shape does not cover is a tree that is a single leaf. That symbol
//! gets the one bit code `0` so every symbol still costs at least one bit.

use std::fmt::{Display, Formatter};

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::huffman::{HuffmanTree, Node, NodeData};
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FreqTable;

/// Longest code we can hold. Needing more takes a Fibonacci-like distribution over more
/// than 10^13 symbols, so in practice only a forged archive header gets here.
pub const MAX_CODE_LEN: usize = 64;

/// A code, right aligned in `bits`, most significant bit sent first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    pub const fn new(bits: u64, len: u8) -> Self {
        Self { bits, len }
    }

    /// This code with one more bit appended.
    pub fn push(self, bit: bool) -> Self {
        Self {
            bits: (self.bits << 1) | bit as u64,
            len: self.len + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.len == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

/// Forward and reverse code tables for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: FxHashMap<u8, Code>,
    reverse: FxHashMap<Code, u8>,
    max_len: u8,
}

impl CodeTable {
    /// A table with no symbols. Only an empty bitstream decodes against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walk the tree and record the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self::empty();
        let root = tree.root();
        if let NodeData::Leaf(sym) = root.node_data {
            table.record(sym, Code::new(0, 1));
        } else {
            walk(root, 0, 0, &mut table)?;
        }
        debug!(
            "Generated {} codes, longest is {} bits",
            table.len(),
            table.max_len
        );
        Ok(table)
    }

    /// Build the tree for `freqs` and generate its codes. An empty table gives an empty code
    /// table rather than an error, which is what the empty input needs.
    pub fn from_freqs(freqs: &FreqTable) -> Result<Self> {
        if freqs.is_empty() {
            return Ok(Self::empty());
        }
        let tree = HuffmanTree::build(freqs)?;
        debug!(
            "Tree over {} symbols, {} deep",
            tree.weight(),
            tree.depth()
        );
        tree.print_structure();
        Self::from_tree(&tree)
    }

    fn record(&mut self, sym: u8, code: Code) {
        trace!("{:?} => {}", sym as char, code);
        self.max_len = self.max_len.max(code.len);
        self.codes.insert(sym, code);
        self.reverse.insert(code, sym);
    }

    /// Code for a symbol.
    pub fn code(&self, sym: u8) -> Option<Code> {
        self.codes.get(&sym).copied()
    }

    /// Symbol for a complete code.
    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.reverse.get(code).copied()
    }

    /// Bit length of the longest code, 0 for an empty table.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// (symbol, code) pairs in ascending symbol order.
    pub fn sorted(&self) -> Vec<(u8, Code)> {
        let mut pairs: Vec<(u8, Code)> = self.codes.iter().map(|(&s, &c)| (s, c)).collect();
        pairs.sort_unstable_by_key(|&(s, _)| s);
        pairs
    }

    /// Number of bits `freqs` will take once encoded with this table. Symbols missing from
    /// the table are skipped.
    pub fn encoded_len(&self, freqs: &FreqTable) -> u64 {
        freqs
            .sorted()
            .iter()
            .filter_map(|&(sym, count)| self.code(sym).map(|c| c.len as u64 * count))
            .sum()
    }
}

/// Recursively walk the tree, extending the code by one bit per level.
fn walk(node: &Node, bits: u64, depth: usize, table: &mut CodeTable) -> Result<()> {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            walk(left, bits << 1, depth + 1, table)?;
            walk(right, (bits << 1) | 1, depth + 1, table)?;
        }
        NodeData::Leaf(sym) => {
            if depth > MAX_CODE_LEN {
                return Err(HuffError::CodeTooLong {
                    symbol: *sym,
                    depth,
                    max: MAX_CODE_LEN,
                });
            }
            table.record(*sym, Code::new(bits, depth as u8));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable, MAX_CODE_LEN};
    use crate::error::HuffError;
    use crate::tools::freq_count::{freqs, FreqTable};

    fn assert_prefix_free(table: &CodeTable) {
        let pairs = table.sorted();
        for (i, (sa, a)) in pairs.iter().enumerate() {
            assert!(!a.is_empty(), "empty code for {}", sa);
            for (sb, b) in pairs.iter().skip(i + 1) {
                assert!(
                    !a.is_prefix_of(b) && !b.is_prefix_of(a),
                    "{} ({}) and {} ({}) clash",
                    sa,
                    a,
                    sb,
                    b
                );
            }
        }
    }

    #[test]
    fn known_codes_test() {
        // a:5 b:1 c:2 -> b = 00, c = 01, a = 1
        let table = CodeTable::from_freqs(&freqs(b"aaaaabcc")).unwrap();
        assert_eq!(table.code(b'a'), Some(Code::new(0b1, 1)));
        assert_eq!(table.code(b'b'), Some(Code::new(0b00, 2)));
        assert_eq!(table.code(b'c'), Some(Code::new(0b01, 2)));
        assert_eq!(table.symbol(&Code::new(0b01, 2)), Some(b'c'));
        assert_eq!(table.max_len(), 2);
        assert_eq!(table.encoded_len(&freqs(b"aaaaabcc")), 5 + 2 + 4);
    }

    #[test]
    fn single_symbol_gets_a_bit_test() {
        let table = CodeTable::from_freqs(&freqs(b"aaaa")).unwrap();
        let code = table.code(b'a').unwrap();
        assert_eq!(code, Code::new(0, 1));
        assert_eq!(code.to_string(), "0");
    }

    #[test]
    fn empty_table_test() {
        let table = CodeTable::from_freqs(&FreqTable::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_len(), 0);
    }

    #[test]
    fn prefix_free_test() {
        assert_prefix_free(&CodeTable::from_freqs(&freqs(b"abracadabra")).unwrap());
        assert_prefix_free(
            &CodeTable::from_freqs(&freqs(
                "The quick brown fox jumps over the lazy dog. 0123456789".as_bytes(),
            ))
            .unwrap(),
        );
        let all: Vec<u8> = (0..=255).collect();
        let table = CodeTable::from_freqs(&freqs(&all)).unwrap();
        assert_eq!(table.len(), 256);
        assert_eq!(table.max_len(), 8);
        assert_prefix_free(&table);
    }

    #[test]
    fn skewed_weights_stay_prefix_free_test() {
        // Fibonacci weights give the deepest possible tree.
        let mut fib = (1_u64, 1_u64);
        let table: FreqTable = (0..20_u8)
            .map(|s| {
                let w = fib.0;
                fib = (fib.1, fib.0 + fib.1);
                (s, w)
            })
            .collect();
        let codes = CodeTable::from_freqs(&table).unwrap();
        assert_eq!(codes.max_len(), 19);
        assert_prefix_free(&codes);
    }

    #[test]
    fn overlong_code_test() {
        let mut fib = (1_u64, 1_u64);
        let table: FreqTable = (0..(MAX_CODE_LEN as u8 + 3))
            .map(|s| {
                let w = fib.0;
                fib = (fib.1, fib.0.saturating_add(fib.1));
                (s, w)
            })
            .collect();
        assert!(matches!(
            CodeTable::from_freqs(&table),
            Err(HuffError::CodeTooLong { .. })
        ));
    }

    #[test]
    fn code_display_test() {
        assert_eq!(Code::new(0b0011, 4).to_string(), "0011");
        assert_eq!(Code::default().to_string(), "");
        assert!(Code::new(0b1, 1).is_prefix_of(&Code::new(0b10, 2)));
        assert!(!Code::new(0b0, 1).is_prefix_of(&Code::new(0b10, 2)));
        assert_eq!(Code::new(0b1, 1).push(false), Code::new(0b10, 2));
    }
}
