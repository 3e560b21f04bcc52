use log::{debug, trace};

use crate::error::{HuffError, Result};
use crate::tools::freq_count::FreqTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub depth: u8,
    /// Creation order. Leaves get 0..n in symbol order, merged nodes count on from there.
    pub seq: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, depth: u8, seq: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            depth,
            seq,
            node_data,
        }
    }
}

impl Ord for Node {
    /// Reversed on (weight, seq) so BinaryHeap pops the lightest, oldest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree built from one frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// Ties on weight go to the node created first. Leaves are created in ascending symbol
    /// order, so the same table always gives the same tree. Of each popped pair the first
    /// becomes the left (0) child and the second the right (1) child.
    pub fn build(freqs: &FreqTable) -> Result<Self> {
        if freqs.is_empty() {
            return Err(HuffError::EmptyFrequencyTable);
        }

        let mut heap: BinaryHeap<Node> = freqs
            .sorted()
            .into_iter()
            .enumerate()
            .map(|(i, (sym, weight))| Node::new(weight, 0, i as u32, NodeData::Leaf(sym)))
            .collect();
        let mut next_seq = heap.len() as u32;

        // Pop pairs until a single root is left.
        while heap.len() > 1 {
            let left_child = heap.pop().ok_or(HuffError::EmptyFrequencyTable)?;
            let right_child = heap.pop().ok_or(HuffError::EmptyFrequencyTable)?;
            trace!(
                "merge {} (w{}) + {} (w{})",
                left_child.seq,
                left_child.weight,
                right_child.seq,
                right_child.weight
            );
            heap.push(Node::new(
                left_child.weight.saturating_add(right_child.weight),
                left_child.depth.max(right_child.depth).saturating_add(1),
                next_seq,
                NodeData::Kids(Box::new(left_child), Box::new(right_child)),
            ));
            next_seq += 1;
        }

        let root = heap.pop().ok_or(HuffError::EmptyFrequencyTable)?;
        debug!(
            "Built tree over {} symbols, weight {}, depth {}",
            freqs.len(),
            root.weight,
            root.depth
        );
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Length of the longest root to leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> u8 {
        self.root.depth
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight
    }

    /// Dump the tree at trace level.
    pub fn print_structure(&self) {
        trace!("Huffman tree structure:");
        print_node(&self.root, 0, "root");
    }
}

fn print_node(node: &Node, depth: usize, label: &str) {
    let indent = "  ".repeat(depth);
    match &node.node_data {
        NodeData::Leaf(sym) => {
            trace!(
                "{}{} -> leaf {:?} ({}) [weight {}]",
                indent,
                label,
                *sym as char,
                sym,
                node.weight
            );
        }
        NodeData::Kids(left, right) => {
            trace!("{}{} -> internal [weight {}]", indent, label, node.weight);
            print_node(left, depth + 1, "L");
            print_node(right, depth + 1, "R");
        }
    }
}

#[cfg(test)]
mod test {
    use super::{HuffmanTree, NodeData};
    use crate::error::HuffError;
    use crate::tools::freq_count::{freqs, FreqTable};

    #[test]
    fn empty_table_test() {
        let result = HuffmanTree::build(&FreqTable::new());
        assert!(matches!(result, Err(HuffError::EmptyFrequencyTable)));
    }

    #[test]
    fn single_symbol_test() {
        let tree = HuffmanTree::build(&freqs(b"aaaa")).unwrap();
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.weight(), 4);
        assert_eq!(tree.root().node_data, NodeData::Leaf(b'a'));
    }

    #[test]
    fn lightest_pair_merges_first_test() {
        // a:5 b:1 c:2 -> b and c merge first (b left), then that node (3) pops before a (5)
        let tree = HuffmanTree::build(&freqs(b"aaaaabcc")).unwrap();
        assert_eq!(tree.weight(), 8);
        assert_eq!(tree.depth(), 2);
        match &tree.root().node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(right.node_data, NodeData::Leaf(b'a'));
                match &left.node_data {
                    NodeData::Kids(ll, lr) => {
                        assert_eq!(ll.node_data, NodeData::Leaf(b'b'));
                        assert_eq!(lr.node_data, NodeData::Leaf(b'c'));
                    }
                    other => panic!("expected kids, got {:?}", other),
                }
            }
            other => panic!("expected kids, got {:?}", other),
        }
    }

    #[test]
    fn ties_break_on_symbol_order_test() {
        let tree = HuffmanTree::build(&freqs(b"ba")).unwrap();
        match &tree.root().node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(left.node_data, NodeData::Leaf(b'a'));
                assert_eq!(right.node_data, NodeData::Leaf(b'b'));
            }
            other => panic!("expected kids, got {:?}", other),
        }
    }

    #[test]
    fn same_table_same_tree_test() {
        let text = b"this is an example for huffman encoding";
        let a = HuffmanTree::build(&freqs(text)).unwrap();
        let b = HuffmanTree::build(&freqs(text)).unwrap();
        assert_eq!(a, b);
    }
}
