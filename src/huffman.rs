use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    Leaf(char),
    Internal(Box<Node>, Box<Node>),
}

/// A Huffman tree node. Leaves carry a character, internal nodes own both
/// children and hold the sum of their frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    node_type: NodeType,
    freq: u64,
}

impl Node {
    pub fn new_leaf(symbol: char, freq: u64) -> Self {
        Node {
            node_type: NodeType::Leaf(symbol),
            freq,
        }
    }

    fn new_internal(left: Node, right: Node) -> Self {
        Node {
            freq: left.freq + right.freq,
            node_type: NodeType::Internal(Box::new(left), Box::new(right)),
        }
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }

    pub fn symbol(&self) -> Option<char> {
        match self.node_type {
            NodeType::Leaf(symbol) => Some(symbol),
            NodeType::Internal(..) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::Leaf(_))
    }

    pub fn left(&self) -> Option<&Node> {
        match &self.node_type {
            NodeType::Internal(left, _) => Some(&**left),
            NodeType::Leaf(_) => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match &self.node_type {
            NodeType::Internal(_, right) => Some(&**right),
            NodeType::Leaf(_) => None,
        }
    }
}

/// Combines two nodes. The strictly less frequent node goes left; on a tie
/// the second operand goes left.
pub fn merge(first: Node, second: Node) -> Node {
    if first.freq < second.freq {
        Node::new_internal(first, second)
    } else {
        Node::new_internal(second, first)
    }
}

/// Greedy Huffman construction over a frequency-sorted leaf list.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    /// `leaves` must already be sorted ascending by frequency, as produced
    /// by [`crate::frequency::FrequencyTable::into_leaves`].
    pub fn new(leaves: Vec<Node>) -> Self {
        Self { nodes: leaves }
    }

    /// Repeatedly merges the two front nodes and re-inserts the result in
    /// front of the first node with a strictly greater frequency, until a
    /// single root remains.
    pub fn build(self) -> Result<Node> {
        let mut nodes = self.nodes;
        if nodes.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        while nodes.len() > 1 {
            let first = nodes.remove(0);
            let second = nodes.remove(0);

            let merged = merge(first, second);
            let at = nodes
                .iter()
                .position(|node| node.freq > merged.freq)
                .unwrap_or(nodes.len());
            debug!("merged node of freq {} inserted at {}", merged.freq, at);
            nodes.insert(at, merged);
        }

        nodes.pop().ok_or(Error::EmptyAlphabet)
    }
}

/// One row of the code listing: a leaf's character, frequency and code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafCode {
    pub symbol: char,
    pub freq: u64,
    pub code: String,
}

impl fmt::Display for LeafCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.symbol, self.freq, self.code)
    }
}

/// Character to code mapping derived from a finished tree.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: HashMap<char, String>,
    leaves: Vec<LeafCode>,
}

impl CodeTable {
    /// Walks the tree left before right, appending `0` per left step and
    /// `1` per right step. A root leaf is given the code `0`.
    pub fn from_tree(root: &Node) -> Self {
        let mut table = CodeTable::default();
        if let NodeType::Leaf(symbol) = root.node_type {
            table.insert(symbol, root.freq, String::from("0"));
            return table;
        }

        // right is pushed first so the left subtree is listed first
        let mut stack = vec![(root, String::new())];
        while let Some((node, code)) = stack.pop() {
            match &node.node_type {
                NodeType::Leaf(symbol) => table.insert(*symbol, node.freq, code),
                NodeType::Internal(ln, rn) => {
                    stack.push((&**rn, format!("{}1", code)));
                    stack.push((&**ln, format!("{}0", code)));
                }
            }
        }

        table
    }

    fn insert(&mut self, symbol: char, freq: u64, code: String) {
        self.codes.insert(symbol, code.clone());
        self.leaves.push(LeafCode { symbol, freq, code });
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Leaves in traversal order.
    pub fn leaves(&self) -> &[LeafCode] {
        &self.leaves
    }

    pub fn into_leaves(self) -> Vec<LeafCode> {
        self.leaves
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        codes.sort_unstable();
        // after sorting, a prefix sits directly before some code it prefixes
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn codes_for(reference: &str) -> CodeTable {
        let leaves = FrequencyTable::from_text(reference).into_leaves();
        let root = TreeBuilder::new(leaves).build().unwrap();
        CodeTable::from_tree(&root)
    }

    #[test]
    fn merge_puts_smaller_frequency_left() {
        let n = merge(Node::new_leaf('a', 3), Node::new_leaf('b', 1));
        assert_eq!(n.freq(), 4);
        assert_eq!(n.symbol(), None);
        assert_eq!(n.left().unwrap().symbol(), Some('b'));
        assert_eq!(n.right().unwrap().symbol(), Some('a'));

        let n = merge(Node::new_leaf('b', 1), Node::new_leaf('a', 3));
        assert_eq!(n.left().unwrap().symbol(), Some('b'));
        assert_eq!(n.right().unwrap().symbol(), Some('a'));
    }

    #[test]
    fn merge_tie_puts_second_operand_left() {
        let n = merge(Node::new_leaf('x', 2), Node::new_leaf('y', 2));
        assert_eq!(n.left().unwrap().symbol(), Some('y'));
        assert_eq!(n.right().unwrap().symbol(), Some('x'));
    }

    #[test]
    fn empty_leaf_list_is_an_error() {
        assert!(matches!(
            TreeBuilder::new(Vec::new()).build(),
            Err(Error::EmptyAlphabet)
        ));
    }

    #[test]
    fn single_leaf_is_the_root() {
        let root = TreeBuilder::new(vec![Node::new_leaf('c', 5)]).build().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.symbol(), Some('c'));
        assert_eq!(root.freq(), 5);
    }

    #[test]
    fn single_symbol_alphabet_gets_code_zero() {
        let table = codes_for("ccccc");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('c'), Some("0"));
        assert_eq!(table.leaves()[0].to_string(), "c:5:0");
    }

    #[test]
    fn two_symbols_less_frequent_goes_left() {
        let table = codes_for("aaab");
        assert_eq!(table.get('b'), Some("0"));
        assert_eq!(table.get('a'), Some("1"));
    }

    #[test]
    fn two_equal_symbols_higher_code_goes_left() {
        // leaves are [a, b]; on a tie the second operand (b) goes left
        let table = codes_for("abab");
        assert_eq!(table.get('b'), Some("0"));
        assert_eq!(table.get('a'), Some("1"));
    }

    #[test]
    fn merged_node_is_inserted_after_equal_frequencies() {
        // c,d merge to 2 and must land after b and r (both 2)
        let table = codes_for("abracadabra");
        assert_eq!(table.get('a'), Some("0"));
        assert_eq!(table.get('d'), Some("100"));
        assert_eq!(table.get('c'), Some("101"));
        assert_eq!(table.get('r'), Some("110"));
        assert_eq!(table.get('b'), Some("111"));

        let listing: Vec<String> = table.leaves().iter().map(ToString::to_string).collect();
        assert_eq!(listing, vec!["a:5:0", "d:1:100", "c:1:101", "r:2:110", "b:2:111"]);
    }

    #[test]
    fn internal_frequency_is_sum_of_children() {
        let leaves = FrequencyTable::from_text("this is an example of a huffman tree").into_leaves();
        let root = TreeBuilder::new(leaves).build().unwrap();

        let mut stack = vec![&root];
        while let Some(node) = stack.pop() {
            if let (Some(l), Some(r)) = (node.left(), node.right()) {
                assert!(node.symbol().is_none());
                assert_eq!(node.freq(), l.freq() + r.freq());
                stack.push(l);
                stack.push(r);
            } else {
                assert!(node.is_leaf());
            }
        }
        assert_eq!(root.freq(), 36);
    }

    #[test]
    fn codes_are_prefix_free() {
        let table = codes_for("this is an example of a huffman tree");
        assert!(table.is_prefix_free());
        assert!(table.leaves().iter().all(|leaf| !leaf.code.is_empty()));
    }

    #[test]
    fn deep_tree_lists_leaves_left_to_right() {
        // doubling frequencies give a fully skewed tree
        let leaves: Vec<Node> = (0..40u32)
            .map(|i| Node::new_leaf(char::from_u32(0x100 + i).unwrap(), 1u64 << i))
            .collect();
        let root = TreeBuilder::new(leaves).build().unwrap();
        let table = CodeTable::from_tree(&root);

        assert_eq!(table.len(), 40);
        assert!(table.is_prefix_free());
        // the rarest leaf is leftmost on the deepest level
        assert_eq!(table.leaves()[0].symbol, '\u{100}');
        assert_eq!(table.leaves()[0].code, "0".repeat(39));
        assert_eq!(table.leaves()[1].symbol, '\u{101}');
        assert_eq!(table.leaves()[1].code, format!("{}1", "0".repeat(38)));
        assert_eq!(table.leaves()[39].symbol, '\u{127}');
        assert_eq!(table.leaves()[39].code, "1");
    }

    #[test]
    fn prefix_check_detects_overlap() {
        let mut table = CodeTable::default();
        table.insert('a', 1, "0".into());
        table.insert('b', 1, "01".into());
        assert!(!table.is_prefix_free());
    }
}
