use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};

use log::debug;

use crate::error::Result;
use crate::huffman::Node;

/// Occurrence counts for every distinct character of a text.
///
/// Keys iterate in ascending character code, which is the order leaves keep
/// among equal frequencies once sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let mut counts: BTreeMap<char, u64> = BTreeMap::new();
        for symbol in text.chars() {
            *counts.entry(symbol).or_default() += 1;
        }

        Self { counts }
    }

    /// Counts a stream line by line. Bytes that are not valid UTF-8 count
    /// as U+FFFD.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut counts: BTreeMap<char, u64> = BTreeMap::new();
        for_each_char(reader, |symbol| {
            *counts.entry(symbol).or_default() += 1;
            Ok(())
        })?;

        Ok(Self { counts })
    }

    pub fn count(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of characters that were counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &freq)| (symbol, freq))
    }

    /// Leaves sorted ascending by frequency.
    ///
    /// The sort is stable over ascending character code, so `'a'` precedes
    /// `'b'` when both occur equally often.
    pub fn into_leaves(self) -> Vec<Node> {
        let mut leaves: Vec<Node> = self
            .counts
            .into_iter()
            .map(|(symbol, freq)| Node::new_leaf(symbol, freq))
            .collect();
        leaves.sort_by_key(Node::freq);

        debug!(
            "sorted {} leaves: {:?}",
            leaves.len(),
            leaves
                .iter()
                .map(|leaf| (leaf.symbol(), leaf.freq()))
                .collect::<Vec<_>>()
        );

        leaves
    }
}

/// Feeds every character of `reader` to `f`, one line at a time.
///
/// Invalid UTF-8 decodes to U+FFFD. A newline byte never occurs inside a
/// multi-byte sequence, so splitting on it replaces the same bytes as
/// decoding the whole stream at once.
pub(crate) fn for_each_char(
    reader: impl Read,
    mut f: impl FnMut(char) -> Result<()>,
) -> Result<()> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        for symbol in String::from_utf8_lossy(&line).chars() {
            f(symbol)?;
        }
    }
}
