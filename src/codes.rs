use crate::freq::{FrequencyTable, SYMBOLS};
use crate::tree::{HuffmanTree, Node};

/// Symbol -> code, where a code is the root-to-leaf path (left = `false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Vec<bool>>; SYMBOLS],
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes: [Option<Vec<bool>>; SYMBOLS] = std::array::from_fn(|_| None);

        let mut stack = vec![(tree.root(), Vec::new())];
        while let Some((id, prefix)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => codes[symbol as usize] = Some(prefix),
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        let mut right_prefix = prefix.clone();
                        right_prefix.push(true);
                        stack.push((right, right_prefix));
                    }
                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((left, left_prefix));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, code)| code.as_deref().map(|c| (s as u8, c)))
    }

    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Exact number of payload bits for a source with these frequencies.
    pub fn payload_bits(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .iter_nonzero()
            .map(|(s, count)| count * self.get(s).map_or(0, |c| c.len() as u64))
            .sum()
    }
}

/// Renders a code as a string of `0`/`1`.
pub fn format_code(code: &[bool]) -> String {
    code.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
