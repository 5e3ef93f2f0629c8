use crate::error::{HuffError, Result};
use crate::freq::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    /// `right` is only `None` for the root of a single-symbol tree.
    Internal {
        weight: u64,
        left: NodeId,
        right: Option<NodeId>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub fn symbol(&self) -> Option<u8> {
        match *self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }
}

// Min-heap entry. Arena ids order equal weights: leaves were allocated in
// symbol order before any internal node, internal nodes in merge order.
#[derive(Debug, PartialEq, Eq)]
struct Pending {
    weight: u64,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lightest, then the oldest.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman tree stored as an arena; rebuilt from a [`FrequencyTable`] on
/// every encode and decode, so construction must stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn build(freqs: &FrequencyTable) -> Result<Self> {
        let mut nodes: Vec<Node> = freqs
            .iter_nonzero()
            .map(|(symbol, weight)| Node::Leaf { symbol, weight })
            .collect();

        match nodes.len() {
            0 => return Err(HuffError::EmptyInput),
            1 => {
                let weight = nodes[0].weight();
                nodes.push(Node::Internal {
                    weight,
                    left: 0,
                    right: None,
                });
                return Ok(Self { nodes, root: 1 });
            }
            _ => {}
        }

        let mut heap: BinaryHeap<Pending> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Pending {
                weight: node.weight(),
                id,
            })
            .collect();

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let weight = left.weight + right.weight;
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight,
                left: left.id,
                right: Some(right.id),
            });
            heap.push(Pending { weight, id });
        }

        let root = nodes.len() - 1;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Follows one edge: `false` is the left child, `true` the right one.
    /// `None` when `id` is a leaf or the edge does not exist.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    Some(left)
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    if let Some(right) = right {
                        stack.push((right, depth + 1));
                    }
                }
            }
        }
        deepest
    }
}
