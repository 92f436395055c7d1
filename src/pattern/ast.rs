use super::class::ByteSet;

/// Parsed form of one rule's pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches the empty string.
    Empty,
    /// Matches one byte from the set.
    Class(ByteSet),
    Concat(Vec<Node>),
    Alternate(Vec<Node>),
    /// `max` of `None` means unbounded.
    Repeat {
        node: Box<Node>,
        min: u32,
        max: Option<u32>,
    },
}

impl Node {
    pub fn literal(bytes: &[u8]) -> Node {
        match bytes {
            [] => Node::Empty,
            [byte] => Node::Class(ByteSet::single(*byte)),
            _ => Node::Concat(
                bytes
                    .iter()
                    .map(|byte| Node::Class(ByteSet::single(*byte)))
                    .collect(),
            ),
        }
    }

    pub fn repeat(node: Node, min: u32, max: Option<u32>) -> Node {
        Node::Repeat {
            node: Box::new(node),
            min,
            max,
        }
    }

    /// True when the node accepts the empty string.
    pub fn matches_empty(&self) -> bool {
        match self {
            Node::Empty => true,
            Node::Class(_) => false,
            Node::Concat(nodes) => nodes.iter().all(Node::matches_empty),
            Node::Alternate(nodes) => nodes.iter().any(Node::matches_empty),
            Node::Repeat { node, min, .. } => *min == 0 || node.matches_empty(),
        }
    }
}
