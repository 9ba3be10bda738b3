use crate::reference::Ref;
use crate::types::{Level, Var};
use crate::utils::{pairing2, pairing3, MyHash};

/// A diagram node as stored in the node table.
///
/// Internal nodes are keyed by `(level, high, low)`: the variable is implied
/// by the level under the store's order and only carried for convenience.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    Terminal(bool),
    Internal {
        var: Var,
        level: Level,
        high: Ref,
        low: Ref,
    },
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    /// Value of a terminal node, `None` for internal nodes.
    pub fn value(&self) -> Option<bool> {
        match *self {
            Node::Terminal(value) => Some(value),
            Node::Internal { .. } => None,
        }
    }

    pub fn var(&self) -> Option<Var> {
        match *self {
            Node::Internal { var, .. } => Some(var),
            Node::Terminal(_) => None,
        }
    }

    pub fn level(&self) -> Option<Level> {
        match *self {
            Node::Internal { level, .. } => Some(level),
            Node::Terminal(_) => None,
        }
    }

    /// Children of an internal node, as `(high, low)`.
    pub fn children(&self) -> Option<(Ref, Ref)> {
        match *self {
            Node::Internal { high, low, .. } => Some((high, low)),
            Node::Terminal(_) => None,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Terminal(false)
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        match *self {
            Node::Terminal(value) => pairing2(0, value as u64),
            Node::Internal { level, high, low, .. } => pairing3(
                level.index() as u64 + 1,
                high.id() as u64,
                low.id() as u64,
            ),
        }
    }
}
