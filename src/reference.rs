use std::fmt::{Display, Formatter};

/// Handle of a node inside a [`Bdd`][crate::bdd::Bdd] node store.
///
/// Handles are assigned in creation order, starting from 1, and are never
/// reused: a node keeps its id even after it becomes unreachable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ref(u32);

impl Ref {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw node id.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Return the index of the node in the store.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
