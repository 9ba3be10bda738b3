//! Evaluation of a diagram under a complete assignment.
//!
//! An assignment is a string of `'0'`/`'1'` characters indexed by the
//! **alphabet** position of a variable (`A` is bit 0, `B` bit 1, ...), not by
//! its position in the diagram's variable order. The whole string must be
//! binary. Its length only has to cover the variables met along the
//! evaluated path.

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ref;
use crate::types::Var;

/// Check that every character of `assignment` is `'0'` or `'1'`.
///
/// The returned bytes are indexed by character position.
pub(crate) fn parse_assignment(assignment: &str) -> Result<&[u8]> {
    let invalid = assignment.chars().enumerate().find(|&(_, c)| c != '0' && c != '1');
    if let Some((index, value)) = invalid {
        return Err(Error::InvalidAssignment { index, value });
    }
    Ok(assignment.as_bytes())
}

/// Read the value of `var` from a parsed assignment.
pub(crate) fn read_bit(bits: &[u8], var: Var) -> Result<bool> {
    let index = var.index();
    match bits.get(index) {
        Some(&bit) => Ok(bit == b'1'),
        None => Err(Error::MissingAssignment { var, index }),
    }
}

impl Bdd {
    /// Walk from `root` to a terminal following the assignment.
    ///
    /// Takes one step per decided variable, regardless of the diagram size.
    pub fn evaluate(&self, root: Ref, assignment: &str) -> Result<bool> {
        let bits = parse_assignment(assignment)?;
        let mut current = root;
        loop {
            match self.get(current).ok_or(Error::DanglingNode(current))? {
                Node::Terminal(value) => return Ok(value),
                Node::Internal { var, high, low, .. } => {
                    current = if read_bit(bits, var)? { high } else { low };
                }
            }
        }
    }
}
