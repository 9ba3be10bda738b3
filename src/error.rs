use std::fmt;

use crate::reference::Ref;
use crate::types::Var;

/// Error type for diagram construction and evaluation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The variable order string is not a sequence of distinct letters.
    InvalidOrder(String),
    /// The formula uses a variable that the variable order does not declare.
    UndeclaredVariable(Var),
    /// The assignment is too short to contain the bit of `var`.
    MissingAssignment { var: Var, index: usize },
    /// The assignment character at `index` is neither `'0'` nor `'1'`.
    InvalidAssignment { index: usize, value: char },
    /// A child reference does not point into the node store.
    DanglingNode(Ref),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOrder(msg) => write!(f, "Invalid variable order: {}", msg),
            Error::UndeclaredVariable(var) => {
                write!(f, "Variable {} is not declared in the variable order", var)
            }
            Error::MissingAssignment { var, index } => {
                write!(f, "Assignment has no value for {} (position {})", var, index)
            }
            Error::InvalidAssignment { index, value } => {
                write!(f, "Assignment value {:?} at position {} is not binary", value, index)
            }
            Error::DanglingNode(node) => write!(f, "Dangling node reference {}", node),
        }
    }
}

impl std::error::Error for Error {}
