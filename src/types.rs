//! Type-safe wrappers for formula variables, literals and diagram levels.
//!
//! Variables are the letters `A`..=`Z` (case-insensitive on input, always
//! printed upper-case). A [`Var`] is identified by its position in the
//! alphabet, which is also the position of its bit in an assignment string.
//! A [`Level`] is the position of a variable in the active variable order.
use std::fmt;
use std::ops::Neg;

/// A formula variable: one letter of the alphabet `A`..=`Z`.
///
/// # Invariants
///
/// - The index is always in `0..Var::COUNT`
/// - The index is independent of any variable ordering
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u8);

impl Var {
    /// Size of the variable alphabet.
    pub const COUNT: usize = 26;

    /// Creates the variable with the given alphabet index (`0` is `A`).
    ///
    /// # Panics
    ///
    /// Panics if `index >= Var::COUNT`.
    pub fn new(index: usize) -> Self {
        assert!(index < Self::COUNT, "Variable index must be < {}", Self::COUNT);
        Var(index as u8)
    }

    /// Parses a variable symbol, ignoring case.
    ///
    /// Returns `None` for anything that is not an ASCII letter.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Var(c.to_ascii_uppercase() as u8 - b'A'))
        } else {
            None
        }
    }

    /// Returns the alphabet index of the variable.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the upper-case symbol of the variable.
    pub fn symbol(self) -> char {
        (b'A' + self.0) as char
    }

    /// Positive literal of this variable.
    pub fn pos(self) -> Lit {
        Lit::new(self, false)
    }

    /// Negative literal of this variable.
    pub fn neg(self) -> Lit {
        Lit::new(self, true)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A variable together with its polarity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit {
    var: Var,
    negated: bool,
}

impl Lit {
    pub fn new(var: Var, negated: bool) -> Self {
        Self { var, negated }
    }

    pub fn var(self) -> Var {
        self.var
    }

    pub fn is_negated(self) -> bool {
        self.negated
    }

    pub fn is_positive(self) -> bool {
        !self.negated
    }

    /// The value the variable must take for this literal to hold.
    pub fn required_value(self) -> bool {
        !self.negated
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit::new(self.var, !self.negated)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.var)
        } else {
            write!(f, "{}", self.var)
        }
    }
}

/// A level in the variable ordering (0-indexed).
///
/// # Invariants
///
/// - Level 0 is the topmost level (decided first, closest to the root)
/// - Levels increase downward toward terminals
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Level(usize);

impl Level {
    /// Creates a new level with the given index.
    pub fn new(index: usize) -> Self {
        Level(index)
    }

    /// Returns the raw level index as a `usize`.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the next level down (index + 1).
    pub fn next(self) -> Self {
        Level(self.0 + 1)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}
