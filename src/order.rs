//! Variable order and the rank table derived from it.
//!
//! A [`VarOrder`] is built from an ordering string such as `"BAC"` and is the
//! single source of truth for two related numbers of every declared variable:
//!
//! - its **level**: the position in the ordering string, level 0 decided first;
//! - its **rank**: `count - level - 1`, so the earliest symbol has the highest rank.
//!
//! The normalizer sorts literals by descending rank, the diagram lays out
//! decision layers by ascending level; both consumers agree because they read
//! the same table. Symbols absent from the ordering string are *unranked*.

use std::cmp::Ordering;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::types::{Level, Lit, Var};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VarOrder {
    vars: Vec<Var>,
    levels: [Option<Level>; Var::COUNT],
}

impl VarOrder {
    /// Parses an ordering string, e.g. `"BAC"`.
    ///
    /// Whitespace is ignored and letters are case-insensitive. Every other
    /// character, and any repeated symbol, is rejected.
    pub fn parse(order: &str) -> Result<Self> {
        let mut vars = Vec::with_capacity(order.len());
        for c in order.chars().filter(|c| !c.is_whitespace()) {
            let var = Var::from_char(c)
                .ok_or_else(|| Error::InvalidOrder(format!("{:?} is not a variable symbol", c)))?;
            vars.push(var);
        }
        Self::from_vars(vars)
    }

    /// Builds an order from variables listed top (level 0) to bottom.
    pub fn from_vars(vars: impl IntoIterator<Item = Var>) -> Result<Self> {
        let vars: Vec<Var> = vars.into_iter().collect();
        let mut levels = [None; Var::COUNT];
        for (i, &var) in vars.iter().enumerate() {
            if levels[var.index()].is_some() {
                return Err(Error::InvalidOrder(format!("{} occurs more than once", var)));
            }
            levels[var.index()] = Some(Level::new(i));
        }
        Ok(Self { vars, levels })
    }

    /// The natural order: the given variables sorted alphabetically.
    pub fn alphabetical(vars: impl IntoIterator<Item = Var>) -> Self {
        let mut vars: Vec<Var> = vars.into_iter().collect();
        vars.sort_unstable();
        vars.dedup();
        let mut levels = [None; Var::COUNT];
        for (i, var) in vars.iter().enumerate() {
            levels[var.index()] = Some(Level::new(i));
        }
        Self { vars, levels }
    }

    /// Returns a uniformly shuffled permutation of this order.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut vars = self.vars.clone();
        vars.shuffle(rng);
        let mut levels = [None; Var::COUNT];
        for (i, var) in vars.iter().enumerate() {
            levels[var.index()] = Some(Level::new(i));
        }
        Self { vars, levels }
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Declared variables, level 0 first.
    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn contains(&self, var: Var) -> bool {
        self.levels[var.index()].is_some()
    }

    pub fn level(&self, var: Var) -> Option<Level> {
        self.levels[var.index()]
    }

    /// Rank of the variable: `count - level - 1`, or `None` if unranked.
    pub fn rank(&self, var: Var) -> Option<usize> {
        self.level(var).map(|level| self.len() - level.index() - 1)
    }

    pub fn var_at(&self, level: Level) -> Option<Var> {
        self.vars.get(level.index()).copied()
    }

    /// Canonical literal order inside a term.
    ///
    /// Higher rank first, unranked literals last (alphabetically), and for
    /// the same variable the positive literal precedes the negated one.
    pub fn cmp_lits(&self, a: &Lit, b: &Lit) -> Ordering {
        let rank_a = self.rank(a.var());
        let rank_b = self.rank(b.var());
        rank_b
            .cmp(&rank_a)
            .then_with(|| a.var().cmp(&b.var()))
            .then_with(|| a.is_negated().cmp(&b.is_negated()))
    }
}

impl fmt::Display for VarOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.vars {
            write!(f, "{}", var)?;
        }
        Ok(())
    }
}
