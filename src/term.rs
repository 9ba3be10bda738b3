//! DNF text and its normalization into canonical conjunctive terms.
//!
//! Formula syntax: terms separated by `+`, each term a juxtaposition of
//! literals, `!` immediately before a letter negates it. Letters are
//! case-insensitive and whitespace is insignificant. Any other character is
//! skipped (and logged), it never aborts parsing.
//!
//! ```
//! use dnf_bdd::order::VarOrder;
//! use dnf_bdd::term::normalize;
//!
//! let order = VarOrder::parse("BAC").unwrap();
//! let terms = normalize("CBA + !a b + A!A", &order);
//! assert_eq!(terms.len(), 2);
//! assert_eq!(terms[0].to_string(), "BAC");
//! assert_eq!(terms[1].to_string(), "B!A");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use crate::error::Result;
use crate::eval::{parse_assignment, read_bit};
use crate::order::VarOrder;
use crate::types::{Lit, Var};

/// Separator between the terms of a DNF formula.
pub const TERM_SEPARATOR: char = '+';
/// Negation marker, placed immediately before a variable symbol.
pub const NEGATION: char = '!';

/// A satisfiable conjunction of literals over distinct variables.
///
/// Produced by [`normalize`], which keeps the literals sorted in the
/// canonical order of the [`VarOrder`] in use.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Term {
    lits: Vec<Lit>,
}

impl Term {
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// The literal of `var` in this term, if `var` participates.
    pub fn lit_of(&self, var: Var) -> Option<Lit> {
        self.lits.iter().copied().find(|lit| lit.var() == var)
    }

    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.lits.iter().map(|lit| lit.var())
    }

    /// Evaluates the conjunction directly against an assignment string.
    pub fn eval(&self, assignment: &str) -> Result<bool> {
        let bits = parse_assignment(assignment)?;
        for lit in &self.lits {
            if read_bit(bits, lit.var())? != lit.required_value() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.lits {
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// Lexes one raw term into literals, in textual order.
fn lex_term(raw: &str) -> Vec<Lit> {
    let mut lits = Vec::new();
    let mut negate = false;
    for c in raw.chars().filter(|c| !c.is_whitespace()) {
        if let Some(var) = Var::from_char(c) {
            lits.push(Lit::new(var, negate));
            negate = false;
        } else if c == NEGATION {
            if negate {
                debug!("lex: ignoring dangling '{}' in {:?}", NEGATION, raw);
            }
            negate = true;
        } else {
            debug!("lex: ignoring {:?} in {:?}", c, raw);
            negate = false;
        }
    }
    if negate {
        debug!("lex: ignoring trailing '{}' in {:?}", NEGATION, raw);
    }
    lits
}

/// Normalizes a DNF formula into canonical terms under `order`.
///
/// Per term: duplicate literals are removed, a term containing a variable
/// with both polarities is dropped (it can never be satisfied), and the
/// remaining literals are sorted by [`VarOrder::cmp_lits`]. Terms with no
/// literals at all (e.g. between `++`) are skipped.
pub fn normalize(text: &str, order: &VarOrder) -> Vec<Term> {
    let mut terms = Vec::new();
    for raw in text.split(TERM_SEPARATOR) {
        let mut lits = lex_term(raw);
        if lits.is_empty() {
            debug!("normalize: skipping empty term {:?}", raw);
            continue;
        }

        lits.sort_by(|a, b| order.cmp_lits(a, b));
        lits.dedup();

        // After sorting, both polarities of a variable are adjacent.
        if lits.windows(2).any(|w| w[0].var() == w[1].var()) {
            debug!("normalize: dropping contradictory term {:?}", raw);
            continue;
        }

        terms.push(Term { lits });
    }
    debug!("normalize({:?}, order = {}) -> {} terms", text, order, terms.len());
    terms
}

/// All variables mentioned anywhere in the formula text.
pub fn variables(text: &str) -> BTreeSet<Var> {
    text.chars().filter_map(Var::from_char).collect()
}

/// Evaluates normalized terms directly, without building a diagram.
pub fn eval_terms(terms: &[Term], assignment: &str) -> Result<bool> {
    parse_assignment(assignment)?;
    for term in terms {
        if term.eval(assignment)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn order(s: &str) -> VarOrder {
        VarOrder::parse(s).unwrap()
    }

    fn strings(terms: &[Term]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_sort_by_order() {
        let terms = normalize("CBA", &order("BAC"));
        assert_eq!(strings(&terms), vec!["BAC"]);
    }

    #[test]
    fn test_duplicate_literal() {
        let terms = normalize("AA", &order("ABC"));
        assert_eq!(strings(&terms), vec!["A"]);
        let terms = normalize("!B A !b", &order("ABC"));
        assert_eq!(strings(&terms), vec!["A!B"]);
    }

    #[test]
    fn test_contradiction_dropped() {
        let terms = normalize("A!A", &order("ABC"));
        assert!(terms.is_empty());
        let terms = normalize("AB!A + C", &order("ABC"));
        assert_eq!(strings(&terms), vec!["C"]);
    }

    #[test]
    fn test_multiple_terms() {
        let terms = normalize("CB + BA + ABC + CBA", &order("BAC"));
        assert_eq!(strings(&terms), vec!["BC", "BA", "BAC", "BAC"]);
    }

    #[test]
    fn test_case_insensitive() {
        let terms = normalize("ab+!c", &order("abc"));
        assert_eq!(strings(&terms), vec!["AB", "!C"]);
    }

    #[test]
    fn test_permissive_lexing() {
        let terms = normalize("A*B + 1 + C!", &order("ABC"));
        assert_eq!(strings(&terms), vec!["AB", "C"]);
    }

    #[test]
    fn test_negation_binds_to_next_letter_only() {
        let terms = normalize("!AB", &order("AB"));
        assert_eq!(terms[0].lits(), &[Var::new(0).neg(), Var::new(1).pos()]);
    }

    #[test]
    fn test_empty_formula() {
        assert!(normalize("", &order("AB")).is_empty());
        assert!(normalize(" + ", &order("AB")).is_empty());
    }

    #[test]
    fn test_variables() {
        let vars = variables("C!a + bC");
        let symbols: String = vars.iter().map(|v| v.symbol()).collect();
        assert_eq!(symbols, "ABC");
    }

    #[test]
    fn test_eval_terms() {
        let terms = normalize("AB + !AC", &order("ABC"));
        assert!(eval_terms(&terms, "110").unwrap());
        assert!(eval_terms(&terms, "001").unwrap());
        assert!(!eval_terms(&terms, "100").unwrap());
        assert!(eval_terms(&terms, "1").is_err());
    }
}
