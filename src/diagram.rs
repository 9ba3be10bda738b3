//! Diagrams for whole DNF formulas.
//!
//! A [`Diagram`] pairs a root handle with the [`Bdd`] node store it was built
//! in. The store is private to the diagram and released with it.
//!
//! ```
//! use dnf_bdd::diagram::build_diagram;
//!
//! let d = build_diagram("AB + !AC", "ABC").unwrap();
//! assert_eq!(d.evaluate("110"), Ok(true));
//! assert_eq!(d.evaluate("001"), Ok(true));
//! assert_eq!(d.evaluate("100"), Ok(false));
//! ```

use std::collections::HashMap;
use std::fmt::Debug;

use log::debug;
use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::error::Result;
use crate::node::Node;
use crate::order::VarOrder;
use crate::reference::Ref;
use crate::term::normalize;
use crate::types::Lit;

pub struct Diagram {
    bdd: Bdd,
    root: Ref,
}

impl Diagram {
    pub fn new(bdd: Bdd, root: Ref) -> Self {
        Self { bdd, root }
    }

    pub fn root(&self) -> Ref {
        self.root
    }

    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    pub fn order(&self) -> &VarOrder {
        self.bdd.order()
    }

    /// Number of nodes reachable from the root, terminals included.
    ///
    /// Recomputed on every call: the store may hold stale nodes.
    pub fn live_count(&self) -> usize {
        self.bdd.count_nodes(self.root)
    }

    /// Number of nodes allocated while building this diagram.
    pub fn store_size(&self) -> usize {
        self.bdd.size()
    }

    pub fn is_true(&self) -> bool {
        self.bdd.is_one(self.root)
    }

    pub fn is_false(&self) -> bool {
        self.bdd.is_zero(self.root)
    }

    /// Evaluate under an assignment indexed by alphabet position.
    pub fn evaluate(&self, assignment: &str) -> Result<bool> {
        self.bdd.evaluate(self.root, assignment)
    }

    /// Number of assignments to the ordered variables that satisfy the formula.
    pub fn sat_count(&self) -> BigUint {
        let n = self.order().len();
        let mut cache = HashMap::new();
        let count = self.sat_count_from(self.root, &mut cache);
        count << self.level_index(self.root).min(n)
    }

    /// Level of a node, with terminals below the last variable.
    fn level_index(&self, node: Ref) -> usize {
        self.bdd
            .level(node)
            .map_or(self.order().len(), |level| level.index())
    }

    /// Satisfying assignments of the variables from the level of `node` downward.
    fn sat_count_from(&self, node: Ref, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        let count = match self.bdd.node(node) {
            Node::Terminal(value) => BigUint::from(value as u8),
            Node::Internal { level, high, low, .. } => {
                let skip_high = self.level_index(high) - level.index() - 1;
                let skip_low = self.level_index(low) - level.index() - 1;
                (self.sat_count_from(high, cache) << skip_high)
                    + (self.sat_count_from(low, cache) << skip_low)
            }
        };

        cache.insert(node, count.clone());
        count
    }

    /// One satisfying assignment, as the literals along a path to the true terminal.
    ///
    /// Variables not on the path are free. Returns `None` if the formula is unsatisfiable.
    pub fn one_sat(&self) -> Option<Vec<Lit>> {
        if self.is_false() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = self.root;

        // In a reduced diagram every node other than the false terminal has a path to true.
        while let Node::Internal { var, high, low, .. } = self.bdd.node(current) {
            if !self.bdd.is_zero(high) {
                path.push(var.pos());
                current = high;
            } else {
                path.push(var.neg());
                current = low;
            }
        }

        Some(path)
    }

    pub fn to_bracket_string(&self) -> String {
        self.bdd.to_bracket_string(self.root)
    }
}

impl Debug for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram")
            .field("order", &self.order().to_string())
            .field("root", &self.root)
            .field("live", &self.live_count())
            .field("store", &self.store_size())
            .finish()
    }
}

/// Build the diagram of a DNF formula under the given variable order string.
pub fn build_diagram(text: &str, order: &str) -> Result<Diagram> {
    build_diagram_with_order(text, VarOrder::parse(order)?)
}

/// Build the diagram of a DNF formula under a parsed variable order.
///
/// Normalizes the formula, builds one diagram per term and folds them
/// together with OR, starting from the false terminal.
pub fn build_diagram_with_order(text: &str, order: VarOrder) -> Result<Diagram> {
    let terms = normalize(text, &order);
    let bdd = Bdd::new(order);

    let mut root = bdd.zero();
    for term in &terms {
        let f = bdd.build_term(term)?;
        root = bdd.apply_or(root, f);
    }

    debug!(
        "build_diagram({:?}, order = {}) -> {} (store size = {})",
        text,
        bdd.order(),
        root,
        bdd.size()
    );
    Ok(Diagram::new(bdd, root))
}
