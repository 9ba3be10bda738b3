//! Node store and the core diagram algorithms.
//!
//! A [`Bdd`] owns every node created under one [`VarOrder`]. Nodes live in an
//! append-only [`Table`] and are addressed by [`Ref`] handles. Every node is
//! created through [`Bdd::mk_node`], which enforces both reductions:
//!
//! - **redundancy**: a node whose high and low children coincide is never
//!   created, the child is returned instead;
//! - **isomorphism**: a node with the same `(level, high, low)` as an existing
//!   one is never duplicated, the existing handle is returned.
//!
//! On top of the store sit the term builder ([`Bdd::build_term`]), the OR
//! combinator ([`Bdd::apply_or`]) and the reachability pass
//! ([`Bdd::descendants`]). The store keeps nodes that later become
//! unreachable, so the live size of a function must always be recomputed
//! from its root.

use std::cell::RefCell;
use std::cmp::min;
use std::collections::HashSet;
use std::fmt::Debug;

use log::debug;

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::order::VarOrder;
use crate::reference::Ref;
use crate::table::Table;
use crate::term::Term;
use crate::types::{Level, Var};

type Storage = Table<Node>;

pub struct Bdd {
    order: VarOrder,
    storage: RefCell<Storage>,
    cache: RefCell<Cache<(Ref, Ref), Ref>>,
}

impl Bdd {
    /// Create a node store for the given order with `2^bits` hash buckets.
    pub fn with_capacity(order: VarOrder, bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let cache_bits = min(bits, 16);

        Self {
            order,
            storage: RefCell::new(Storage::new(bits)),
            cache: RefCell::new(Cache::new(cache_bits)),
        }
    }

    pub fn new(order: VarOrder) -> Self {
        Self::with_capacity(order, 12)
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("order", &self.order.to_string())
            .field("buckets", &storage.buckets())
            .field("size", &storage.len())
            .finish()
    }
}

impl Bdd {
    pub fn order(&self) -> &VarOrder {
        &self.order
    }

    /// Number of nodes ever allocated in this store, reachable or not.
    pub fn size(&self) -> usize {
        self.storage.borrow().len()
    }

    pub fn cache(&self) -> std::cell::Ref<'_, Cache<(Ref, Ref), Ref>> {
        self.cache.borrow()
    }

    /// The node behind a handle, if the handle belongs to this store.
    pub fn get(&self, node: Ref) -> Option<Node> {
        self.storage.borrow().get(node.index()).copied()
    }

    /// The node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this store.
    pub fn node(&self, node: Ref) -> Node {
        *self.storage.borrow().value(node.index())
    }

    /// All nodes of the store in creation order.
    pub fn nodes(&self) -> Vec<(Ref, Node)> {
        self.storage
            .borrow()
            .iter()
            .map(|(i, &node)| (Ref::new(i as u32), node))
            .collect()
    }

    pub fn terminal_value(&self, node: Ref) -> Option<bool> {
        self.node(node).value()
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        self.node(node).is_terminal()
    }
    pub fn is_zero(&self, node: Ref) -> bool {
        self.terminal_value(node) == Some(false)
    }
    pub fn is_one(&self, node: Ref) -> bool {
        self.terminal_value(node) == Some(true)
    }

    /// Level of an internal node, `None` for terminals.
    pub fn level(&self, node: Ref) -> Option<Level> {
        self.node(node).level()
    }

    /// The unique terminal carrying `value`, created on first use.
    pub fn mk_terminal(&self, value: bool) -> Ref {
        let i = self.storage.borrow_mut().put(Node::Terminal(value));
        Ref::new(i as u32)
    }

    pub fn zero(&self) -> Ref {
        self.mk_terminal(false)
    }

    pub fn one(&self) -> Ref {
        self.mk_terminal(true)
    }

    /// The canonical internal node deciding `var` at `level`.
    pub fn mk_node(&self, var: Var, level: Level, high: Ref, low: Ref) -> Ref {
        debug!("mk(var = {}, level = {}, high = {}, low = {})", var, level, high, low);

        debug_assert_eq!(self.order.var_at(level), Some(var), "Variable does not sit at {}", level);
        debug_assert!(self.child_below(high, level), "High child above {}", level);
        debug_assert!(self.child_below(low, level), "Low child above {}", level);

        // Handle duplicates
        if high == low {
            debug!("mk: redundant {} == {}", high, low);
            return high;
        }

        let node = Node::Internal { var, level, high, low };
        let mut storage = self.storage.borrow_mut();
        if let Some(i) = storage.find(&node) {
            debug!("mk: isomorphic to @{}", i);
            return Ref::new(i as u32);
        }
        let i = storage.add(node);
        Ref::new(i as u32)
    }

    fn child_below(&self, child: Ref, level: Level) -> bool {
        self.get(child).and_then(|n| n.level()).map_or(true, |l| l > level)
    }

    /// The single-variable function `var` (must be declared in the order).
    pub fn mk_var(&self, var: Var) -> Result<Ref> {
        let level = self.order.level(var).ok_or(Error::UndeclaredVariable(var))?;
        Ok(self.mk_node(var, level, self.one(), self.zero()))
    }

    /// Returns `(high, low)` cofactors of `node` with respect to the variable at `level`.
    ///
    /// A node below that level does not decide it, so both cofactors are the node itself.
    pub fn top_cofactors(&self, node: Ref, level: Level) -> (Ref, Ref) {
        match self.node(node) {
            Node::Internal { level: l, high, low, .. } if l == level => (high, low),
            Node::Internal { level: l, .. } => {
                assert!(l > level, "Node {} at {} is above {}", node, l, level);
                (node, node)
            }
            Node::Terminal(_) => (node, node),
        }
    }
}

impl Bdd {
    /// Build the diagram that is true exactly on the assignments satisfying `term`.
    ///
    /// Every variable of the term must be declared in the order; a
    /// variable the order does not mention would otherwise be ignored.
    pub fn build_term(&self, term: &Term) -> Result<Ref> {
        if let Some(var) = term.vars().find(|&v| !self.order.contains(v)) {
            return Err(Error::UndeclaredVariable(var));
        }
        let res = self.build_term_from(term, Level::new(0));
        debug!("build_term({}) -> {}", term, res);
        Ok(res)
    }

    fn build_term_from(&self, term: &Term, level: Level) -> Ref {
        let Some(var) = self.order.var_at(level) else {
            // All variables decided: the term holds.
            return self.one();
        };

        let rest = self.build_term_from(term, level.next());
        let (high, low) = match term.lit_of(var) {
            Some(lit) if lit.is_positive() => (rest, self.zero()),
            Some(_) => (self.zero(), rest),
            None => (rest, rest),
        };
        self.mk_node(var, level, high, low)
    }

    /// Apply the OR operation to two diagrams of this store.
    ///
    /// ```
    /// use dnf_bdd::bdd::Bdd;
    /// use dnf_bdd::order::VarOrder;
    /// use dnf_bdd::types::Var;
    ///
    /// let bdd = Bdd::new(VarOrder::parse("AB").unwrap());
    /// let a = bdd.mk_var(Var::new(0)).unwrap();
    /// let b = bdd.mk_var(Var::new(1)).unwrap();
    /// let f = bdd.apply_or(a, b);
    /// assert_eq!(bdd.apply_or(f, a), f);
    /// assert_eq!(bdd.apply_or(f, bdd.zero()), f);
    /// assert!(bdd.is_one(bdd.apply_or(f, bdd.one())));
    /// ```
    pub fn apply_or(&self, f: Ref, g: Ref) -> Ref {
        debug!("apply_or(f = {}, g = {})", f, g);

        // Base cases:
        //   1 ∨ G => 1,  F ∨ 1 => 1
        //   0 ∨ G => G,  F ∨ 0 => F
        //   F ∨ F => F
        match (self.terminal_value(f), self.terminal_value(g)) {
            (Some(true), _) | (_, Some(true)) => {
                debug!("or: one");
                return self.one();
            }
            (Some(false), _) => {
                debug!("or: 0 ∨ G => G");
                return g;
            }
            (_, Some(false)) => {
                debug!("or: F ∨ 0 => F");
                return f;
            }
            (None, None) => {}
        }
        if f == g {
            debug!("or: F ∨ F => F");
            return f;
        }

        // OR is commutative
        let key = if f < g { (f, g) } else { (g, f) };
        if let Some(&res) = self.cache.borrow().get(&key) {
            debug!("cache: apply_or(f = {}, g = {}) -> {}", f, g, res);
            return res;
        }

        let fnode = self.node(f);
        let gnode = self.node(g);
        let (var, level) = match (fnode, gnode) {
            (
                Node::Internal { var: fv, level: fl, .. },
                Node::Internal { var: gv, level: gl, .. },
            ) => {
                if fl <= gl {
                    (fv, fl)
                } else {
                    (gv, gl)
                }
            }
            _ => unreachable!("terminal operands are handled above"),
        };
        debug!("top variable = {} at {}", var, level);

        let (f1, f0) = self.top_cofactors(f, level);
        let (g1, g0) = self.top_cofactors(g, level);

        let high = self.apply_or(f1, g1);
        let low = self.apply_or(f0, g0);

        let res = self.mk_node(var, level, high, low);
        debug!("computed: apply_or(f = {}, g = {}) -> {}", f, g, res);
        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// Fold OR over many diagrams, starting from the false terminal.
    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        let mut res = self.zero();
        for node in nodes {
            res = self.apply_or(res, node);
        }
        res
    }

    /// Collect all nodes reachable from `root`, the root and terminals included.
    pub fn descendants(&self, root: Ref) -> HashSet<Ref> {
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let Some((high, low)) = self.node(node).children() {
                stack.push(high);
                stack.push(low);
            }
        }

        visited
    }

    /// Number of nodes reachable from `root` (terminals included).
    pub fn count_nodes(&self, root: Ref) -> usize {
        self.descendants(root).len()
    }

    pub fn to_bracket_string(&self, node: Ref) -> String {
        match self.node(node) {
            Node::Terminal(value) => format!("({})", value as u8),
            Node::Internal { var, high, low, .. } => format!(
                "{}:({}, {}, {})",
                node,
                var,
                self.to_bracket_string(high),
                self.to_bracket_string(low)
            ),
        }
    }
}
