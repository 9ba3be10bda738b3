//! # dnf-bdd: Reduced Ordered BDDs from DNF Formulas
//!
//! **`dnf-bdd`** turns a boolean formula in disjunctive normal form, such as
//! `AB + !AC`, into a reduced ordered binary decision diagram, evaluates it
//! under complete assignments, and searches for a variable order that makes
//! the diagram small.
//!
//! ## What is a BDD?
//!
//! A Binary Decision Diagram represents a boolean function as a directed acyclic graph.
//! It is **canonical**: for a fixed variable ordering, every boolean function has exactly
//! one reduced representation. Two reductions keep it that way:
//!
//! - no node has identical high and low children (**redundancy**);
//! - no two nodes decide the same level with the same children (**isomorphism**).
//!
//! ## Pipeline
//!
//! ```text
//! text ──normalize──▶ terms ──build_term──▶ term diagrams ──apply_or──▶ diagram
//!                                                                       │
//!                                                     evaluate / live_count / to_dot
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use dnf_bdd::diagram::build_diagram;
//! use dnf_bdd::optimize::build_diagram_best_order;
//!
//! // 1. Build under an explicit order
//! let d = build_diagram("AB + !AC", "ABC").unwrap();
//!
//! // 2. Evaluate: bit i of the assignment is the i-th letter of the alphabet
//! assert_eq!(d.evaluate("110"), Ok(true));
//! assert_eq!(d.evaluate("100"), Ok(false));
//!
//! // 3. Let the optimizer pick an order; it is never worse than alphabetical
//! let best = build_diagram_best_order("AB + !AC").unwrap().unwrap();
//! assert!(best.live_count() <= d.live_count());
//! ```
//!
//! ## Core Components
//!
//! - **[`order`]**: variable order and rank table.
//! - **[`term`]**: DNF lexing and term normalization.
//! - **[`bdd`]**: the node store with hash-consing, term builder and OR combinator.
//! - **[`diagram`]**: whole-formula diagrams, evaluation and model counting.
//! - **[`optimize`]**: randomized variable-order search.
//! - **[`dot`]**: Graphviz rendering.

pub mod bdd;
pub mod cache;
pub mod diagram;
pub mod dot;
pub mod error;
pub mod eval;
pub mod node;
pub mod optimize;
pub mod order;
pub mod reference;
pub mod table;
pub mod term;
pub mod types;
pub mod utils;
