//! Diagram to DOT (Graphviz) conversion.
//!
//! Conventions of the generated graph:
//! - **Terminal nodes** (0 and 1) are squares at the bottom (sink rank)
//! - **Decision nodes** are circles labelled with their variable, one rank per level
//! - **Edges**: solid for high (variable = 1), dashed for low (variable = 0)
//! - **Root** is a rectangle at the top (source rank) labelled with the order
//!
//! ```
//! use dnf_bdd::diagram::build_diagram;
//!
//! let d = build_diagram("AB + !C", "ABC").unwrap();
//! let dot = d.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("digraph {"));
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::diagram::Diagram;
use crate::node::Node;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for the root marker (default: "rect")
    pub root_shape: &'static str,
    /// Style for high edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Whether to append node ids to labels (default: false)
    pub show_ids: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            show_ids: false,
        }
    }
}

impl Diagram {
    /// Converts the live part of the diagram to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the live part of the diagram to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let bdd = self.bdd();
        let live = bdd.descendants(self.root());

        // Group decision nodes by level, terminals go last.
        let mut levels = BTreeMap::<usize, Vec<_>>::new();
        let mut terminals = Vec::new();
        for &node in &live {
            match bdd.node(node) {
                Node::Terminal(value) => terminals.push((node, value)),
                Node::Internal { var, level, high, low } => {
                    levels.entry(level.index()).or_default().push((node, var, high, low));
                }
            }
        }
        terminals.sort();
        for nodes in levels.values_mut() {
            nodes.sort();
        }

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        writeln!(dot, "{{ rank=sink")?;
        for &(node, value) in &terminals {
            writeln!(
                dot,
                "{} [shape={}, label=\"{}\"];",
                node.id(),
                config.terminal_shape,
                value as u8
            )?;
        }
        writeln!(dot, "}}")?;

        for nodes in levels.values() {
            writeln!(dot, "{{ rank=same")?;
            for &(node, var, _, _) in nodes {
                if config.show_ids {
                    writeln!(dot, "{} [label=\"{}{}\"];", node.id(), var, node)?;
                } else {
                    writeln!(dot, "{} [label=\"{}\"];", node.id(), var)?;
                }
            }
            writeln!(dot, "}}")?;
        }

        for nodes in levels.values() {
            for &(node, _, high, low) in nodes {
                writeln!(dot, "{} -> {} [style={}];", node.id(), high.id(), config.high_edge_style)?;
                writeln!(dot, "{} -> {} [style={}];", node.id(), low.id(), config.low_edge_style)?;
            }
        }

        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "r [shape={}, label=\"{}\"];", config.root_shape, self.order())?;
        writeln!(dot, "}}")?;
        writeln!(dot, "r -> {};", self.root().id())?;

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::diagram::build_diagram;

    #[test]
    fn test_to_dot_basic() {
        let d = build_diagram("!AB", "AB").unwrap();
        let dot = d.to_dot().unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("label=\"A\""));
        assert!(dot.contains("label=\"B\""));
        assert!(dot.contains("r -> "));
    }

    #[test]
    fn test_to_dot_only_live_nodes() {
        let d = build_diagram("AB + A!B", "AB").unwrap();
        let dot = d.to_dot().unwrap();
        // Only A survives, B nodes of the term diagrams are stale.
        assert!(!dot.contains("label=\"B\""));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }

    #[test]
    fn test_to_dot_constant() {
        let d = build_diagram("", "A").unwrap();
        let dot = d.to_dot().unwrap();
        assert!(dot.contains("label=\"0\""));
        assert!(!dot.contains("label=\"1\""));
    }

    #[test]
    fn test_to_dot_with_config() {
        let d = build_diagram("A", "A").unwrap();
        let config = DotConfig {
            show_ids: true,
            low_edge_style: "dotted",
            ..DotConfig::default()
        };
        let dot = d.to_dot_with_config(&config).unwrap();
        assert!(dot.contains(&format!("label=\"A{}\"", d.root())));
        assert!(dot.contains("style=dotted"));
    }
}
