//! Variable order search.
//!
//! # Why Ordering Matters
//!
//! The size of the reduced diagram of a formula depends heavily on the
//! variable order. For `f = (x₁ ∧ y₁) ∨ (x₂ ∧ y₂) ∨ ... ∨ (xₙ ∧ yₙ)`:
//!
//! - **Good ordering** (x₁, y₁, x₂, y₂, ..., xₙ, yₙ): O(n) nodes
//! - **Bad ordering** (x₁, x₂, ..., xₙ, y₁, y₂, ..., yₙ): O(2ⁿ) nodes
//!
//! Finding the optimal order is NP-complete. This module performs a
//! randomized search instead: the formula is built once under the
//! alphabetical order, then again under a number of random permutations,
//! and the diagram with the smallest live node count is kept. The result is
//! never larger than the alphabetical baseline, but need not be minimal.
//!
//! Each attempt builds into its own node store, so attempts are independent
//! and losing candidates are dropped whole.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::diagram::{build_diagram_with_order, Diagram};
use crate::error::Result;
use crate::order::VarOrder;
use crate::term::variables;

/// Search effort and reproducibility settings.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Random orders tried per formula variable.
    pub attempts_per_var: usize,
    /// Additional random orders on top of `attempts_per_var * n`.
    pub extra_attempts: usize,
    /// Random seed (None for OS entropy)
    pub seed: Option<u64>,
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self {
            attempts_per_var: 2,
            extra_attempts: 0,
            seed: None,
        }
    }

    pub fn with_attempts_per_var(mut self, attempts: usize) -> Self {
        self.attempts_per_var = attempts;
        self
    }

    pub fn with_extra_attempts(mut self, attempts: usize) -> Self {
        self.extra_attempts = attempts;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of random orders tried for a formula over `num_vars` variables.
    pub fn attempts(&self, num_vars: usize) -> usize {
        self.attempts_per_var * num_vars + self.extra_attempts
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics collected during the search.
#[derive(Debug, Clone, Default)]
pub struct OptimizeStats {
    /// Number of random orders tried (the alphabetical baseline excluded)
    pub attempts: usize,
    /// Live node count under the alphabetical order
    pub initial_size: usize,
    /// Live node count of the returned diagram
    pub best_size: usize,
    /// Number of times a strictly smaller diagram was found
    pub improvements: usize,
}

impl OptimizeStats {
    /// Calculate the size reduction ratio.
    pub fn reduction_ratio(&self) -> f64 {
        if self.initial_size == 0 {
            return 0.0;
        }
        1.0 - (self.best_size as f64 / self.initial_size as f64)
    }

    /// Calculate the percentage reduction.
    pub fn reduction_percent(&self) -> f64 {
        self.reduction_ratio() * 100.0
    }
}

pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Search for a small diagram of `text`, seeding the generator from the config.
    ///
    /// Returns `None` if the formula mentions no variables.
    pub fn run(&self, text: &str) -> Result<Option<(Diagram, OptimizeStats)>> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.run_with_rng(text, &mut rng)
    }

    /// Search for a small diagram of `text` using the given random generator.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<Option<(Diagram, OptimizeStats)>> {
        let vars = variables(text);
        if vars.is_empty() {
            debug!("optimize: no variables in {:?}", text);
            return Ok(None);
        }

        let natural = VarOrder::alphabetical(vars);
        let mut best = build_diagram_with_order(text, natural.clone())?;
        let mut best_size = best.live_count();

        let mut stats = OptimizeStats {
            initial_size: best_size,
            ..Default::default()
        };
        debug!("optimize: order {} -> {} nodes", natural, best_size);

        for _ in 0..self.config.attempts(natural.len()) {
            let order = natural.shuffled(rng);
            let candidate = build_diagram_with_order(text, order)?;
            let size = candidate.live_count();
            stats.attempts += 1;
            debug!("optimize: order {} -> {} nodes", candidate.order(), size);

            if size < best_size {
                info!(
                    "optimize: order {} improves {} -> {} nodes",
                    candidate.order(),
                    best_size,
                    size
                );
                best = candidate;
                best_size = size;
                stats.improvements += 1;
            }
        }

        stats.best_size = best_size;
        info!(
            "optimize: best order {} with {} nodes ({} attempts, {:.1}% smaller)",
            best.order(),
            best_size,
            stats.attempts,
            stats.reduction_percent()
        );
        Ok(Some((best, stats)))
    }
}

/// Build the diagram of `text` under the best variable order found by a
/// default randomized search.
///
/// Returns `None` if the formula mentions no variables.
pub fn build_diagram_best_order(text: &str) -> Result<Option<Diagram>> {
    let res = Optimizer::new(OptimizerConfig::default()).run(text)?;
    Ok(res.map(|(diagram, _)| diagram))
}
