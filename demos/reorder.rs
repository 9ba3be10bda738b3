//! Variable order impact and randomized order search.
//!
//! Run with:
//! ```bash
//! cargo run --example reorder -- 5
//! ```

use clap::Parser;

use dnf_bdd::diagram::build_diagram;
use dnf_bdd::optimize::{Optimizer, OptimizerConfig};
use dnf_bdd::types::Var;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of variable pairs (at most 13).
    #[arg(value_name = "INT", default_value = "4")]
    n: usize,

    /// Additional random orders to try.
    #[arg(long, value_name = "INT", default_value = "100")]
    extra: usize,

    /// Random seed.
    #[arg(long, value_name = "INT", default_value = "42")]
    seed: u64,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);
    let n = args.n.clamp(1, Var::COUNT / 2);

    // f = x1 y1 + x2 y2 + ... + xn yn, with x_i = i-th letter and y_i = (n+i)-th letter.
    let xs: Vec<Var> = (0..n).map(Var::new).collect();
    let ys: Vec<Var> = (n..2 * n).map(Var::new).collect();
    let formula = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| format!("{}{}", x, y))
        .collect::<Vec<_>>()
        .join(" + ");
    println!("formula = {}", formula);

    let separated: String = xs.iter().chain(&ys).map(|v| v.symbol()).collect();
    let interleaved: String = xs.iter().zip(&ys).flat_map(|(x, y)| [x.symbol(), y.symbol()]).collect();

    for order in [&separated, &interleaved] {
        let d = build_diagram(&formula, order)?;
        println!("order {:>26}: {} live nodes, {} allocated", order, d.live_count(), d.store_size());
    }

    let config = OptimizerConfig::new()
        .with_extra_attempts(args.extra)
        .with_seed(args.seed);
    if let Some((d, stats)) = Optimizer::new(config).run(&formula)? {
        println!("best order {}: {} live nodes", d.order(), d.live_count());
        println!("stats = {:?}", stats);
        println!("reduction = {:.1}%", stats.reduction_percent());
    }

    Ok(())
}
