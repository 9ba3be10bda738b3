//! Build, query and optionally optimize the diagram of a DNF formula.
//!
//! Run with:
//! ```bash
//! cargo run --example dnf -- "AB + !AC" --order ABC --assignment 110
//! cargo run --example dnf -- "AE + BF + CG + DH" --optimize --seed 42 --dot
//! ```

use clap::Parser;
use color_eyre::eyre::eyre;

use dnf_bdd::diagram::{build_diagram, Diagram};
use dnf_bdd::optimize::{Optimizer, OptimizerConfig};
use dnf_bdd::order::VarOrder;
use dnf_bdd::term::{normalize, variables};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// DNF formula, e.g. "AB + !AC".
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Variable order (defaults to the formula's variables, alphabetically).
    #[arg(long, value_name = "VARS")]
    order: Option<String>,

    /// Search for a smaller variable order.
    #[arg(long)]
    optimize: bool,

    /// Random orders tried per variable when optimizing.
    #[arg(long, value_name = "INT", default_value = "2")]
    attempts: usize,

    /// Random seed for the order search.
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,

    /// Assignments to evaluate, one bit per alphabet letter (A first).
    #[arg(long, value_name = "BITS")]
    assignment: Vec<String>,

    /// Print the diagram in DOT format.
    #[arg(long)]
    dot: bool,

    /// Log level.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: simplelog::LevelFilter,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let diagram = if args.optimize {
        let mut config = OptimizerConfig::new().with_attempts_per_var(args.attempts);
        if let Some(seed) = args.seed {
            config = config.with_seed(seed);
        }
        let (diagram, stats) = Optimizer::new(config)
            .run(&args.formula)?
            .ok_or_else(|| eyre!("formula {:?} has no variables", args.formula))?;
        println!("stats = {:?}", stats);
        diagram
    } else {
        let order = match &args.order {
            Some(order) => order.clone(),
            None => VarOrder::alphabetical(variables(&args.formula)).to_string(),
        };
        build_diagram(&args.formula, &order)?
    };

    report(&args, &diagram)?;

    println!("Done in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}

fn report(args: &Cli, diagram: &Diagram) -> color_eyre::Result<()> {
    println!("formula = {}", args.formula);
    println!("order = {}", diagram.order());

    let terms = normalize(&args.formula, diagram.order());
    let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
    println!("terms = {}", terms.join(" + "));

    println!("diagram = {:?}", diagram);
    println!("root = {}", diagram.to_bracket_string());
    println!("live nodes = {} (store size = {})", diagram.live_count(), diagram.store_size());
    println!("satisfying assignments = {}", diagram.sat_count());
    match diagram.one_sat() {
        Some(path) => {
            let path: Vec<String> = path.iter().map(|lit| lit.to_string()).collect();
            println!("one sat = {}", path.join(" "));
        }
        None => println!("one sat = none"),
    }

    for assignment in &args.assignment {
        let value = diagram.evaluate(assignment)?;
        println!("f({}) = {}", assignment, value as u8);
    }

    if args.dot {
        println!("{}", diagram.to_dot()?);
    }

    Ok(())
}
