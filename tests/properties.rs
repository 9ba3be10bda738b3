use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use test_log::test;

use dnf_bdd::diagram::{build_diagram, build_diagram_with_order, Diagram};
use dnf_bdd::error::Error;
use dnf_bdd::node::Node;
use dnf_bdd::optimize::{build_diagram_best_order, Optimizer, OptimizerConfig};
use dnf_bdd::order::VarOrder;
use dnf_bdd::term::{eval_terms, normalize};
use dnf_bdd::types::Var;

/// Random DNF over the first `num_vars` letters, in mixed case.
fn random_formula<R: Rng>(rng: &mut R, num_vars: usize, num_terms: usize) -> String {
    let mut terms = Vec::new();
    for _ in 0..num_terms {
        let len = rng.gen_range(1..=num_vars.min(4));
        let mut term = String::new();
        for _ in 0..len {
            let var = Var::new(rng.gen_range(0..num_vars));
            if rng.gen_bool(0.4) {
                term.push('!');
            }
            if rng.gen_bool(0.3) {
                term.push(var.symbol().to_ascii_lowercase());
            } else {
                term.push(var.symbol());
            }
        }
        terms.push(term);
    }
    terms.join(" + ")
}

fn alphabet_order(num_vars: usize) -> VarOrder {
    VarOrder::alphabetical((0..num_vars).map(Var::new))
}

fn random_order<R: Rng>(rng: &mut R, num_vars: usize) -> VarOrder {
    alphabet_order(num_vars).shuffled(rng)
}

/// All assignments over the first `num_vars` letters.
fn assignments(num_vars: usize) -> impl Iterator<Item = String> {
    (0..1u32 << num_vars).map(move |bits| {
        (0..num_vars)
            .map(|i| if (bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    })
}

/// Evaluates the formula text as written, without normalizing it first.
fn eval_raw(text: &str, assignment: &str) -> bool {
    let bits = assignment.as_bytes();
    text.split('+').any(|term| {
        let mut negated = false;
        let mut seen_literal = false;
        let mut holds = true;
        for c in term.chars() {
            if c == '!' {
                negated = true;
            } else if c.is_ascii_alphabetic() {
                let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                let value = bits[index] == b'1';
                holds &= value != negated;
                seen_literal = true;
                negated = false;
            }
        }
        seen_literal && holds
    })
}

fn assert_reduced(d: &Diagram) {
    let bdd = d.bdd();
    let mut keys = HashSet::new();
    let mut terminals = HashSet::new();
    for (node, n) in bdd.nodes() {
        match n {
            Node::Terminal(value) => {
                assert!(terminals.insert(value), "duplicate terminal {}", node);
            }
            Node::Internal { level, high, low, .. } => {
                assert_ne!(high, low, "redundant node {}", node);
                assert!(keys.insert((level, high, low)), "isomorphic node {}", node);
            }
        }
    }
}

#[test]
fn test_canonical_store() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..50 {
        let num_vars = rng.gen_range(1..=8);
        let num_terms = rng.gen_range(1..=8);
        let text = random_formula(&mut rng, num_vars, num_terms);
        let order = random_order(&mut rng, num_vars);
        let d = build_diagram_with_order(&text, order).unwrap();
        assert_reduced(&d);
    }
}

#[test]
fn test_equivalent_to_direct_evaluation() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..40 {
        let num_vars = rng.gen_range(1..=10);
        let num_terms = rng.gen_range(1..=10);
        let text = random_formula(&mut rng, num_vars, num_terms);
        let order = random_order(&mut rng, num_vars);
        let terms = normalize(&text, &order);
        let d = build_diagram_with_order(&text, order).unwrap();
        for a in assignments(num_vars) {
            let expected = eval_raw(&text, &a);
            assert_eq!(eval_terms(&terms, &a).unwrap(), expected, "normalized {:?} at {}", text, a);
            assert_eq!(
                d.evaluate(&a).unwrap(),
                expected,
                "formula {:?} under {} at {}",
                text,
                d.order(),
                a
            );
        }
    }
}

#[test]
fn test_order_invariance() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..30 {
        let num_vars = rng.gen_range(2..=7);
        let num_terms = rng.gen_range(1..=6);
        let text = random_formula(&mut rng, num_vars, num_terms);
        let d1 = build_diagram_with_order(&text, random_order(&mut rng, num_vars)).unwrap();
        let d2 = build_diagram_with_order(&text, random_order(&mut rng, num_vars)).unwrap();
        for a in assignments(num_vars) {
            assert_eq!(d1.evaluate(&a), d2.evaluate(&a));
        }
        assert_eq!(d1.sat_count(), d2.sat_count());
    }
}

#[test]
fn test_canonical_for_equivalent_formulas() {
    // Same function, written differently: identical live size under one order.
    let pairs = [
        ("AB + A!B", "A"),
        ("A + AB + ABC", "A"),
        ("A!B + !AB + AB", "A + B"),
        ("!A!B + !AB + A!B + AB", "A + !A"),
    ];
    for (lhs, rhs) in pairs {
        let d1 = build_diagram(lhs, "ABC").unwrap();
        let d2 = build_diagram(rhs, "ABC").unwrap();
        assert_eq!(d1.live_count(), d2.live_count(), "{} vs {}", lhs, rhs);
    }
}

#[test]
fn test_optimizer_never_worse() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for _ in 0..20 {
        let num_vars = rng.gen_range(2..=8);
        let num_terms = rng.gen_range(1..=8);
        let text = random_formula(&mut rng, num_vars, num_terms);
        let natural = VarOrder::alphabetical(dnf_bdd::term::variables(&text));
        let baseline = build_diagram_with_order(&text, natural).unwrap();
        let config = OptimizerConfig::new().with_seed(rng.gen());
        let (best, stats) = Optimizer::new(config).run(&text).unwrap().unwrap();
        assert!(best.live_count() <= baseline.live_count());
        assert_eq!(stats.initial_size, baseline.live_count());
        assert_reduced(&best);
    }
}

#[test]
fn test_best_order_default_search() {
    let text = "AD + BE + CF";
    let baseline = build_diagram(text, "ABCDEF").unwrap();
    let best = build_diagram_best_order(text).unwrap().unwrap();
    assert!(best.live_count() <= baseline.live_count());
    for a in assignments(6) {
        assert_eq!(best.evaluate(&a), baseline.evaluate(&a));
    }
}

#[test]
fn test_small_formulas() {
    let d = build_diagram("AB+!AC", "ABC").unwrap();
    assert_eq!(d.evaluate("110"), Ok(true));
    assert_eq!(d.evaluate("001"), Ok(true));
    assert_eq!(d.evaluate("100"), Ok(false));

    for order in ["AB", "BA"] {
        let d = build_diagram("A!B+!AB", order).unwrap();
        assert_eq!(d.live_count(), 3 + 2);
    }

    let order = VarOrder::parse("BAC").unwrap();
    let terms = normalize("CBA", &order);
    let vars: Vec<char> = terms[0].vars().map(|v| v.symbol()).collect();
    assert_eq!(vars, vec!['B', 'A', 'C']);
    assert_eq!(normalize("AA", &order)[0].len(), 1);
    assert!(normalize("A!A", &order).is_empty());
}

#[test]
fn test_assignment_uses_alphabet_positions() {
    // Order ZA puts Z on top, but its bit is still the 26th character.
    let d = build_diagram("Z!A", "ZA").unwrap();
    let mut bits = vec![b'0'; 26];
    bits[25] = b'1';
    let a = String::from_utf8(bits).unwrap();
    assert_eq!(d.evaluate(&a), Ok(true));
    assert!(d.evaluate("0").is_err());
}

#[test]
fn test_malformed_assignment_is_rejected() {
    let d = build_diagram("AB", "AB").unwrap();
    assert_eq!(d.evaluate("00"), Ok(false));
    assert_eq!(
        d.evaluate("0x"),
        Err(Error::InvalidAssignment { index: 1, value: 'x' })
    );

    let d = build_diagram("C", "ABC").unwrap();
    assert_eq!(d.evaluate("001"), Ok(true));
    assert_eq!(
        d.evaluate("é01"),
        Err(Error::InvalidAssignment { index: 0, value: 'é' })
    );
}

#[test]
fn test_raw_text_oracle_with_noise() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    for _ in 0..100 {
        let num_vars = rng.gen_range(1..=6);
        let num_terms = rng.gen_range(1..=6);
        // Stray separators and an empty trailing term must not change the function.
        let text = format!("{} + ", random_formula(&mut rng, num_vars, num_terms).replace(' ', " ; "));
        let d = build_diagram_with_order(&text, alphabet_order(num_vars)).unwrap();
        for a in assignments(num_vars) {
            assert_eq!(d.evaluate(&a).unwrap(), eval_raw(&text, &a), "formula {:?} at {}", text, a);
        }
    }
}

#[test]
fn test_shuffled_orders_cover_permutations() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut seen = HashSet::new();
    let order = alphabet_order(3);
    for _ in 0..200 {
        seen.insert(order.shuffled(&mut rng).to_string());
    }
    assert_eq!(seen.len(), 6);

    let mut vars = order.vars().to_vec();
    vars.shuffle(&mut rng);
    assert!(VarOrder::from_vars(vars).is_ok());
}
