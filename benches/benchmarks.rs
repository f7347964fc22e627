use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use shootout::scenario::Scenario;
use shootout::search::{AlphaBeta, Minimax, Strategy};
use shootout::tree::GameTree;

fn terminals(depth: u32, branches: usize) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(0);
    (0..branches.pow(depth))
        .map(|_| rng.gen_range(-100..=100))
        .collect()
}

fn build_tree(c: &mut Criterion) {
    let terminals = terminals(8, 4);

    c.bench_function("build_tree", |b| {
        b.iter(|| GameTree::new(black_box(8), black_box(4), black_box(&terminals)))
    });
}

fn alphabeta(c: &mut Criterion) {
    let terminals = terminals(8, 4);
    let mut tree = GameTree::new(8, 4, &terminals).unwrap();

    c.bench_function("alphabeta", |b| {
        b.iter(|| AlphaBeta::evaluate(black_box(&mut tree), black_box(8)))
    });
}

fn minimax(c: &mut Criterion) {
    let terminals = terminals(8, 4);
    let tree = GameTree::new(8, 4, &terminals).unwrap();

    c.bench_function("minimax", |b| {
        b.iter(|| Minimax::evaluate(black_box(&tree), black_box(8)))
    });
}

fn scenario(c: &mut Criterion) {
    let scenario = Scenario {
        turns: 3,
        initial_hp: 100,
        bullets: 5,
        damage: (1, 20),
        seed: Some(0),
    };

    c.bench_function("scenario", |b| {
        b.iter(|| black_box(&scenario).run(Strategy::AlphaBeta))
    });
}

criterion_group!(benches, build_tree, alphabeta, minimax, scenario);
criterion_main!(benches);
