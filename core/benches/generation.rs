use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use voxmine_core::*;

fn generate(c: &mut Criterion) {
    let rules = RulesConfig::default();
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = rules.grid_config(difficulty).unwrap();
        group.bench_function(difficulty.label(), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomGridGenerator::new(seed).generate(config).unwrap())
            })
        });
    }
    group.finish();
}

fn cascade(c: &mut Criterion) {
    let rules = RulesConfig {
        cascade_chance: 1.0,
        ..Default::default()
    };
    c.bench_function("cascade/hard/full", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut round = Round::new(rules, ScoreStore::new(MemoryStore::new()), seed).unwrap();
            round.start(Difficulty::Hard).unwrap();
            let start = round
                .grid()
                .unwrap()
                .iter_coords()
                .find(|&coords| !round.grid().unwrap().contains_trigger(coords))
                .unwrap();
            black_box(round.reveal_at(start).unwrap())
        })
    });
}

criterion_group!(benches, generate, cascade);
criterion_main!(benches);
