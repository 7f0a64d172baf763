use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nfa::{
    prelude::*,
    random::{generate_random_nfa, generate_random_word},
};

fn simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("accepts");
    for size in [8, 32, 128] {
        let nfa = generate_random_nfa(size, 4, 0.05);
        let words: Vec<_> = (0..64)
            .map(|_| generate_random_word(&nfa, 16, 64))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                words
                    .iter()
                    .filter(|word| nfa.accepts_tokens(black_box(word.as_slice())).unwrap_or(false))
                    .count()
            })
        });
    }
    group.finish();
}

fn closure(c: &mut Criterion) {
    let nfa = generate_random_nfa(256, 2, 0.01);
    c.bench_function("epsilon_closure", |b| {
        b.iter(|| {
            nfa.states()
                .iter()
                .map(|state| nfa.epsilon_closure([black_box(state.as_str())]).len())
                .sum::<usize>()
        })
    });
}

fn load_written(c: &mut Criterion) {
    let written = generate_random_nfa(64, 6, 0.1).to_string();
    c.bench_function("load", |b| b.iter(|| load(black_box(&written))));
}

criterion_group!(benches, simulate, closure, load_written);
criterion_main!(benches);
