use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use compact_suffix_tree::{construct, random_text, Alphabet, BuildStrategy};

/// Benchmarks comparing direct incremental construction against building the
/// full suffix trie and compacting it.

fn synthetic_text(len: usize) -> String {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(42);
    random_text(&mut rng, len, Alphabet::Letters)
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group.measurement_time(Duration::from_secs(10));

    for len in [100, 500, 1000] {
        let text = synthetic_text(len);
        for strategy in BuildStrategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.name(), len), &text, |b, text| {
                b.iter(|| construct([black_box(text.as_str())], strategy));
            });
        }
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let text = synthetic_text(1000);
    let patterns: Vec<&str> = (0..100).map(|i| &text[i * 9..i * 9 + 8]).collect();

    for strategy in BuildStrategy::ALL {
        let Ok(tree) = construct([text.as_str()], strategy) else {
            continue;
        };
        group.bench_function(BenchmarkId::new("search", strategy.name()), |b| {
            b.iter(|| {
                for pattern in &patterns {
                    black_box(tree.search(black_box(pattern)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_search);
criterion_main!(benches);
