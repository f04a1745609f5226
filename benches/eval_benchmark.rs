//! Criterion benchmarks for the evaluation pipeline.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use safexpr::{evaluate, policy};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for (name, expr) in [
        ("simple", "2 + 3 * 4"),
        ("parens", "((2 + 3) * (4 - 1)) / 5"),
        ("functions", "sqrt(16) + sin(pi / 4) * exp(1)"),
        ("mixed", "sqrt(abs(-16)) ^ (1 + 1) % 7"),
    ] {
        group.bench_function(name, |b| b.iter(|| evaluate(black_box(expr))));
    }

    group.finish();
}

fn bench_rejections(c: &mut Criterion) {
    let mut group = c.benchmark_group("rejections");

    let deep = format!("{}1{}", "(".repeat(120), ")".repeat(120));
    group.bench_function("depth_guard", |b| b.iter(|| evaluate(black_box(&deep))));

    group.bench_function("denylist", |b| b.iter(|| evaluate(black_box("eval(1)"))));

    let long = "1".repeat(policy::MAX_LENGTH + 1);
    group.bench_function("too_long", |b| b.iter(|| evaluate(black_box(&long))));

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_rejections);
criterion_main!(benches);
