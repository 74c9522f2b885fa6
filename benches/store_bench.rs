#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use factbase::{
    CacheStore, Dataset, GroundTuple, IndexStore, IndexedDataset, PatternTuple, Rule, Store, Term,
};

/// A graph with 1000 nodes and 5 outgoing edges each, plus a `node` fact per node
fn large_graph() -> Dataset {
    let mut facts = Vec::new();
    for i in 0..1000 {
        facts.push(GroundTuple::new(["node".to_string(), format!("node_{i}")]));
        for j in 0..5 {
            let next = (i + j + 1) % 1000;
            facts.push(GroundTuple::new([
                "edge".to_string(),
                format!("node_{i}"),
                format!("node_{next}"),
            ]));
        }
    }

    let path = Rule::new(
        PatternTuple::new([Term::constant("path"), Term::variable("x"), Term::variable("y")]),
        vec![PatternTuple::new([
            Term::constant("edge"),
            Term::variable("x"),
            Term::variable("y"),
        ])],
    );

    Dataset::new(facts, vec![path])
}

fn edge_probe() -> PatternTuple {
    PatternTuple::new([Term::constant("edge"), Term::variable("x"), Term::variable("y")])
}

/// Benchmark for the eager index build
fn bench_index_construction(c: &mut Criterion) {
    let dataset = large_graph();

    c.bench_function("index_construction", |b| {
        b.iter(|| {
            let indexed: IndexedDataset = black_box(dataset.clone()).into();
            black_box(indexed)
        });
    });
}

/// Benchmark comparing an indexed scan with a filtered full scan
fn bench_scan_index_vs_full_scan(c: &mut Criterion) {
    let indexed: IndexedDataset = large_graph().into();
    let probe = edge_probe();

    c.bench_function("scan_index", |b| {
        b.iter(|| black_box(indexed.scan_index(black_box(&probe)).map(Iterator::count)));
    });

    c.bench_function("full_scan_filter", |b| {
        b.iter(|| {
            black_box(
                indexed
                    .tuples()
                    .filter(|tuple| tuple.first() == probe.first().and_then(Term::as_constant))
                    .filter(|tuple| tuple.arity() == probe.arity())
                    .count(),
            )
        });
    });
}

/// Benchmark for merging two overlapping snapshots
fn bench_merge(c: &mut Criterion) {
    let a = large_graph();
    let b = Dataset::new(
        (0..1000).map(|i| GroundTuple::new(["node".to_string(), format!("extra_{i}")])),
        Vec::new(),
    );

    c.bench_function("merge_dataset", |bench| {
        bench.iter(|| black_box(a.merge(black_box(&b))));
    });

    let indexed: IndexedDataset = a.clone().into();
    c.bench_function("merge_indexed", |bench| {
        bench.iter(|| black_box::<IndexedDataset>(indexed.merge(black_box(&b))));
    });
}

/// Benchmark for recording derived tuples in the memo
fn bench_cache_tuple(c: &mut Criterion) {
    let dataset = large_graph();
    let rule = dataset.rules().next().cloned();

    c.bench_function("cache_tuple", |b| {
        b.iter(|| {
            let mut indexed: IndexedDataset = dataset.clone().into();
            if let Some(rule) = &rule {
                for tuple in dataset.tuples() {
                    indexed.cache_tuple(rule.clone(), tuple.clone());
                }
            }
            black_box(indexed)
        });
    });
}

criterion_group!(
    benches,
    bench_index_construction,
    bench_scan_index_vs_full_scan,
    bench_merge,
    bench_cache_tuple
);
criterion_main!(benches);
