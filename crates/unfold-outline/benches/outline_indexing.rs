//! Benchmarks for outline indexing.

use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use unfold_dom::parse_fragment;
use unfold_outline::{HeadingSource, OutlineOptions, build_outline, index_document};

/// Markup with `sections` top-level sections of nested headings.
fn create_page(sections: usize) -> String {
    let mut markup = String::new();
    for i in 0..sections {
        let _ = write!(markup, "<h1>Section {i}</h1><p>Intro</p>");
        for j in 0..4 {
            let _ = write!(markup, "<h2>Part {j}</h2><p>Text</p><h3>Detail</h3><h4>Note</h4>");
        }
    }
    markup
}

fn bench_build_outline(c: &mut Criterion) {
    let levels = [1, 2, 3, 3, 2, 4, 1, 3, 2, 2];
    let mut group = c.benchmark_group("build_outline");

    for count in [100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                build_outline(
                    (0..count).map(|i| HeadingSource::new(levels[i % levels.len()], "Heading")),
                )
            });
        });
    }

    group.finish();
}

fn bench_index_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_document");

    for sections in [10, 100] {
        let markup = create_page(sections);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &markup,
            |b, markup| {
                b.iter(|| {
                    let mut doc = parse_fragment(markup).unwrap();
                    index_document(&mut doc, &OutlineOptions::default())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_outline, bench_index_document);
criterion_main!(benches);
