//! Benchmarks for docpager pagination performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks paginate synthetic documents of increasing length.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docpager::model::{PurchaseItem, Stage};
use docpager::{DocumentContent, DocumentKind, LayoutOptions, PaginationCache};

/// Creates a letter body with the given number of paragraphs.
fn create_letter(paragraphs: usize) -> DocumentContent {
    let body = (0..paragraphs)
        .map(|i| {
            format!(
                "Parágrafo {} do ofício, com <b>destaque</b> e texto suficiente para ocupar \
                 mais de uma linha impressa quando a largura for de noventa caracteres.",
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    DocumentContent::letter(body).with_addresses("Gabinete", "Secretaria de Obras")
}

/// Creates a dossier with every stage filled.
fn create_dossier(paragraphs_per_stage: usize) -> DocumentContent {
    let mut content = DocumentContent::new(DocumentKind::Dossier);
    content.stages = (0..7)
        .map(|s| {
            let mut body: String = (0..paragraphs_per_stage)
                .map(|i| format!("<p>Etapa {} considerando {}.</p>", s, i))
                .collect();
            body.push_str("<p><span>[ASSINATURA: Ana | Pregoeira | CPL]</span></p>");
            Stage::with_body(body)
        })
        .collect();
    content
}

/// Benchmark letter pagination at various sizes.
fn bench_letter(c: &mut Criterion) {
    let mut group = c.benchmark_group("letter");

    for paragraphs in [10, 100, 1000].iter() {
        let content = create_letter(*paragraphs);

        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| docpager::paginate_document(black_box(&content)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark purchase request pagination.
fn bench_purchase(c: &mut Criterion) {
    let mut content = DocumentContent::new(DocumentKind::PurchaseRequest);
    content.items = (0..500)
        .map(|i| PurchaseItem::new(format!("Item de consumo {}", i), 1.0, "un"))
        .collect();

    c.bench_function("purchase_500_items", |b| {
        b.iter(|| docpager::paginate_document(black_box(&content)).unwrap());
    });
}

/// Benchmark dossier pagination with marker resolution.
fn bench_dossier(c: &mut Criterion) {
    let content = create_dossier(50);

    c.bench_function("dossier_7_stages", |b| {
        b.iter(|| docpager::paginate_document(black_box(&content)).unwrap());
    });
}

/// Benchmark memoized lookups against unchanged content.
fn bench_cache_hit(c: &mut Criterion) {
    let content = create_letter(100);
    let options = LayoutOptions::new();
    let mut cache = PaginationCache::new();

    c.bench_function("cache_hit", |b| {
        b.iter(|| {
            cache
                .get_or_paginate(black_box(&content), &options)
                .map(|doc| doc.page_count())
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_letter, bench_purchase, bench_dossier, bench_cache_hit);
criterion_main!(benches);
