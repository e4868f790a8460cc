use askdocs_core::tokenizer::tokenize;
use askdocs_core::{retrieve, Chunk, Index, DEFAULT_TOP_K};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample_chunks() -> Vec<Chunk> {
    let words: Vec<&str> = include_str!("../../README.md").split_whitespace().collect();
    words
        .chunks(40)
        .enumerate()
        .map(|(i, window)| {
            Chunk::new(
                format!("README.md__chunk_{i:04}"),
                "README.md",
                window.join(" "),
            )
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = include_str!("../../README.md");
    c.bench_function("tokenize_readme", |b| b.iter(|| tokenize(text)));
}

fn bench_build(c: &mut Criterion) {
    let chunks = sample_chunks();
    c.bench_function("build_index", |b| b.iter(|| Index::build(chunks.clone())));
}

fn bench_retrieve(c: &mut Criterion) {
    let index = Index::build(sample_chunks());
    c.bench_function("retrieve_top_k", |b| {
        b.iter(|| retrieve(&index, "document index query ranking", DEFAULT_TOP_K))
    });
}

criterion_group!(benches, bench_tokenize, bench_build, bench_retrieve);
criterion_main!(benches);
