// Performance benchmarks for model build and recommendation
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use toonrec::{Item, Model, ModelConfig, SimilarityMatrix, SparseVector, TfidfModel, VectorizerConfig};

const GENRES: [&str; 8] = [
    "Action", "Romance", "Fantasy", "Drama", "Comedy", "Thriller", "Horror", "Slice of life",
];

const WORDS: [&str; 24] = [
    "hero", "villain", "tower", "love", "school", "ghost", "king", "dragon", "city", "secret",
    "friend", "war", "magic", "office", "detective", "family", "sword", "dream", "game", "revenge",
    "island", "student", "monster", "queen",
];

fn generate_items(n: usize, seed: u64) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let summary: Vec<&str> = (0..12)
                .map(|_| WORDS[rng.random_range(0..WORDS.len())])
                .collect();
            Item::new(i as u64, format!("Title {}", i))
                .with_genre(GENRES[rng.random_range(0..GENRES.len())])
                .with_writer(&format!("Writer{}", rng.random_range(0..n / 4 + 1)))
                .with_summary(&summary.join(" "))
        })
        .collect()
}

fn vectors(n: usize) -> Vec<SparseVector> {
    let docs: Vec<String> = generate_items(n, 7).iter().map(toonrec_core::compose).collect();
    let (_, rows) = TfidfModel::fit_transform(&docs, &VectorizerConfig::default()).unwrap();
    rows
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(10);

    for size in [100, 500, 1000].iter() {
        let items = generate_items(*size, 42);
        group.bench_with_input(BenchmarkId::new("model", size), size, |b, _| {
            b.iter(|| Model::build(black_box(items.clone()), ModelConfig::default()).unwrap());
        });

        let rows = vectors(*size);
        group.bench_with_input(BenchmarkId::new("matrix", size), size, |b, _| {
            b.iter(|| SimilarityMatrix::compute(black_box(&rows)));
        });
    }

    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    let model = Model::build(generate_items(1000, 42), ModelConfig::default()).unwrap();
    for k in [1, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::new("top_k", k), k, |b, &k| {
            b.iter(|| model.recommend(black_box("Title 500"), k).unwrap());
        });
    }

    group.bench_function("explained", |b| {
        b.iter(|| model.recommend_explained(black_box("Title 500"), 10, 5).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_recommend);
criterion_main!(benches);
