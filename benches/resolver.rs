//! Resolver Benchmarks
//!
//! Run with: cargo bench --bench resolver

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use songbot::config::QuizConfig;
use songbot::quiz::{QuizEngine, SessionCodec};
use songbot::{Catalog, Resolver, Song, TitleIndex};

const TITLES: &[&str] = &[
    "A Hard Day's Night",
    "Across the Universe",
    "All You Need Is Love",
    "And I Love Her",
    "Back in the U.S.S.R.",
    "Blackbird",
    "Can't Buy Me Love",
    "Come Together",
    "Day Tripper",
    "Eleanor Rigby",
    "Get Back",
    "Help!",
    "Here Comes the Sun",
    "Hey Jude",
    "In My Life",
    "Let It Be",
    "Love Me Do",
    "Norwegian Wood (This Bird Has Flown)",
    "Penny Lane",
    "Something",
    "Strawberry Fields Forever",
    "Ticket to Ride",
    "When I'm Sixty-Four",
    "While My Guitar Gently Weeps",
    "Yesterday",
];

fn index() -> TitleIndex {
    let mut index = TitleIndex::new(TITLES.iter().copied());
    index.add_alias("64", "When I'm Sixty-Four");
    index
}

fn benchmark_resolve_tiers(c: &mut Criterion) {
    let index = index();
    let resolver = Resolver::default();

    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(1));

    for (tier, query) in [
        ("exact", "hey jude"),
        ("partial", "strawberry"),
        ("distance", "yesturday"),
        ("tokens", "love me please"),
        ("not_found", "zzzzzzzzzzzz"),
    ] {
        group.bench_with_input(BenchmarkId::new("tier", tier), query, |b, q| {
            b.iter(|| resolver.resolve(black_box(&index), black_box(q)));
        });
    }

    group.finish();
}

fn benchmark_index_build(c: &mut Criterion) {
    c.bench_function("index_build", |b| {
        b.iter(|| TitleIndex::new(black_box(TITLES).iter().copied()));
    });
}

fn benchmark_quiz_round(c: &mut Criterion) {
    let songs = TITLES
        .iter()
        .map(|t| Song::new(*t, "one two three four five six seven eight nine ten eleven twelve"))
        .collect();
    let catalog = Catalog::new(songs).expect("valid catalog");
    let engine = QuizEngine::new(QuizConfig::default(), SessionCodec::new(Some("bench".into())));
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("quiz_start", |b| {
        b.iter(|| engine.start_with(black_box(&catalog), &mut rng).expect("quiz turn"));
    });
}

criterion_group!(
    benches,
    benchmark_resolve_tiers,
    benchmark_index_build,
    benchmark_quiz_round
);
criterion_main!(benches);
