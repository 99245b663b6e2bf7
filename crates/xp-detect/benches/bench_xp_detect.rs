use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xp_core::{Blocking, DetectorConfig, Post, ScoreFn};
use xp_detect::{find_similar_pairs, levenshtein_ratio, CrosspostDetector, ScanConfig};

const WORDS: &[&str] = &[
    "cat", "dog", "finally", "after", "years", "my", "grandma", "built", "this", "huge",
    "garden", "today", "learned", "how", "to", "fix", "bike", "photo", "sunset", "mountain",
];
const SUBS: &[&str] = &["pics", "funny", "aww", "mildlyinteresting", "askreddit", "gardening"];

fn generate_corpus(n: usize, seed: u64) -> Vec<Post> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let len = rng.gen_range(4..12);
            let title: Vec<&str> = (0..len).map(|_| WORDS[rng.gen_range(0..WORDS.len())]).collect();
            Post::new(format!("t3_{i}"), SUBS[rng.gen_range(0..SUBS.len())], title.join(" "))
                .with_score(rng.gen_range(0..5000))
                .with_created_at(1_700_000_000 + i as i64)
        })
        .collect()
}

fn bench_levenshtein(c: &mut Criterion) {
    let a = "my grandma finally built this huge garden after years";
    let b = "after years my grandma finally built this garden";
    c.bench_function("levenshtein_ratio_title", |bch| {
        bch.iter(|| black_box(levenshtein_ratio(black_box(a), black_box(b))))
    });
}

fn bench_scan(c: &mut Criterion) {
    let corpus = generate_corpus(1000, 7);
    let full = ScanConfig { threshold: 0.8, ..Default::default() };
    c.bench_function("scan_levenshtein_1000", |b| {
        b.iter(|| black_box(find_similar_pairs(black_box(&corpus), &full)))
    });

    let jaccard = ScanConfig { score_fn: ScoreFn::Jaccard, ..full };
    c.bench_function("scan_jaccard_1000", |b| {
        b.iter(|| black_box(find_similar_pairs(black_box(&corpus), &jaccard)))
    });

    let limited = ScanConfig { candidate_limit: Some(250), ..full };
    c.bench_function("scan_levenshtein_1000_limit_250", |b| {
        b.iter(|| black_box(find_similar_pairs(black_box(&corpus), &limited)))
    });

    let blocked = ScanConfig { blocking: Blocking::TitleLength { width: 8 }, ..full };
    c.bench_function("scan_levenshtein_1000_length_blocks", |b| {
        b.iter(|| black_box(find_similar_pairs(black_box(&corpus), &blocked)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let corpus = generate_corpus(2000, 11);
    let detector = CrosspostDetector::new(DetectorConfig {
        candidate_limit: Some(500),
        ..Default::default()
    });
    c.bench_function("analyze_2000_limit_500", |b| {
        b.iter(|| black_box(detector.analyze(black_box(&corpus))))
    });
}

criterion_group!(benches, bench_levenshtein, bench_scan, bench_pipeline);
criterion_main!(benches);
