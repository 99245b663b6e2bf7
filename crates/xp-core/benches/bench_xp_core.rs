use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xp_core::{DetectorConfig, Post};

fn generate_posts_json(n: usize) -> String {
    let posts: Vec<Post> = (0..n)
        .map(|i| {
            Post::new(format!("t3_{i}"), format!("sub{}", i % 17), format!("Post title number {i}"))
                .with_body(format!("Body text for post {i} with a few more words"))
                .with_score((i % 500) as i64)
                .with_created_at(1_700_000_000 + i as i64)
        })
        .collect();
    serde_json::to_string(&posts).unwrap()
}

fn bench_post_parsing(c: &mut Criterion) {
    let json_1k = generate_posts_json(1000);
    c.bench_function("post_parse_1000", |b| {
        b.iter(|| {
            let posts: Vec<Post> = serde_json::from_str(black_box(&json_1k)).unwrap();
            black_box(posts);
        })
    });
}

fn bench_config_parsing(c: &mut Criterion) {
    let json_str = serde_json::to_string(&DetectorConfig::default()).unwrap();
    c.bench_function("config_parse_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                let config: DetectorConfig = serde_json::from_str(black_box(&json_str)).unwrap();
                black_box(config);
            }
        })
    });
}

criterion_group!(benches, bench_post_parsing, bench_config_parsing);
criterion_main!(benches);
