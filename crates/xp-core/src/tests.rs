use crate::*;
use serde_json::json;

// ========== Post ==========

#[test]
fn test_post_missing_fields_read_empty() {
    let post: Post = serde_json::from_value(json!({ "id": "abc" })).unwrap();
    assert_eq!(post.title(), "");
    assert_eq!(post.body(), "");
    assert_eq!(post.subreddit(), "");
    assert_eq!(post.score, 0);
    assert_eq!(post.created_at, 0);
}

#[test]
fn test_post_camel_case_fields() {
    let post: Post = serde_json::from_value(json!({
        "id": "p1",
        "title": "Hello",
        "subreddit": "pics",
        "numComments": 12,
        "createdAt": 1700000000,
    }))
    .unwrap();
    assert_eq!(post.num_comments, 12);
    assert_eq!(post.created_at, 1_700_000_000);
}

#[test]
fn test_post_reddit_dump_aliases() {
    let post: Post = serde_json::from_value(json!({
        "id": "t3_x",
        "title": "Hello",
        "selftext": "body text",
        "subreddit": "pics",
        "num_comments": 3,
        "created_utc": 1700000000.0,
        "score": "17",
        "crosspost_parent": "t3_parent",
    }))
    .unwrap();
    assert_eq!(post.body(), "body text");
    assert_eq!(post.num_comments, 3);
    assert_eq!(post.created_at, 1_700_000_000);
    assert_eq!(post.score, 17);
    assert!(post.is_native_crosspost());
}

#[test]
fn test_post_null_numbers_and_numeric_id() {
    let post: Post = serde_json::from_value(json!({
        "id": 42,
        "score": null,
        "title": null,
    }))
    .unwrap();
    assert_eq!(post.id, "42");
    assert_eq!(post.score, 0);
    assert_eq!(post.title(), "");
}

#[test]
fn test_post_deleted_body_sentinel() {
    let deleted = Post::new("1", "x", "t").with_body("[deleted]");
    let removed = Post::new("2", "x", "t").with_body("  [Removed] ");
    let kept = Post::new("3", "x", "t").with_body("[deleted] but then more");
    assert_eq!(deleted.body(), "");
    assert_eq!(removed.body(), "");
    assert_eq!(kept.body(), "[deleted] but then more");
}

#[test]
fn test_post_created_at_utc() {
    let post = Post::new("1", "x", "t").with_created_at(0);
    assert_eq!(post.created_at_utc().unwrap().timestamp(), 0);
}

#[test]
fn test_post_blank_crosspost_parent_is_not_native() {
    let post = Post::new("1", "x", "t").with_crosspost_parent("  ");
    assert!(!post.is_native_crosspost());
}

// ========== Config ==========

#[test]
fn test_config_defaults() {
    let c = DetectorConfig::default();
    assert!((c.title_similarity_threshold - 0.9).abs() < 1e-12);
    assert_eq!(c.content_body_prefix_length, 500);
    assert_eq!(c.candidate_limit, None);
    assert_eq!(c.score_fn, ScoreFn::Levenshtein);
    assert_eq!(c.min_word_length, 4);
    assert_eq!(c.blocking, Blocking::None);
    assert!(c.validate().is_ok());
}

#[test]
fn test_config_partial_json_keeps_defaults() {
    let c: DetectorConfig = serde_json::from_value(json!({
        "titleSimilarityThreshold": 0.8,
        "scoreFn": "jaccard",
    }))
    .unwrap();
    assert!((c.title_similarity_threshold - 0.8).abs() < 1e-12);
    assert_eq!(c.score_fn, ScoreFn::Jaccard);
    assert_eq!(c.content_body_prefix_length, 500);
}

#[test]
fn test_config_from_toml() {
    let text = r#"
titleSimilarityThreshold = 0.75
candidateLimit = 2000
minScore = 5

[blocking]
mode = "titleLength"
width = 8
"#;
    let c: DetectorConfig = toml::from_str(text).unwrap();
    assert_eq!(c.candidate_limit, Some(2000));
    assert_eq!(c.min_score, Some(5));
    assert_eq!(c.blocking, Blocking::TitleLength { width: 8 });
}

#[test]
fn test_config_rejects_out_of_range_threshold() {
    let c = DetectorConfig { title_similarity_threshold: 1.5, ..Default::default() };
    assert!(matches!(c.validate(), Err(XpError::InvalidConfig(_))));
    let c = DetectorConfig { title_similarity_threshold: f64::NAN, ..Default::default() };
    assert!(c.validate().is_err());
}

#[test]
fn test_config_rejects_zero_prefix_and_width() {
    let c = DetectorConfig { content_body_prefix_length: 0, ..Default::default() };
    assert!(c.validate().is_err());
    let c = DetectorConfig { blocking: Blocking::TitleLength { width: 0 }, ..Default::default() };
    assert!(c.validate().is_err());
}

// ========== Types ==========

#[test]
fn test_similarity_pair_canonical_order() {
    let p = SimilarityPair::new(("b", "y"), ("a", "x"), 0.95);
    assert_eq!(p.first_id, "a");
    assert_eq!(p.first_subreddit, "x");
    assert_eq!(p.second_id, "b");
    assert!(p.involves("a") && p.involves("b") && !p.involves("c"));
}

#[test]
fn test_match_group_min_id() {
    let g = MatchGroup {
        kind: MatchKind::Title,
        key: "foo".into(),
        post_ids: vec!["z".into(), "c".into(), "m".into()],
        subreddits: vec!["x".into(), "y".into()],
        origin_id: "z".into(),
    };
    assert_eq!(g.min_id(), "c");
    assert_eq!(g.len(), 3);
    assert!(g.contains("m"));
}

#[test]
fn test_crosspost_signal_clear() {
    assert!(CrosspostSignal::default().is_clear());
    let s = CrosspostSignal { has_exact_match: true, ..Default::default() };
    assert!(!s.is_clear());
}

#[test]
fn test_signal_serializes_camel_case() {
    let v = serde_json::to_value(CrosspostSignal::default()).unwrap();
    assert!(v.get("hasExactMatch").is_some());
    assert!(v.get("mentionsOtherSubreddits").is_some());
}
