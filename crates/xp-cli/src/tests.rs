use crate::*;
use std::io::Write;
use xp_core::{Post, ScoreFn};

fn parse_analyze(extra: &[&str]) -> AnalyzeArgs {
    let mut argv = vec!["xpost", "analyze", "--input", "posts.json"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Analyze(args) => args,
    }
}

fn sample_posts() -> Vec<Post> {
    vec![
        Post::new("1", "funny", "Foo Bar Baz!"),
        Post::new("2", "pics", "foo   bar baz"),
        Post::new("3", "stories", "[Repost] the night my car broke down")
            .with_body("first shared over in r/AskReddit"),
        Post::new("4", "gardening", "How deep should I plant tulip bulbs"),
    ]
}

// ========== Args ==========

#[test]
fn test_args_defaults() {
    let args = parse_analyze(&[]);
    assert_eq!(args.format, OutputFormat::Summary);
    assert!(args.output.is_none());
    assert!(args.threshold.is_none());
}

#[test]
fn test_args_rejects_unknown_score_fn() {
    let argv = ["xpost", "analyze", "--input", "p.json", "--score-fn", "cosine"];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn test_args_score_fn_maps_to_detector() {
    let args = parse_analyze(&["--score-fn", "jaccard"]);
    assert_eq!(args.score_fn, Some(ScoreFnArg::Jaccard));
    assert_eq!(ScoreFn::from(ScoreFnArg::Levenshtein), ScoreFn::Levenshtein);
}

// ========== Config resolution ==========

#[test]
fn test_resolve_defaults() {
    let config = config::resolve_config(&parse_analyze(&[])).unwrap();
    assert_eq!(config, xp_core::DetectorConfig::default());
}

#[test]
fn test_resolve_flag_overrides() {
    let args = parse_analyze(&[
        "--threshold",
        "0.75",
        "--candidate-limit",
        "200",
        "--score-fn",
        "jaccard",
        "--top-n",
        "3",
        "--min-score",
        "5",
    ]);
    let config = config::resolve_config(&args).unwrap();
    assert_eq!(config.title_similarity_threshold, 0.75);
    assert_eq!(config.candidate_limit, Some(200));
    assert_eq!(config.score_fn, ScoreFn::Jaccard);
    assert_eq!(config.top_n, 3);
    assert_eq!(config.min_score, Some(5));
}

#[test]
fn test_resolve_file_then_flags() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "titleSimilarityThreshold = 0.8\ntopN = 4").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = config::resolve_config(&parse_analyze(&["--config", &path])).unwrap();
    assert_eq!(config.title_similarity_threshold, 0.8);
    assert_eq!(config.top_n, 4);

    let config =
        config::resolve_config(&parse_analyze(&["--config", &path, "--top-n", "9"])).unwrap();
    assert_eq!(config.title_similarity_threshold, 0.8);
    assert_eq!(config.top_n, 9);
}

#[test]
fn test_resolve_invalid_threshold() {
    let err = config::resolve_config(&parse_analyze(&["--threshold", "1.5"])).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid detector configuration"));
}

#[test]
fn test_resolve_missing_config_file() {
    let err = config::resolve_config(&parse_analyze(&["--config", "/nonexistent/xpost.toml"]))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

// ========== Output ==========

#[test]
fn test_render_summary() {
    let report = CrosspostDetector::default().analyze(&sample_posts());
    let text = output::render_summary(&report);
    assert!(text.starts_with("Crosspost analysis: 4 posts"));
    assert!(text.contains("exact match"));
    assert!(text.contains("r/askreddit"));
    assert!(text.contains("Largest exact-match groups:"));
    assert!(text.contains("funny, pics"));
}

#[test]
fn test_render_summary_empty() {
    let report = CrosspostDetector::default().analyze(&[]);
    let text = output::render_summary(&report);
    assert!(text.contains("0 posts"));
    assert!(!text.contains("Most similar pairs:"));
}

#[test]
fn test_envelope_json() {
    let detector = CrosspostDetector::default();
    let report = detector.analyze(&sample_posts());
    let envelope = output::ReportEnvelope::new("posts.json", &detector.config, &report);
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["input"], "posts.json");
    assert!(value["runId"].is_string());
    assert!(value["generatedAt"].is_string());
    assert_eq!(value["report"]["totalPosts"], 4);
    assert_eq!(value["config"]["titleSimilarityThreshold"], 0.9);
}
