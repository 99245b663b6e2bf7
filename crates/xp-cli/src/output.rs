use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use xp_core::DetectorConfig;
use xp_detect::report::SignalCount;
use xp_detect::Report;

/// What gets written for `--format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope<'a> {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub input: &'a str,
    pub config: &'a DetectorConfig,
    pub report: &'a Report,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(input: &'a str, config: &'a DetectorConfig, report: &'a Report) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            input,
            config,
            report,
        }
    }
}

fn line(out: &mut String, label: &str, c: &SignalCount) {
    let _ = writeln!(out, "  {label:<22} {:>7}  ({:.1}%)", c.count, c.percentage);
}

/// Plain-text console summary.
pub fn render_summary(report: &Report) -> String {
    let mut out = String::new();
    let s = &report.summary;
    let _ = writeln!(out, "Crosspost analysis: {} posts", report.total_posts);
    line(&mut out, "exact match", &s.exact_match);
    line(&mut out, "similar title", &s.similar_match);
    line(&mut out, "repost language", &s.repost_language);
    line(&mut out, "mentions subreddits", &s.subreddit_mentions);
    line(&mut out, "native crosspost", &s.native_crosspost);
    line(&mut out, "likely crosspost", &s.likely_crosspost);

    if !report.top_mentioned_subreddits.is_empty() {
        let _ = writeln!(out, "\nMost mentioned subreddits:");
        for m in &report.top_mentioned_subreddits {
            let _ = writeln!(out, "  r/{:<28} {}", m.subreddit, m.count);
        }
    }
    if !report.top_exact_groups.is_empty() {
        let _ = writeln!(out, "\nLargest exact-match groups:");
        for g in &report.top_exact_groups {
            let _ = writeln!(
                out,
                "  [{:?}] {} posts in {}: {:?}",
                g.kind,
                g.len(),
                g.subreddits.join(", "),
                truncate(&g.key, 60)
            );
        }
    }
    if !report.top_similar_pairs.is_empty() {
        let _ = writeln!(out, "\nMost similar pairs:");
        for p in &report.top_similar_pairs {
            let _ = writeln!(
                out,
                "  {:.3}  {} (r/{}) ~ {} (r/{})",
                p.score, p.first_id, p.first_subreddit, p.second_id, p.second_subreddit
            );
        }
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
