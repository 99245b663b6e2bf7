//! Report aggregation: per-post signals and the run summary.
//!
//! Pure summarization: nothing is detected here and no input is mutated.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use xp_core::{CrosspostSignal, MatchGroup, PatternSignals, Post, PostSignal, SimilarityPair};

/// How many posts carry one signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalCount {
    pub count: usize,
    pub percentage: f64,
}

impl SignalCount {
    fn new(count: usize, total: usize) -> Self {
        let percentage = if total == 0 { 0.0 } else { count as f64 / total as f64 * 100.0 };
        Self { count, percentage }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub exact_match: SignalCount,
    pub similar_match: SignalCount,
    pub repost_language: SignalCount,
    pub subreddit_mentions: SignalCount,
    pub native_crosspost: SignalCount,
    pub likely_crosspost: SignalCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubredditMentionCount {
    pub subreddit: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_posts: usize,
    pub summary: SignalSummary,
    pub top_mentioned_subreddits: Vec<SubredditMentionCount>,
    pub top_exact_groups: Vec<MatchGroup>,
    pub top_similar_pairs: Vec<SimilarityPair>,
    /// One entry per input post, in input order.
    pub signals: Vec<PostSignal>,
}

impl Report {
    pub fn signal_for(&self, id: &str) -> Option<&CrosspostSignal> {
        self.signals.iter().find(|s| s.id == id).map(|s| &s.signal)
    }

    /// Ids of the posts judged likely crossposts, in input order.
    pub fn flagged_ids(&self) -> Vec<&str> {
        self.signals
            .iter()
            .filter(|s| s.signal.is_likely_crosspost)
            .map(|s| s.id.as_str())
            .collect()
    }
}

/// Merge every detector output into a [`Report`].
///
/// Posts missing from `pattern_signals` are treated as having no pattern hits.
pub fn aggregate(
    posts: &[Post],
    exact_title_groups: &[MatchGroup],
    exact_content_groups: &[MatchGroup],
    similar_pairs: &[SimilarityPair],
    pattern_signals: &HashMap<String, PatternSignals>,
    top_n: usize,
) -> Report {
    let exact_ids: HashSet<&str> = exact_title_groups
        .iter()
        .chain(exact_content_groups)
        .flat_map(|g| g.post_ids.iter().map(String::as_str))
        .collect();
    let similar_ids: HashSet<&str> = similar_pairs
        .iter()
        .flat_map(|p| [p.first_id.as_str(), p.second_id.as_str()])
        .collect();

    let signals: Vec<PostSignal> = posts
        .iter()
        .map(|post| {
            let patterns = pattern_signals.get(&post.id).cloned().unwrap_or_default();
            let mut signal = CrosspostSignal {
                has_exact_match: exact_ids.contains(post.id.as_str()),
                has_similar_match: similar_ids.contains(post.id.as_str()),
                mentions_other_subreddits: patterns.subreddit_mentions,
                matches_repost_pattern: patterns.has_repost_language,
                matched_patterns: patterns.matched_patterns,
                is_native_crosspost: post.is_native_crosspost(),
                is_likely_crosspost: false,
            };
            signal.is_likely_crosspost = signal.has_exact_match
                || signal.has_similar_match
                || signal.matches_repost_pattern
                || signal.is_native_crosspost
                || !signal.mentions_other_subreddits.is_empty();
            PostSignal {
                id: post.id.clone(),
                subreddit: post.subreddit().to_string(),
                signal,
            }
        })
        .collect();

    let total = posts.len();
    let count = |f: fn(&CrosspostSignal) -> bool| {
        SignalCount::new(signals.iter().filter(|s| f(&s.signal)).count(), total)
    };
    let summary = SignalSummary {
        exact_match: count(|s| s.has_exact_match),
        similar_match: count(|s| s.has_similar_match),
        repost_language: count(|s| s.matches_repost_pattern),
        subreddit_mentions: count(|s| !s.mentions_other_subreddits.is_empty()),
        native_crosspost: count(|s| s.is_native_crosspost),
        likely_crosspost: count(|s| s.is_likely_crosspost),
    };

    Report {
        total_posts: total,
        summary,
        top_mentioned_subreddits: top_mentions(&signals, top_n),
        top_exact_groups: top_groups(exact_title_groups, exact_content_groups, top_n),
        top_similar_pairs: top_pairs(similar_pairs, top_n),
        signals,
    }
}

fn top_mentions(signals: &[PostSignal], top_n: usize) -> Vec<SubredditMentionCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for s in signals {
        for name in &s.signal.mentions_other_subreddits {
            *counts.entry(name.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<SubredditMentionCount> = counts
        .into_iter()
        .map(|(subreddit, count)| SubredditMentionCount { subreddit: subreddit.to_string(), count })
        .collect();
    // BTreeMap order already sorts names ascending; the sort is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top_n);
    ranked
}

fn top_groups(title: &[MatchGroup], content: &[MatchGroup], top_n: usize) -> Vec<MatchGroup> {
    let mut groups: Vec<MatchGroup> = title.iter().chain(content).cloned().collect();
    groups.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.min_id().cmp(b.min_id()))
            .then_with(|| a.key.cmp(&b.key))
    });
    groups.truncate(top_n);
    groups
}

fn top_pairs(pairs: &[SimilarityPair], top_n: usize) -> Vec<SimilarityPair> {
    let mut ranked = pairs.to_vec();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.first_id.cmp(&b.first_id))
            .then_with(|| a.second_id.cmp(&b.second_id))
    });
    ranked.truncate(top_n);
    ranked
}
