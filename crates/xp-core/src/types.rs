use serde::{Deserialize, Serialize};

/// Which normalized key an exact-match group was built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Title,
    Content,
}

/// Posts sharing one normalized key across at least two subreddits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchGroup {
    pub kind: MatchKind,
    pub key: String,
    /// Member ids in input order.
    pub post_ids: Vec<String>,
    /// Distinct subreddits in first-seen order.
    pub subreddits: Vec<String>,
    /// Earliest member by creation time; the head of the repost chain.
    pub origin_id: String,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.post_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.post_ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.post_ids.iter().any(|p| p == id)
    }

    /// Smallest member id, used to break ties between equally sized groups.
    pub fn min_id(&self) -> &str {
        self.post_ids.iter().map(String::as_str).min().unwrap_or("")
    }
}

/// Two posts from different subreddits whose titles scored at or above the
/// threshold. Stored with `first_id < second_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityPair {
    pub first_id: String,
    pub second_id: String,
    pub first_subreddit: String,
    pub second_subreddit: String,
    pub score: f64,
}

impl SimilarityPair {
    /// Build a pair in canonical order regardless of argument order.
    pub fn new(
        (id_a, sub_a): (&str, &str),
        (id_b, sub_b): (&str, &str),
        score: f64,
    ) -> Self {
        let ((first_id, first_subreddit), (second_id, second_subreddit)) = if id_a <= id_b {
            ((id_a, sub_a), (id_b, sub_b))
        } else {
            ((id_b, sub_b), (id_a, sub_a))
        };
        Self {
            first_id: first_id.to_string(),
            second_id: second_id.to_string(),
            first_subreddit: first_subreddit.to_string(),
            second_subreddit: second_subreddit.to_string(),
            score,
        }
    }

    pub fn involves(&self, id: &str) -> bool {
        self.first_id == id || self.second_id == id
    }
}

/// Output of the pattern matcher for one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSignals {
    pub has_repost_language: bool,
    /// Names of the patterns that matched, in table order.
    pub matched_patterns: Vec<String>,
    /// Lowercased `r/<name>` mentions other than the post's own subreddit.
    pub subreddit_mentions: Vec<String>,
}

/// Per-post aggregate of every detection signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosspostSignal {
    pub has_exact_match: bool,
    pub has_similar_match: bool,
    pub mentions_other_subreddits: Vec<String>,
    pub matches_repost_pattern: bool,
    pub matched_patterns: Vec<String>,
    pub is_native_crosspost: bool,
    pub is_likely_crosspost: bool,
}

impl CrosspostSignal {
    /// True when no signal fired at all.
    pub fn is_clear(&self) -> bool {
        self == &Self::default()
    }
}

/// A post id paired with its signal, as listed in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSignal {
    pub id: String,
    pub subreddit: String,
    pub signal: CrosspostSignal,
}
