use serde::{Deserialize, Serialize};

use crate::error::{Result, XpError};

/// Similarity function used by the pairwise title scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreFn {
    /// Character-level `(max_len - edit_distance) / max_len`.
    #[default]
    Levenshtein,
    /// Set overlap of the longer words of each title.
    Jaccard,
}

/// Coarse bucketing applied before pairwise comparison.
///
/// Anything other than `None` trades recall for runtime: pairs that land in
/// unrelated buckets are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Blocking {
    /// Compare every candidate pair.
    #[default]
    None,
    /// Bucket by normalized title length / `width`; a bucket is compared with
    /// itself and the next bucket up.
    TitleLength { width: usize },
    /// Bucket by the first word of the normalized title.
    FirstWord,
}

/// Detector configuration. Every field is optional in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectorConfig {
    pub title_similarity_threshold: f64,
    pub content_body_prefix_length: usize,
    /// Cap on the number of posts (top by score) fed to the pairwise scan.
    pub candidate_limit: Option<usize>,
    pub score_fn: ScoreFn,
    pub min_word_length: usize,
    /// Entries kept in each top-N list of the report.
    pub top_n: usize,
    /// Posts scoring below this are dropped before analysis.
    pub min_score: Option<i64>,
    pub blocking: Blocking,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            title_similarity_threshold: 0.9,
            content_body_prefix_length: 500,
            candidate_limit: None,
            score_fn: ScoreFn::Levenshtein,
            min_word_length: 4,
            top_n: 10,
            min_score: None,
            blocking: Blocking::None,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        let t = self.title_similarity_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(XpError::InvalidConfig(format!(
                "titleSimilarityThreshold must be within [0, 1], got {t}"
            )));
        }
        if self.content_body_prefix_length == 0 {
            return Err(XpError::InvalidConfig(
                "contentBodyPrefixLength must be greater than zero".into(),
            ));
        }
        if let Blocking::TitleLength { width: 0 } = self.blocking {
            return Err(XpError::InvalidConfig("blocking width must be greater than zero".into()));
        }
        Ok(())
    }
}
