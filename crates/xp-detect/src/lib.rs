//! Crosspost detection engine.
//!
//! Stages:
//! 1. Normalizer — lowercase, strip punctuation, collapse whitespace
//! 2. Exact-match indexer — identical titles / body prefixes across subreddits
//! 3. Pattern matcher — repost phrasing and `r/<name>` mentions
//! 4. Similarity scanner — near-duplicate titles (Levenshtein or Jaccard)
//! 5. Report aggregator — per-post signals and summary

pub mod exact;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod similarity;

pub use exact::index_exact_matches;
pub use normalize::normalize;
pub use patterns::{detect_patterns, PatternTable};
pub use pipeline::CrosspostDetector;
pub use report::{aggregate, Report};
pub use similarity::{find_similar_pairs, jaccard_word_overlap, levenshtein_ratio, scan_similar_pairs, ScanConfig};
