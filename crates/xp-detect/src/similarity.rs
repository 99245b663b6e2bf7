//! Pairwise similarity scanner — near-duplicate titles across subreddits.
//!
//! The scan is O(n²) in the number of candidates, times O(L²) per pair for
//! Levenshtein. `candidate_limit` and [`Blocking`] are the knobs that keep it
//! tractable; both trade recall for runtime.

use std::collections::{BTreeMap, HashSet};

use xp_core::{Blocking, DetectorConfig, Post, ScoreFn, SimilarityPair};

use crate::normalize::normalize_str;

/// Scanner parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    pub score_fn: ScoreFn,
    pub threshold: f64,
    /// Jaccard only: words must be longer than this many characters.
    pub min_word_length: usize,
    /// Only the top posts by score take part in the scan.
    pub candidate_limit: Option<usize>,
    pub blocking: Blocking,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from(&DetectorConfig::default())
    }
}

impl From<&DetectorConfig> for ScanConfig {
    fn from(c: &DetectorConfig) -> Self {
        Self {
            score_fn: c.score_fn,
            threshold: c.title_similarity_threshold,
            min_word_length: c.min_word_length,
            candidate_limit: c.candidate_limit,
            blocking: c.blocking,
        }
    }
}

/// Classic unit-cost edit distance over chars, two-row DP.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance_chars(&a, &b)
}

fn edit_distance_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `(max_len - edit_distance) / max_len`; `1.0` when both are empty.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_ratio_chars(&a, &b)
}

fn levenshtein_ratio_chars(a: &[char], b: &[char]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    (max_len - edit_distance_chars(a, b)) as f64 / max_len as f64
}

/// Jaccard overlap of the word sets, counting only words longer than
/// `min_word_length` characters.
pub fn jaccard_word_overlap(a: &str, b: &str, min_word_length: usize) -> f64 {
    jaccard(&word_set(a, min_word_length), &word_set(b, min_word_length))
}

fn word_set(text: &str, min_word_length: usize) -> HashSet<String> {
    text.split_whitespace()
        .filter(|w| w.chars().count() > min_word_length)
        .map(str::to_string)
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() { return 1.0; }
    if a.is_empty() || b.is_empty() { return 0.0; }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// A candidate prepared once so each pair comparison only does the scoring.
struct Candidate<'a> {
    post: &'a Post,
    subreddit_lc: String,
    normalized: String,
    chars: Vec<char>,
    words: HashSet<String>,
}

impl<'a> Candidate<'a> {
    fn new(post: &'a Post, config: &ScanConfig) -> Self {
        let normalized = normalize_str(post.title());
        let chars = match config.score_fn {
            ScoreFn::Levenshtein => normalized.chars().collect(),
            ScoreFn::Jaccard => Vec::new(),
        };
        let words = match config.score_fn {
            ScoreFn::Jaccard => word_set(&normalized, config.min_word_length),
            ScoreFn::Levenshtein => HashSet::new(),
        };
        Self {
            post,
            subreddit_lc: post.subreddit().to_lowercase(),
            normalized,
            chars,
            words,
        }
    }
}

/// Pairs are drawn from `left × left` (within) or `left × right` (across).
struct Block {
    left: Vec<usize>,
    right: Option<Vec<usize>>,
}

impl Block {
    fn pair_count(&self) -> usize {
        match &self.right {
            None => self.left.len().saturating_sub(1) * self.left.len() / 2,
            Some(right) => self.left.len() * right.len(),
        }
    }
}

/// Lazy scan over candidate pairs.
///
/// Yields matching pairs in scan order, so stopping early leaves a prefix of
/// the full result.
pub struct PairScan<'a> {
    config: ScanConfig,
    candidates: Vec<Candidate<'a>>,
    blocks: Vec<Block>,
    block: usize,
    i: usize,
    j: usize,
    compared: usize,
}

impl<'a> PairScan<'a> {
    fn new(posts: &'a [Post], config: &ScanConfig) -> Self {
        let candidates: Vec<Candidate<'a>> = select_candidates(posts, config.candidate_limit)
            .into_iter()
            .map(|p| Candidate::new(p, config))
            .filter(|c| !c.normalized.is_empty())
            .collect();
        let blocks = build_blocks(&candidates, config.blocking);
        let mut scan = Self {
            config: *config,
            candidates,
            blocks,
            block: 0,
            i: 0,
            j: 0,
            compared: 0,
        };
        scan.reset_cursor();
        scan
    }

    /// Number of pairs the scan will visit in total.
    pub fn total_pairs(&self) -> usize {
        self.blocks.iter().map(Block::pair_count).sum()
    }

    /// Number of pairs actually scored so far. Same-subreddit pairs and
    /// pairs skipped by the Levenshtein length check are not counted.
    pub fn compared(&self) -> usize {
        self.compared
    }

    fn reset_cursor(&mut self) {
        self.i = 0;
        self.j = match self.blocks.get(self.block) {
            Some(Block { right: None, .. }) => 1,
            _ => 0,
        };
    }

    /// Next `(left, right)` candidate indices, or `None` when exhausted.
    fn advance(&mut self) -> Option<(usize, usize)> {
        loop {
            let block = self.blocks.get(self.block)?;
            let right_len = block.right.as_ref().map_or(block.left.len(), Vec::len);
            if self.i >= block.left.len() {
                self.block += 1;
                self.reset_cursor();
                continue;
            }
            if self.j >= right_len {
                self.i += 1;
                self.j = if block.right.is_none() { self.i + 1 } else { 0 };
                continue;
            }
            let a = block.left[self.i];
            let b = match &block.right {
                None => block.left[self.j],
                Some(right) => right[self.j],
            };
            self.j += 1;
            return Some((a, b));
        }
    }

    fn score(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Option<f64> {
        match self.config.score_fn {
            ScoreFn::Levenshtein => {
                let (short, long) = if a.chars.len() <= b.chars.len() {
                    (a.chars.len(), b.chars.len())
                } else {
                    (b.chars.len(), a.chars.len())
                };
                // the ratio can never exceed short / long
                if long > 0 && (short as f64 / long as f64) < self.config.threshold {
                    return None;
                }
                Some(levenshtein_ratio_chars(&a.chars, &b.chars))
            }
            ScoreFn::Jaccard => Some(jaccard(&a.words, &b.words)),
        }
    }
}

impl<'a> Iterator for PairScan<'a> {
    type Item = SimilarityPair;

    fn next(&mut self) -> Option<SimilarityPair> {
        while let Some((ia, ib)) = self.advance() {
            let (a, b) = (&self.candidates[ia], &self.candidates[ib]);
            if a.subreddit_lc == b.subreddit_lc {
                continue;
            }
            // pairs rejected by the length check are not counted as scored
            let Some(score) = self.score(a, b) else {
                continue;
            };
            let pair = (score >= self.config.threshold).then(|| {
                SimilarityPair::new(
                    (a.post.id.as_str(), a.post.subreddit()),
                    (b.post.id.as_str(), b.post.subreddit()),
                    score,
                )
            });
            self.compared += 1;
            if pair.is_some() {
                return pair;
            }
        }
        None
    }
}

/// Start a lazy scan; see [`PairScan`].
pub fn scan_similar_pairs<'a>(posts: &'a [Post], config: &ScanConfig) -> PairScan<'a> {
    PairScan::new(posts, config)
}

/// All cross-subreddit title pairs scoring at or above the threshold.
pub fn find_similar_pairs(posts: &[Post], config: &ScanConfig) -> Vec<SimilarityPair> {
    let mut scan = scan_similar_pairs(posts, config);
    let total = scan.total_pairs();
    let pairs: Vec<SimilarityPair> = scan.by_ref().collect();
    tracing::debug!(
        candidates = scan.candidates.len(),
        total_pairs = total,
        compared = scan.compared(),
        matched = pairs.len(),
        "similarity scan finished"
    );
    pairs
}

/// Top `limit` posts by score, descending; equal scores keep input order.
fn select_candidates(posts: &[Post], limit: Option<usize>) -> Vec<&Post> {
    let mut selected: Vec<&Post> = posts.iter().collect();
    if let Some(limit) = limit {
        if limit < selected.len() {
            selected.sort_by(|a, b| b.score.cmp(&a.score));
            selected.truncate(limit);
        }
    }
    selected
}

fn build_blocks(candidates: &[Candidate<'_>], blocking: Blocking) -> Vec<Block> {
    match blocking {
        Blocking::None => vec![Block { left: (0..candidates.len()).collect(), right: None }],
        Blocking::FirstWord => {
            let mut buckets: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            for (idx, c) in candidates.iter().enumerate() {
                let first = c.normalized.split(' ').next().unwrap_or("");
                buckets.entry(first).or_default().push(idx);
            }
            buckets.into_values().map(|left| Block { left, right: None }).collect()
        }
        Blocking::TitleLength { width } => {
            let width = width.max(1);
            let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
            for (idx, c) in candidates.iter().enumerate() {
                buckets.entry(c.normalized.chars().count() / width).or_default().push(idx);
            }
            let mut blocks = Vec::new();
            for (key, members) in &buckets {
                blocks.push(Block { left: members.clone(), right: None });
                if let Some(next) = buckets.get(&(key + 1)) {
                    blocks.push(Block { left: members.clone(), right: Some(next.clone()) });
                }
            }
            blocks
        }
    }
}
