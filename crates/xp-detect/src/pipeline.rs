//! Detection pipeline — runs every stage in dependency order.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};
use xp_core::{DetectorConfig, PatternSignals, Post};

use crate::exact::{content_groups, title_groups};
use crate::patterns::PatternTable;
use crate::report::{aggregate, Report};
use crate::similarity::{find_similar_pairs, ScanConfig};

/// The crosspost detector.
pub struct CrosspostDetector {
    pub config: DetectorConfig,
    patterns: PatternTable,
}

impl CrosspostDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config, patterns: PatternTable::default() }
    }

    /// Use a custom pattern table instead of the built-in one.
    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Analyze an in-memory corpus.
    pub fn analyze(&self, posts: &[Post]) -> Report {
        let corpus = self.prepare(posts);
        let span = tracing::info_span!("analyze", posts = corpus.len());
        let _guard = span.enter();

        let title = title_groups(&corpus);
        let content = content_groups(&corpus, self.config.content_body_prefix_length);
        debug!(title_groups = title.len(), content_groups = content.len(), "exact matches indexed");

        let pattern_signals: HashMap<String, PatternSignals> = corpus
            .iter()
            .map(|p| (p.id.clone(), self.patterns.detect(p)))
            .collect();

        let pairs = find_similar_pairs(&corpus, &ScanConfig::from(&self.config));

        let report = aggregate(&corpus, &title, &content, &pairs, &pattern_signals, self.config.top_n);
        info!(
            total = report.total_posts,
            flagged = report.summary.likely_crosspost.count,
            exact = report.summary.exact_match.count,
            similar = report.summary.similar_match.count,
            "analysis complete"
        );
        report
    }

    /// Drop repeated ids (first occurrence wins) and posts under `min_score`.
    fn prepare(&self, posts: &[Post]) -> Vec<Post> {
        let mut seen = HashSet::new();
        let mut duplicates = 0usize;
        let kept: Vec<Post> = posts
            .iter()
            .filter(|p| {
                if seen.insert(p.id.as_str()) {
                    true
                } else {
                    duplicates += 1;
                    false
                }
            })
            .filter(|p| self.config.min_score.map_or(true, |min| p.score >= min))
            .cloned()
            .collect();
        if duplicates > 0 {
            warn!(duplicates, "dropped posts with repeated ids");
        }
        if kept.len() + duplicates < posts.len() {
            debug!(
                dropped = posts.len() - duplicates - kept.len(),
                min_score = ?self.config.min_score,
                "dropped posts below min score"
            );
        }
        kept
    }
}

impl Default for CrosspostDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
