//! Pattern matcher — repost/crosspost phrasing and `r/<name>` mentions.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use xp_core::{PatternSignals, Post, Result, XpError};

/// Built-in repost markers, matched case-insensitively against title and body.
pub const DEFAULT_PATTERNS: [(&str, &str); 7] = [
    ("repost", r"\brepost"),
    ("crosspost", r"\b(?:cross-?post|x-?post)"),
    ("originally_posted", r"\boriginally\s+posted\b"),
    ("posted_in_subreddit", r"(?s)\bposted\b.*?\bin\s+/?r/[a-z0-9_]"),
    ("from_subreddit", r"\bfrom\s+/?r/[a-z0-9_]"),
    ("repost_tag", r"\[\s*repost\s*\]"),
    ("crosspost_tag", r"\[\s*(?:cross-?post|x-?post)\s*\]"),
];

static RE_SUBREDDIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\br/([a-zA-Z0-9_]+)").unwrap());

static DEFAULT_TABLE: LazyLock<PatternTable> = LazyLock::new(|| {
    PatternTable::new(DEFAULT_PATTERNS.iter().copied()).unwrap()
});

/// Named, compiled repost patterns.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<(String, Regex)>,
}

impl PatternTable {
    /// Compile `(name, regex)` entries. Every regex is made case-insensitive.
    pub fn new<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self { patterns: Vec::new() };
        for (name, source) in entries {
            table = table.with_pattern(name, source)?;
        }
        Ok(table)
    }

    /// Append one pattern.
    pub fn with_pattern(mut self, name: &str, source: &str) -> Result<Self> {
        let re = Regex::new(&format!("(?i){source}")).map_err(|e| XpError::InvalidPattern {
            name: name.to_string(),
            source: e,
        })?;
        self.patterns.push((name.to_string(), re));
        Ok(self)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Names of the patterns matching any of `texts`, in table order.
    pub fn matching(&self, texts: &[&str]) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|(_, re)| texts.iter().any(|t| re.is_match(t)))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn detect(&self, post: &Post) -> PatternSignals {
        let texts = [post.title(), post.body()];
        let matched_patterns = self.matching(&texts);
        PatternSignals {
            has_repost_language: !matched_patterns.is_empty(),
            matched_patterns,
            subreddit_mentions: subreddit_mentions(&texts, post.subreddit()),
        }
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

/// Pattern signals for one post using the built-in table.
pub fn detect_patterns(post: &Post) -> PatternSignals {
    DEFAULT_TABLE.detect(post)
}

/// Distinct lowercased `r/<name>` mentions in first-seen order, skipping
/// `own_subreddit`.
pub fn subreddit_mentions(texts: &[&str], own_subreddit: &str) -> Vec<String> {
    let own = own_subreddit.trim_start_matches("r/").to_lowercase();
    let mut seen = HashSet::new();
    let mut mentions = Vec::new();
    for text in texts {
        for cap in RE_SUBREDDIT.captures_iter(text) {
            let name = cap[1].to_lowercase();
            if name == own || !seen.insert(name.clone()) {
                continue;
            }
            mentions.push(name);
        }
    }
    mentions
}
