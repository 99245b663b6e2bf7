//! Where posts come from before analysis.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use xp_core::{Post, Result, XpError};

use crate::cache::TtlCache;

/// A materialized collection of posts.
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Stable identity of this source, used as a cache key.
    fn key(&self) -> String;

    async fn load(&self) -> Result<Vec<Post>>;
}

#[derive(Deserialize)]
struct Envelope {
    posts: Vec<Post>,
}

/// Parse a corpus from text.
///
/// Accepted shapes: a JSON array of posts, an object with a `posts` array,
/// or newline-delimited JSON with one post per line (blank lines ignored).
pub fn parse_corpus(text: &str) -> Result<Vec<Post>> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    if let Ok(envelope) = serde_json::from_str::<Envelope>(trimmed) {
        return Ok(envelope.posts);
    }
    parse_ndjson(text)
}

fn parse_ndjson(text: &str) -> Result<Vec<Post>> {
    let mut posts = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let post = serde_json::from_str::<Post>(line).map_err(|e| XpError::CorpusFormat {
            line: idx + 1,
            message: e.to_string(),
        })?;
        posts.push(post);
    }
    Ok(posts)
}

/// Posts stored in a JSON or NDJSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CorpusSource for JsonFileSource {
    fn key(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn load(&self) -> Result<Vec<Post>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let posts = parse_corpus(&text)?;
        debug!(path = %self.path.display(), posts = posts.len(), "corpus loaded");
        Ok(posts)
    }
}

/// Posts already held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    posts: Vec<Post>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, posts: Vec<Post>) -> Self {
        Self { name: name.into(), posts }
    }
}

#[async_trait]
impl CorpusSource for MemorySource {
    fn key(&self) -> String {
        format!("memory:{}", self.name)
    }

    async fn load(&self) -> Result<Vec<Post>> {
        Ok(self.posts.clone())
    }
}

/// Serves a source's corpus from a cache until its TTL lapses.
pub struct CachedSource<S, C> {
    inner: S,
    cache: C,
    ttl: Duration,
}

impl<S, C> CachedSource<S, C>
where
    S: CorpusSource,
    C: TtlCache<String, Arc<Vec<Post>>>,
{
    pub fn new(inner: S, cache: C, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// Forget the cached corpus so the next load hits the source.
    pub fn invalidate(&self) -> bool {
        self.cache.remove(&self.inner.key())
    }

    /// Shared handle to the corpus, loading it on a cache miss.
    pub async fn load_shared(&self) -> Result<Arc<Vec<Post>>> {
        let key = self.inner.key();
        if let Some(posts) = self.cache.get(&key) {
            debug!(%key, "corpus cache hit");
            return Ok(posts);
        }
        debug!(%key, "corpus cache miss");
        let posts = Arc::new(self.inner.load().await?);
        self.cache.set(key, Arc::clone(&posts), self.ttl);
        Ok(posts)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S, C> CorpusSource for CachedSource<S, C>
where
    S: CorpusSource,
    C: TtlCache<String, Arc<Vec<Post>>>,
{
    fn key(&self) -> String {
        self.inner.key()
    }

    async fn load(&self) -> Result<Vec<Post>> {
        Ok(self.load_shared().await?.as_ref().clone())
    }
}
