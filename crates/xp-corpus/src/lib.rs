//! Corpus loading for the crosspost detector: file and in-memory sources,
//! plus an expiring cache that sits in front of any source.

pub mod cache;
pub mod source;

pub use cache::{MemoryTtlCache, TtlCache};
pub use source::{parse_corpus, CachedSource, CorpusSource, JsonFileSource, MemorySource};
