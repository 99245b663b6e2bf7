//! Exact-match indexer — identical normalized titles or body prefixes
//! posted to more than one subreddit.

use std::collections::{BTreeMap, HashSet};

use xp_core::{MatchGroup, MatchKind, Post};

use crate::normalize::{content_key, normalize_str};

/// Group posts by `key_fn`, keeping only groups that span at least two
/// distinct subreddits. Empty keys are skipped.
///
/// Keys iterate in sorted order; posts inside a group keep input order.
pub fn index_exact_matches<'a, F>(posts: &'a [Post], key_fn: F) -> BTreeMap<String, Vec<&'a Post>>
where
    F: Fn(&Post) -> String,
{
    let mut buckets: BTreeMap<String, Vec<&'a Post>> = BTreeMap::new();
    for post in posts {
        let key = key_fn(post);
        if key.is_empty() {
            continue;
        }
        buckets.entry(key).or_default().push(post);
    }
    buckets.retain(|_, members| distinct_subreddits(members).len() >= 2);
    buckets
}

/// Key function for title matching.
pub fn title_key(post: &Post) -> String {
    normalize_str(post.title())
}

/// Cross-subreddit groups of identical normalized titles.
pub fn title_groups(posts: &[Post]) -> Vec<MatchGroup> {
    to_groups(MatchKind::Title, index_exact_matches(posts, title_key))
}

/// Cross-subreddit groups of identical normalized body prefixes.
pub fn content_groups(posts: &[Post], prefix_len: usize) -> Vec<MatchGroup> {
    let index = index_exact_matches(posts, |p| content_key(p.body(), prefix_len));
    to_groups(MatchKind::Content, index)
}

fn to_groups(kind: MatchKind, index: BTreeMap<String, Vec<&Post>>) -> Vec<MatchGroup> {
    index
        .into_iter()
        .map(|(key, members)| {
            // min_by_key keeps the first of equal elements
            let origin_id = members
                .iter()
                .min_by_key(|p| p.created_at)
                .map(|p| p.id.clone())
                .unwrap_or_default();
            MatchGroup {
                kind,
                key,
                post_ids: members.iter().map(|p| p.id.clone()).collect(),
                subreddits: distinct_subreddits(&members),
                origin_id,
            }
        })
        .collect()
}

/// Subreddit names compare case-insensitively; the first spelling seen wins.
fn distinct_subreddits(members: &[&Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    members
        .iter()
        .map(|p| p.subreddit())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}
