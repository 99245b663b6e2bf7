use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Body values the platform leaves behind when content is taken down.
const DELETED_SENTINELS: [&str; 2] = ["[deleted]", "[removed]"];

/// A post as stored by the scraper.
///
/// Source data is not trusted: every field except `id` may be missing, and
/// numeric fields accept integers, floats, numeric strings or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "selftext")]
    pub body: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub score: i64,
    #[serde(default, alias = "num_comments", deserialize_with = "lenient_i64")]
    pub num_comments: i64,
    #[serde(default, alias = "created_utc", deserialize_with = "lenient_i64")]
    pub created_at: i64,
    #[serde(default, alias = "crosspost_parent", skip_serializing_if = "Option::is_none")]
    pub crosspost_parent: Option<String>,
}

impl Post {
    pub fn new(id: impl Into<String>, subreddit: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            subreddit: Some(subreddit.into()),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    pub fn with_num_comments(mut self, num_comments: i64) -> Self {
        self.num_comments = num_comments;
        self
    }

    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_crosspost_parent(mut self, parent: impl Into<String>) -> Self {
        self.crosspost_parent = Some(parent.into());
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Body text, or `""` when missing or replaced by a deletion sentinel.
    pub fn body(&self) -> &str {
        match self.body.as_deref() {
            Some(b) if !is_deleted(b) => b,
            _ => "",
        }
    }

    pub fn subreddit(&self) -> &str {
        self.subreddit.as_deref().unwrap_or("")
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    /// Whether the platform itself marks this post as a reshare.
    pub fn is_native_crosspost(&self) -> bool {
        self.crosspost_parent.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

fn is_deleted(body: &str) -> bool {
    let trimmed = body.trim();
    DELETED_SENTINELS.iter().any(|s| trimmed.eq_ignore_ascii_case(s))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value: Option<Lenient> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Lenient::Int(i)) => i,
        Some(Lenient::Float(f)) if f.is_finite() => f as i64,
        Some(Lenient::Text(s)) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        _ => 0,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Int(i) => i.to_string(),
        Lenient::Float(f) => f.to_string(),
        Lenient::Text(s) => s,
    })
}
