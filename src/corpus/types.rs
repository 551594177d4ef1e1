//! Corpus wire types
//!
//! A corpus is everything fetched for one subject account: comments and
//! posts in the order the fetcher received them (most recent first). The
//! JSON shape matches what the fetcher exports, so a corpus can be saved
//! and analyzed offline later.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a source item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Comment,
    Post,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Comment => "comment",
            SourceKind::Post => "post",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetched comment or post
#[derive(Debug, Clone, PartialEq)]
pub struct SourceItem {
    pub id: String,
    pub kind: SourceKind,
    /// Post title; empty for comments
    pub title: String,
    /// Comment body or post selftext
    pub body: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
    /// Site-relative permalink as returned by the API
    pub permalink: String,
    /// Link target of a post, if any
    pub url: Option<String>,
}

impl SourceItem {
    /// Build a comment item
    pub fn comment(
        id: impl Into<String>,
        body: impl Into<String>,
        score: i64,
        created_at: DateTime<Utc>,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Comment,
            title: String::new(),
            body: body.into(),
            score,
            created_at,
            permalink: permalink.into(),
            url: None,
        }
    }

    /// Build a post item
    pub fn post(
        id: impl Into<String>,
        title: impl Into<String>,
        selftext: impl Into<String>,
        score: i64,
        created_at: DateTime<Utc>,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Post,
            title: title.into(),
            body: selftext.into(),
            score,
            created_at,
            permalink: permalink.into(),
            url: None,
        }
    }

    /// Attach the link target of a post
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Citable text: the body of a comment, `title + " " + selftext` of a post
    pub fn text(&self) -> String {
        match self.kind {
            SourceKind::Comment => self.body.clone(),
            SourceKind::Post if self.body.is_empty() => self.title.clone(),
            SourceKind::Post => format!("{} {}", self.title, self.body),
        }
    }
}

/// All fetched items for one subject account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CorpusFile", into = "CorpusFile")]
pub struct Corpus {
    pub comments: Vec<SourceItem>,
    pub posts: Vec<SourceItem>,
}

impl Corpus {
    pub fn new(comments: Vec<SourceItem>, posts: Vec<SourceItem>) -> Self {
        Self { comments, posts }
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.posts.is_empty()
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.comments.len() + self.posts.len()
    }

    /// Text segments in analysis order: comment bodies, then each post's
    /// title followed by its selftext when non-empty.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let comments = self.comments.iter().map(|c| c.body.as_str());
        let posts = self.posts.iter().flat_map(|p| {
            std::iter::once(p.title.as_str()).chain((!p.body.is_empty()).then_some(p.body.as_str()))
        });
        comments.chain(posts)
    }

    /// All segments joined with single spaces
    pub fn combined_text(&self) -> String {
        self.segments().collect::<Vec<_>>().join(" ")
    }

    /// Parse a corpus previously exported as JSON
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Export the corpus as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// On-disk shape of a corpus
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    comments: Vec<CommentRecord>,
    #[serde(default)]
    posts: Vec<PostRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommentRecord {
    id: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    permalink: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PostRecord {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

/// Convert fractional epoch seconds to a UTC timestamp
pub fn utc_from_epoch(secs: f64) -> DateTime<Utc> {
    let secs = secs.max(0.0);
    let nanos = (secs.fract() * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(secs.trunc() as i64, nanos).unwrap_or_default()
}

fn epoch_from_utc(at: &DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / 1_000_000_000.0
}

impl From<CorpusFile> for Corpus {
    fn from(file: CorpusFile) -> Self {
        let comments = file
            .comments
            .into_iter()
            .map(|c| {
                let created_at = utc_from_epoch(c.created_utc);
                SourceItem::comment(c.id, c.body, c.score, created_at, c.permalink)
            })
            .collect();
        let posts = file
            .posts
            .into_iter()
            .map(|p| {
                let item = SourceItem::post(
                    p.id,
                    p.title,
                    p.selftext,
                    p.score,
                    utc_from_epoch(p.created_utc),
                    p.permalink,
                );
                match p.url {
                    Some(url) => item.with_url(url),
                    None => item,
                }
            })
            .collect();
        Corpus { comments, posts }
    }
}

impl From<Corpus> for CorpusFile {
    fn from(corpus: Corpus) -> Self {
        let comments = corpus
            .comments
            .into_iter()
            .map(|c| CommentRecord {
                created_utc: epoch_from_utc(&c.created_at),
                id: c.id,
                body: c.body,
                score: c.score,
                permalink: c.permalink,
            })
            .collect();
        let posts = corpus
            .posts
            .into_iter()
            .map(|p| PostRecord {
                created_utc: epoch_from_utc(&p.created_at),
                id: p.id,
                title: p.title,
                selftext: p.body,
                score: p.score,
                permalink: p.permalink,
                url: p.url,
            })
            .collect();
        CorpusFile { comments, posts }
    }
}
