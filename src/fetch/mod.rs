//! Corpus sources
//!
//! A `CorpusSource` produces the comments and posts of one account. The
//! Reddit API client is the production source; a saved corpus file serves
//! offline analysis.

pub mod reddit;

pub use reddit::RedditClient;

use crate::corpus::Corpus;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Produces the corpus of one account
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &str;

    /// Fetch up to `limit` comments and up to `limit` posts, most recent
    /// first. `None` fetches until the source is exhausted.
    async fn fetch(&self, username: &str, limit: Option<usize>) -> Result<Corpus>;
}

/// Corpus previously exported to a JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CorpusSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, _username: &str, limit: Option<usize>) -> Result<Corpus> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut corpus = Corpus::from_json(&content)?;
        if let Some(limit) = limit {
            corpus.comments.truncate(limit);
            corpus.posts.truncate(limit);
        }
        tracing::debug!(
            path = %self.path.display(),
            comments = corpus.comments.len(),
            posts = corpus.posts.len(),
            "Loaded corpus file"
        );
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const CORPUS: &str = r#"{
        "comments": [
            {"id": "c1", "body": "first", "score": 1, "created_utc": 1678886400, "permalink": "/r/a/c1"},
            {"id": "c2", "body": "second", "score": 2, "created_utc": 1678886300, "permalink": "/r/a/c2"}
        ],
        "posts": [
            {"id": "p1", "title": "post", "selftext": "", "score": 3, "created_utc": 1678886200, "permalink": "/r/a/p1"}
        ]
    }"#;

    #[tokio::test]
    async fn test_file_source_applies_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, CORPUS).unwrap();

        let source = FileSource::new(&path);
        let corpus = source.fetch("anyone", None).await.unwrap();
        assert_eq!(corpus.len(), 3);

        let corpus = source.fetch("anyone", Some(1)).await.unwrap();
        assert_eq!(corpus.comments.len(), 1);
        assert_eq!(corpus.comments[0].id, "c1");
        assert_eq!(corpus.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/corpus.json");
        let err = source.fetch("anyone", None).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        tokio::fs::write(&path, "{\"comments\": [").await.unwrap();

        let err = FileSource::new(&path).fetch("anyone", None).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
