//! Citation selection
//!
//! Two named strategies pick evidence from the corpus in received order:
//!
//! - `FirstN`: the first `per_kind` comments, then the first `per_kind`
//!   posts, unconditionally.
//! - `KeywordGated`: only items whose text contains one of the top
//!   keywords, each item cited at most once, same per-kind cap.
//!
//! Ids are assigned 1, 2, 3, … across comments then posts, so they are
//! unique and strictly increasing within one persona.

use super::scorers::truncate_chars;
use crate::corpus::{Corpus, SourceItem, SourceKind};
use crate::persona::Citation;
use serde::{Deserialize, Serialize};

/// Default number of citations per kind
pub const DEFAULT_CITATIONS_PER_KIND: usize = 5;

/// Default citation excerpt length in characters
pub const DEFAULT_CITATION_CHARS: usize = 200;

/// Default base for site-relative permalinks
pub const DEFAULT_PERMALINK_BASE: &str = "https://www.reddit.com";

/// Citation selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationPolicy {
    /// First N items of each kind
    #[default]
    FirstN,
    /// Only items mentioning a top keyword
    KeywordGated,
}

/// Make a site-relative permalink absolute
pub fn absolute_permalink(base: &str, permalink: &str) -> String {
    if permalink.starts_with("http://") || permalink.starts_with("https://") {
        return permalink.to_string();
    }
    let base = base.trim_end_matches('/');
    if permalink.starts_with('/') {
        format!("{}{}", base, permalink)
    } else {
        format!("{}/{}", base, permalink)
    }
}

/// Picks a bounded, ordered subset of the corpus as citations
#[derive(Debug, Clone)]
pub struct CitationSelector {
    policy: CitationPolicy,
    per_kind: usize,
    max_chars: usize,
    permalink_base: String,
}

impl Default for CitationSelector {
    fn default() -> Self {
        Self::new(CitationPolicy::FirstN)
    }
}

impl CitationSelector {
    pub fn new(policy: CitationPolicy) -> Self {
        Self {
            policy,
            per_kind: DEFAULT_CITATIONS_PER_KIND,
            max_chars: DEFAULT_CITATION_CHARS,
            permalink_base: DEFAULT_PERMALINK_BASE.to_string(),
        }
    }

    pub fn per_kind(mut self, per_kind: usize) -> Self {
        self.per_kind = per_kind;
        self
    }

    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn permalink_base(mut self, base: impl Into<String>) -> Self {
        self.permalink_base = base.into();
        self
    }

    pub fn policy(&self) -> CitationPolicy {
        self.policy
    }

    /// Select citations. `keywords` is only consulted by `KeywordGated`
    /// and must be lower-case.
    pub fn select(&self, corpus: &Corpus, keywords: &[String]) -> Vec<Citation> {
        let mut citations = Vec::new();
        let mut next_id = 1u32;

        for items in [&corpus.comments, &corpus.posts] {
            let chosen = items
                .iter()
                .filter(|item| self.admits(item, keywords))
                .take(self.per_kind);

            for item in chosen {
                citations.push(self.cite(next_id, item));
                next_id += 1;
            }
        }

        citations
    }

    fn admits(&self, item: &SourceItem, keywords: &[String]) -> bool {
        match self.policy {
            CitationPolicy::FirstN => true,
            CitationPolicy::KeywordGated => {
                let title = item.title.to_lowercase();
                let body = item.body.to_lowercase();
                keywords.iter().any(|k| match item.kind {
                    SourceKind::Comment => body.contains(k.as_str()),
                    SourceKind::Post => title.contains(k.as_str()) || body.contains(k.as_str()),
                })
            }
        }
    }

    fn cite(&self, id: u32, item: &SourceItem) -> Citation {
        Citation {
            id,
            kind: item.kind,
            content: truncate_chars(&item.text(), self.max_chars),
            permalink: absolute_permalink(&self.permalink_base, &item.permalink),
            score: item.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::utc_from_epoch;

    fn comment(n: usize, body: &str) -> SourceItem {
        SourceItem::comment(
            format!("c{}", n),
            body,
            n as i64,
            utc_from_epoch(1678886400.0),
            format!("/r/test/comments/c{}", n),
        )
    }

    fn post(n: usize, title: &str, selftext: &str) -> SourceItem {
        SourceItem::post(
            format!("p{}", n),
            title,
            selftext,
            n as i64,
            utc_from_epoch(1679145600.0),
            format!("/r/test/comments/p{}", n),
        )
    }

    fn big_corpus() -> Corpus {
        Corpus::new(
            (1..=8).map(|n| comment(n, "some comment text")).collect(),
            (1..=7).map(|n| post(n, "a title", "a body")).collect(),
        )
    }

    #[test]
    fn test_first_n_caps_per_kind() {
        let citations = CitationSelector::default().select(&big_corpus(), &[]);
        assert_eq!(citations.len(), 10);
        assert_eq!(
            citations.iter().filter(|c| c.kind == SourceKind::Comment).count(),
            5
        );
        assert_eq!(citations.iter().filter(|c| c.kind == SourceKind::Post).count(), 5);
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let citations = CitationSelector::default().select(&big_corpus(), &[]);
        let ids: Vec<u32> = citations.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
        // comments come first, in received order
        assert_eq!(citations[0].permalink, "https://www.reddit.com/r/test/comments/c1");
        assert_eq!(citations[5].kind, SourceKind::Post);
        assert_eq!(citations[5].score, 1);
    }

    #[test]
    fn test_content_truncated() {
        let corpus = Corpus::new(vec![comment(1, &"word ".repeat(100))], vec![]);
        let citations = CitationSelector::default().select(&corpus, &[]);
        assert_eq!(citations[0].content.chars().count(), 200);

        let citations = CitationSelector::default().max_chars(10).select(&corpus, &[]);
        assert_eq!(citations[0].content, "word word ");
    }

    #[test]
    fn test_post_content_joins_title_and_selftext() {
        let corpus = Corpus::new(vec![], vec![post(1, "My favorite RPGs", "I enjoy games.")]);
        let citations = CitationSelector::default().select(&corpus, &[]);
        assert_eq!(citations[0].content, "My favorite RPGs I enjoy games.");
        assert_eq!(citations[0].id, 1);
    }

    #[test]
    fn test_keyword_gated() {
        let corpus = Corpus::new(
            vec![
                comment(1, "I love RPGs and games"),
                comment(2, "Nothing to see here"),
                comment(3, "More games tonight"),
            ],
            vec![post(1, "Weather report", ""), post(2, "Best RPGs", "")],
        );
        let keywords = vec!["games".to_string(), "rpgs".to_string()];
        let citations =
            CitationSelector::new(CitationPolicy::KeywordGated).select(&corpus, &keywords);

        let ids: Vec<u32> = citations.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // comment 1 matches two keywords but is cited once
        assert_eq!(citations[0].permalink, "https://www.reddit.com/r/test/comments/c1");
        assert_eq!(citations[1].permalink, "https://www.reddit.com/r/test/comments/c3");
        assert_eq!(citations[2].permalink, "https://www.reddit.com/r/test/comments/p2");
    }

    #[test]
    fn test_keyword_gated_respects_cap() {
        let keywords = vec!["comment".to_string()];
        let citations = CitationSelector::new(CitationPolicy::KeywordGated)
            .per_kind(3)
            .select(&big_corpus(), &keywords);
        assert_eq!(citations.len(), 3);
    }

    #[test]
    fn test_empty_corpus() {
        assert!(CitationSelector::default().select(&Corpus::default(), &[]).is_empty());
    }

    #[test]
    fn test_absolute_permalink() {
        assert_eq!(
            absolute_permalink("https://www.reddit.com/", "/r/rpg/comments/pqrst"),
            "https://www.reddit.com/r/rpg/comments/pqrst"
        );
        assert_eq!(
            absolute_permalink("https://www.reddit.com", "r/rpg"),
            "https://www.reddit.com/r/rpg"
        );
        assert_eq!(
            absolute_permalink("https://www.reddit.com", "https://old.reddit.com/r/rpg"),
            "https://old.reddit.com/r/rpg"
        );
    }
}
