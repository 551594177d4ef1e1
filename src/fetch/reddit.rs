//! Reddit API corpus source
//!
//! Uses application-only OAuth (client credentials grant) and pages through
//! `/user/{name}/comments` and `/user/{name}/submitted`, newest first, until
//! the per-kind limit is reached or the listing has no `after` cursor.

use super::CorpusSource;
use crate::config::{resolve_credential, RedditConfig};
use crate::corpus::{utc_from_epoch, Corpus, SourceItem};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Listing endpoints of a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListingKind {
    Comments,
    Submitted,
}

impl ListingKind {
    fn path(&self) -> &'static str {
        match self {
            ListingKind::Comments => "comments",
            ListingKind::Submitted => "submitted",
        }
    }
}

/// Reddit API client
pub struct RedditClient {
    config: RedditConfig,
    client_id: String,
    client_secret: String,
    client: reqwest::Client,
    access_token: Arc<RwLock<Option<String>>>,
}

impl RedditClient {
    /// Create a client with explicit credentials
    pub fn new(config: RedditConfig, client_id: String, client_secret: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client_id,
            client_secret,
            client,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client with credentials resolved from the environment
    pub fn from_config(config: RedditConfig) -> Result<Self> {
        let client_id = resolve_credential(&config.client_id_ref)?;
        let client_secret = resolve_credential(&config.client_secret_ref)?;
        Self::new(config, client_id, client_secret)
    }

    /// Obtain an application-only access token
    async fn get_access_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let response = self
            .client
            .post(&self.config.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to get Reddit access token: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "Reddit token endpoint returned {} (check client id and secret)",
                status
            )));
        }

        let result: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to parse Reddit token response: {}", e)))?;

        let token = match (result.access_token, result.error) {
            (Some(token), _) => token,
            (None, Some(error)) => {
                return Err(Error::Fetch(format!("Reddit token API error: {}", error)));
            }
            (None, None) => {
                return Err(Error::Fetch("Reddit token response had no access_token".to_string()));
            }
        };

        *self.access_token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Page through one listing
    async fn fetch_listing(
        &self,
        token: &str,
        username: &str,
        kind: ListingKind,
        limit: Option<usize>,
    ) -> Result<Vec<SourceItem>> {
        let url = format!(
            "{}/user/{}/{}",
            self.config.api_base.trim_end_matches('/'),
            username,
            kind.path()
        );

        let mut items = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let Some(page_size) = next_page_size(self.config.page_size, limit, items.len()) else {
                break;
            };

            let mut query = vec![
                ("sort", "new".to_string()),
                ("limit", page_size.to_string()),
                ("raw_json", "1".to_string()),
            ];
            if let Some(cursor) = &after {
                query.push(("after", cursor.clone()));
            }

            let response = self
                .client
                .get(&url)
                .bearer_auth(token)
                .query(&query)
                .send()
                .await
                .map_err(|e| {
                    Error::Fetch(format!(
                        "Failed to fetch {} of u/{}: {}",
                        kind.path(),
                        username,
                        e
                    ))
                })?;

            check_status(response.status(), username)?;

            let listing: Listing = response
                .json()
                .await
                .map_err(|e| {
                    Error::Fetch(format!(
                        "Malformed {} listing for u/{}: {}",
                        kind.path(),
                        username,
                        e
                    ))
                })?;

            let page = listing.into_page();
            let received = page.items.len();
            items.extend(page.items);
            after = page.after;

            tracing::debug!(
                username,
                listing = kind.path(),
                received,
                total = items.len(),
                "Fetched listing page"
            );

            if received == 0 || after.is_none() {
                break;
            }
        }

        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }
}

#[async_trait]
impl CorpusSource for RedditClient {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn fetch(&self, username: &str, limit: Option<usize>) -> Result<Corpus> {
        tracing::info!(username, ?limit, "Fetching Reddit activity");

        let token = self.get_access_token().await?;
        let comments = self
            .fetch_listing(&token, username, ListingKind::Comments, limit)
            .await?;
        let posts = self
            .fetch_listing(&token, username, ListingKind::Submitted, limit)
            .await?;

        tracing::info!(
            username,
            comments = comments.len(),
            posts = posts.len(),
            "Fetched Reddit activity"
        );
        Ok(Corpus::new(comments, posts))
    }
}

/// Size of the next page request, or `None` once the limit is reached
fn next_page_size(page_size: usize, limit: Option<usize>, fetched: usize) -> Option<usize> {
    let page_size = page_size.clamp(1, 100);
    match limit {
        Some(limit) if fetched >= limit => None,
        Some(limit) => Some(page_size.min(limit - fetched)),
        None => Some(page_size),
    }
}

fn check_status(status: StatusCode, username: &str) -> Result<()> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(Error::Fetch(format!("User u/{} not found", username))),
        StatusCode::FORBIDDEN => Err(Error::Fetch(format!(
            "Access to u/{} is forbidden (suspended or private)",
            username
        ))),
        StatusCode::UNAUTHORIZED => {
            Err(Error::Fetch("Reddit rejected the access token".to_string()))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            Err(Error::Fetch("Reddit rate limit exceeded".to_string()))
        }
        s => Err(Error::Fetch(format!("Reddit returned {} for u/{}", s, username))),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    kind: String,
    data: ThingData,
}

#[derive(Debug, Deserialize)]
struct ThingData {
    id: String,
    #[serde(default)]
    body: String,
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
    #[serde(default)]
    url: Option<String>,
}

struct Page {
    items: Vec<SourceItem>,
    after: Option<String>,
}

impl Listing {
    /// Map `t1` (comment) and `t3` (link) things to source items; other
    /// kinds are skipped.
    fn into_page(self) -> Page {
        let items = self
            .data
            .children
            .into_iter()
            .filter_map(|thing| {
                let d = thing.data;
                let created_at = utc_from_epoch(d.created_utc);
                match thing.kind.as_str() {
                    "t1" => Some(SourceItem::comment(
                        d.id,
                        d.body,
                        d.score,
                        created_at,
                        d.permalink,
                    )),
                    "t3" => {
                        let post = SourceItem::post(
                            d.id,
                            d.title,
                            d.selftext,
                            d.score,
                            created_at,
                            d.permalink,
                        );
                        Some(match d.url {
                            Some(url) => post.with_url(url),
                            None => post,
                        })
                    }
                    _ => None,
                }
            })
            .collect();

        Page {
            items,
            after: self.data.after.filter(|a| !a.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::SourceKind;

    const COMMENTS_PAGE: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": "t1_def",
            "children": [
                {"kind": "t1", "data": {
                    "id": "abc", "body": "I love playing video games, especially RPGs.",
                    "score": 10, "created_utc": 1678886400.0,
                    "permalink": "/r/gaming/comments/abcde/comment1/abc/", "subreddit": "gaming"
                }},
                {"kind": "more", "data": {"id": "zzz"}}
            ]
        }
    }"#;

    const POSTS_PAGE: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": null,
            "children": [
                {"kind": "t3", "data": {
                    "id": "pqrst", "title": "My favorite RPGs of all time",
                    "selftext": "I enjoy games like The Witcher and Skyrim.",
                    "score": 20, "created_utc": 1679145600,
                    "permalink": "/r/rpg/comments/pqrst/my_favorite_rpgs/",
                    "url": "https://www.reddit.com/r/rpg/comments/pqrst/my_favorite_rpgs/"
                }}
            ]
        }
    }"#;

    #[test]
    fn test_comment_listing() {
        let listing: Listing = serde_json::from_str(COMMENTS_PAGE).unwrap();
        let page = listing.into_page();
        assert_eq!(page.after.as_deref(), Some("t1_def"));
        assert_eq!(page.items.len(), 1);

        let item = &page.items[0];
        assert_eq!(item.kind, SourceKind::Comment);
        assert_eq!(item.id, "abc");
        assert_eq!(item.score, 10);
        assert_eq!(item.created_at.timestamp(), 1678886400);
        assert!(item.title.is_empty());
    }

    #[test]
    fn test_post_listing() {
        let listing: Listing = serde_json::from_str(POSTS_PAGE).unwrap();
        let page = listing.into_page();
        assert!(page.after.is_none());

        let item = &page.items[0];
        assert_eq!(item.kind, SourceKind::Post);
        assert_eq!(item.title, "My favorite RPGs of all time");
        assert_eq!(item.body, "I enjoy games like The Witcher and Skyrim.");
        assert_eq!(item.permalink, "/r/rpg/comments/pqrst/my_favorite_rpgs/");
        assert!(item.url.is_some());
    }

    #[test]
    fn test_empty_listing() {
        let body = r#"{"kind": "Listing", "data": {"after": "", "children": []}}"#;
        let listing: Listing = serde_json::from_str(body).unwrap();
        let page = listing.into_page();
        assert!(page.items.is_empty());
        assert!(page.after.is_none());
    }

    #[test]
    fn test_next_page_size() {
        assert_eq!(next_page_size(100, Some(250), 0), Some(100));
        assert_eq!(next_page_size(100, Some(250), 200), Some(50));
        assert_eq!(next_page_size(100, Some(250), 250), None);
        assert_eq!(next_page_size(100, Some(0), 0), None);
        assert_eq!(next_page_size(100, None, 1000), Some(100));
        assert_eq!(next_page_size(500, None, 0), Some(100));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK, "kojied").is_ok());
        let err = check_status(StatusCode::NOT_FOUND, "kojied").unwrap_err();
        assert!(err.to_string().contains("u/kojied not found"));
        assert!(matches!(check_status(StatusCode::FORBIDDEN, "x"), Err(Error::Fetch(_))));
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let config = RedditConfig {
            client_id_ref: "PERSONA_LENS_TEST_UNSET_CLIENT_ID".to_string(),
            ..RedditConfig::default()
        };
        let err = RedditClient::from_config(config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
