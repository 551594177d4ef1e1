//! Persona Lens configuration management

use crate::analysis::{
    ArchetypeStrategy, CitationPolicy, Indicators, DEFAULT_CITATIONS_PER_KIND,
    DEFAULT_CITATION_CHARS, DEFAULT_PERMALINK_BASE, DEFAULT_TOP_TOPICS,
};
use crate::error::{Error, Result};
use crate::persona::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Persona Lens configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaLensConfig {
    /// Reddit API configuration
    pub reddit: RedditConfig,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Heuristic analysis settings
    pub analysis: AnalysisConfig,

    /// Indicator tables; any family left out keeps its defaults
    pub indicators: Indicators,

    /// Report output settings
    pub report: ReportConfig,
}

impl PersonaLensConfig {
    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("persona-lens").join("config.toml"))
    }
}

/// Reddit API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    /// Environment variable holding the OAuth client id
    pub client_id_ref: String,

    /// Environment variable holding the OAuth client secret
    pub client_secret_ref: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// OAuth token endpoint
    pub auth_url: String,

    /// Base URL of the authenticated API
    pub api_base: String,

    /// Maximum items fetched per kind (`0` or unset = until the listing ends)
    pub fetch_limit: Option<usize>,

    /// Items requested per listing page (the API caps this at 100)
    pub page_size: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id_ref: "REDDIT_CLIENT_ID".to_string(),
            client_secret_ref: "REDDIT_CLIENT_SECRET".to_string(),
            user_agent: concat!("persona-lens/", env!("CARGO_PKG_VERSION")).to_string(),
            auth_url: "https://www.reddit.com/api/v1/access_token".to_string(),
            api_base: "https://oauth.reddit.com".to_string(),
            fetch_limit: Some(100),
            page_size: 100,
            timeout_secs: 30,
        }
    }
}

impl RedditConfig {
    /// Per-kind limit for one fetch: the requested limit, else the
    /// configured one; `0` means no limit
    pub fn effective_limit(&self, requested: Option<usize>) -> Option<usize> {
        requested.or(self.fetch_limit).filter(|&limit| limit > 0)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name; only `gemini` is built in
    pub provider: String,

    /// Environment variable holding the API key
    pub api_key_ref: String,

    /// Model identifier
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            api_key_ref: "GOOGLE_API_KEY".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
            temperature: None,
        }
    }
}

/// Heuristic analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of common topics kept
    pub top_topics: usize,

    /// Citation selection policy
    pub citation_policy: CitationPolicy,

    /// Citations per kind (comments, posts)
    pub citations_per_kind: usize,

    /// Citation excerpt length in characters
    pub citation_chars: usize,

    /// Base for site-relative permalinks
    pub permalink_base: String,

    /// Archetype selection
    pub archetype: ArchetypeStrategy,

    /// Maximum frustration statements
    pub frustration_limit: usize,

    /// Maximum characters per frustration statement
    pub frustration_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_topics: DEFAULT_TOP_TOPICS,
            citation_policy: CitationPolicy::default(),
            citations_per_kind: DEFAULT_CITATIONS_PER_KIND,
            citation_chars: DEFAULT_CITATION_CHARS,
            permalink_base: DEFAULT_PERMALINK_BASE.to_string(),
            archetype: ArchetypeStrategy::default(),
            frustration_limit: 3,
            frustration_chars: 100,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory reports are written to
    pub output_dir: PathBuf,

    /// Report format
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: ReportFormat::Text,
        }
    }
}

/// Resolve a credential from the environment.
///
/// `reference` names an environment variable (e.g. `"reddit_client_id"` →
/// reads `$REDDIT_CLIENT_ID`). The exact name is tried first, then the
/// UPPER_CASE form.
pub fn resolve_credential(reference: &str) -> Result<String> {
    std::env::var(reference)
        .or_else(|_| std::env::var(reference.to_uppercase()))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            Error::Config(format!(
                "Missing credential: set the {} environment variable",
                reference.to_uppercase()
            ))
        })
}
