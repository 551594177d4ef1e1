//! LLM persona generation
//!
//! The LLM path sends the corpus with a persona schema to a text completion
//! service and parses the JSON answer into a `Persona`. Failures are kept
//! apart: `Error::Llm` when the call itself fails, `Error::LlmResponse` when
//! the answer is not a parseable persona. Citations in the answer are
//! discarded and rebuilt from the corpus.

pub mod gemini;
pub mod generator;
pub mod parse;
pub mod prompt;

pub use gemini::GeminiClient;
pub use generator::LlmPersonaGenerator;
pub use parse::{extract_json_block, parse_persona};
pub use prompt::build_persona_prompt;

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Text completion service
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Client name for logging
    fn name(&self) -> &str;

    /// Complete a single prompt
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Build the client named by `[llm].provider`
pub fn client_from_config(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    match config.provider.to_lowercase().as_str() {
        "gemini" | "google" => Ok(Box::new(GeminiClient::from_config(config)?)),
        other => Err(Error::Config(format!("Unsupported LLM provider: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..LlmConfig::default()
        };
        let err = client_from_config(&config).err().unwrap();
        assert!(err.to_string().contains("Unsupported LLM provider"));
    }
}
