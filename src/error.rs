//! Persona Lens error types

use thiserror::Error;

/// Persona Lens error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus fetch failed or returned a malformed listing
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// LLM call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM answered, but not with a parseable persona
    #[error("LLM response error: {0}")]
    LlmResponse(String),

    /// Report rendering or export error
    #[error("Report error: {0}")]
    Report(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Persona Lens operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_errors_are_distinct() {
        let call = Error::Llm("timeout".to_string());
        let parse = Error::LlmResponse("expected value at line 1".to_string());
        assert!(call.to_string().starts_with("LLM error"));
        assert!(parse.to_string().starts_with("LLM response error"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "corpus.json");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("corpus.json"));
    }
}
