//! LLM-backed persona generation

use super::parse::parse_persona;
use super::prompt::build_persona_prompt;
use super::LlmClient;
use crate::analysis::{CitationPolicy, CitationSelector};
use crate::corpus::Corpus;
use crate::error::Result;
use crate::persona::{display_name, Persona, UNKNOWN};

/// Generates personas through an `LlmClient`
pub struct LlmPersonaGenerator<C: LlmClient + ?Sized> {
    client: Box<C>,
    citations: CitationSelector,
}

impl<C: LlmClient + ?Sized> LlmPersonaGenerator<C> {
    pub fn new(client: Box<C>) -> Self {
        Self {
            client,
            citations: CitationSelector::new(CitationPolicy::FirstN),
        }
    }

    /// Replace the citation selector used after parsing
    pub fn with_citations(mut self, citations: CitationSelector) -> Self {
        self.citations = citations;
        self
    }

    /// Generate a persona for `username` from `corpus`.
    ///
    /// Citations always come from the corpus, never from the model. An
    /// empty corpus yields the unknown persona without calling the model.
    pub async fn generate(&self, username: &str, corpus: &Corpus) -> Result<Persona> {
        if corpus.is_empty() {
            tracing::warn!(username, "No public activity, skipping LLM call");
            return Ok(Persona {
                name: display_name(username),
                ..Persona::default()
            });
        }

        let prompt = build_persona_prompt(username, corpus);
        tracing::info!(
            client = self.client.name(),
            username,
            prompt_chars = prompt.len(),
            "Requesting persona from LLM"
        );

        let answer = self.client.complete(&prompt).await?;
        let mut persona = parse_persona(&answer).map_err(|e| {
            tracing::warn!(username, error = %e, "LLM answer was not a persona");
            e
        })?;

        if persona.name.trim().is_empty() || persona.name == UNKNOWN {
            persona.name = display_name(username);
        }
        persona.citations = self.citations.select(corpus, &[]);

        tracing::debug!(
            username,
            citations = persona.citations.len(),
            sentiment = %persona.sentiment,
            "Parsed LLM persona"
        );
        Ok(persona)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{utc_from_epoch, SourceItem, SourceKind};
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockClient {
        answer: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockClient {
        fn answering(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                answer: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for MockClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answer.clone().map_err(Error::Llm)
        }
    }

    fn corpus() -> Corpus {
        let comments = (1..=7)
            .map(|n| {
                SourceItem::comment(
                    format!("c{}", n),
                    format!("comment number {}", n),
                    n,
                    utc_from_epoch(1678886400.0),
                    format!("/r/test/comments/c{}", n),
                )
            })
            .collect();
        let posts = vec![SourceItem::post(
            "p1",
            "My favorite RPGs of all time",
            "I enjoy games like The Witcher and Skyrim.",
            20,
            utc_from_epoch(1679145600.0),
            "/r/rpg/comments/pqrst",
        )];
        Corpus::new(comments, posts)
    }

    #[tokio::test]
    async fn test_generate_replaces_citations() {
        let answer = r#"```json
        {"name": "Kojied", "sentiment": "Positive", "common_topics": ["rpgs"],
         "citations": [{"id": 99, "type": "comment", "content": "made up", "permalink": "x", "score": 0}]}
        ```"#;
        let generator = LlmPersonaGenerator::new(Box::new(MockClient::answering(answer)));
        let persona = generator.generate("kojied", &corpus()).await.unwrap();

        assert_eq!(persona.name, "Kojied");
        assert_eq!(persona.citations.len(), 6);
        assert_eq!(persona.citation_count(SourceKind::Comment), 5);
        assert_eq!(persona.citation_count(SourceKind::Post), 1);
        assert_eq!(persona.citations[0].id, 1);
        assert_eq!(persona.citations[0].content, "comment number 1");
        assert_eq!(
            persona.citations[5].permalink,
            "https://www.reddit.com/r/rpg/comments/pqrst"
        );
        assert!(persona.citations.iter().all(|c| c.content != "made up"));
    }

    #[tokio::test]
    async fn test_missing_name_falls_back_to_username() {
        let client = MockClient::answering(r#"{"age": "18-24"}"#);
        let generator = LlmPersonaGenerator::new(Box::new(client));
        let persona = generator.generate("kojied", &corpus()).await.unwrap();
        assert_eq!(persona.name, "Kojied");
        assert_eq!(persona.age, "18-24");
    }

    #[tokio::test]
    async fn test_prompt_sent_to_client() {
        let client = MockClient::answering("{}");
        let generator = LlmPersonaGenerator::new(Box::new(client));
        generator.generate("kojied", &corpus()).await.unwrap();
        let prompts = generator.client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Reddit Username: kojied"));
        assert!(prompts[0].contains("- comment number 7"));
    }

    #[tokio::test]
    async fn test_call_failure_is_llm_error() {
        let generator = LlmPersonaGenerator::new(Box::new(MockClient::failing("timed out")));
        let err = generator.generate("kojied", &corpus()).await.unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
    }

    #[tokio::test]
    async fn test_unparseable_answer_is_response_error() {
        let client = MockClient::answering("Sure! Here is a persona.");
        let generator = LlmPersonaGenerator::new(Box::new(client));
        let err = generator.generate("kojied", &corpus()).await.unwrap_err();
        assert!(matches!(err, Error::LlmResponse(_)));
    }

    #[tokio::test]
    async fn test_works_with_boxed_trait_object() {
        let client: Box<dyn LlmClient> = Box::new(MockClient::answering("{}"));
        let generator = LlmPersonaGenerator::new(client);
        let persona = generator.generate("kojied", &corpus()).await.unwrap();
        assert_eq!(persona.citations.len(), 6);
    }

    #[tokio::test]
    async fn test_empty_corpus_skips_client() {
        let client = MockClient::answering(r#"{"age": "30"}"#);
        let generator = LlmPersonaGenerator::new(Box::new(client));
        let persona = generator.generate("kojied", &Corpus::default()).await.unwrap();

        assert!(generator.client.prompts.lock().unwrap().is_empty());
        assert_eq!(persona.name, "Kojied");
        assert_eq!(persona.age, UNKNOWN);
        assert_eq!(persona.sentiment, crate::persona::Sentiment::Neutral);
        assert!(persona.citations.is_empty());
        assert!(persona.common_topics.is_empty());
    }

    #[tokio::test]
    async fn test_loosely_typed_answer_still_generates() {
        let answer = r#"{"name": null, "age": 25, "motivations": {"speed": 85.0, "comfort": 300},
            "personality": {"extrovert_introvert": "ambivert"}, "sentiment": "Mostly Positive"}"#;
        let generator = LlmPersonaGenerator::new(Box::new(MockClient::answering(answer)));
        let persona = generator.generate("kojied", &corpus()).await.unwrap();

        assert_eq!(persona.name, "Kojied");
        assert_eq!(persona.age, "25");
        assert_eq!(persona.motivations["speed"], 85);
        assert_eq!(persona.motivations["comfort"], 100);
        assert_eq!(persona.sentiment, crate::persona::Sentiment::Positive);
    }
}
