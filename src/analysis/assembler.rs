//! Heuristic persona assembly
//!
//! Runs every scorer once over the shared, lower-cased corpus text and
//! packages the results with citations into a `Persona`. Assembly is pure
//! and infallible: an empty corpus produces a persona of "Unknown" fields,
//! empty lists, zero motivations and neutral sentiment.

use super::archetype::{activity_tier, ArchetypeStrategy};
use super::citations::CitationSelector;
use super::indicators::Indicators;
use super::keywords::KeywordExtractor;
use super::scorers::{
    classify, score_frustrations, score_motivations, score_personality, score_presence,
    score_sentiment,
};
use crate::config::AnalysisConfig;
use crate::corpus::Corpus;
use crate::persona::{display_name, Persona, UNKNOWN};
use std::sync::Arc;

/// Default number of common topics
pub const DEFAULT_TOP_TOPICS: usize = 10;

/// Composes scorer outputs and citations into one persona
#[derive(Debug, Clone)]
pub struct PersonaAssembler {
    indicators: Arc<Indicators>,
    extractor: KeywordExtractor,
    citations: CitationSelector,
    archetype: ArchetypeStrategy,
    top_topics: usize,
    frustration_limit: usize,
    frustration_chars: usize,
}

impl Default for PersonaAssembler {
    fn default() -> Self {
        Self::new(Arc::new(Indicators::default()))
    }
}

impl PersonaAssembler {
    /// Create an assembler over the given indicator tables with default settings
    pub fn new(indicators: Arc<Indicators>) -> Self {
        Self::from_config(&AnalysisConfig::default(), indicators)
    }

    /// Create an assembler from the `[analysis]` config section
    pub fn from_config(config: &AnalysisConfig, indicators: Arc<Indicators>) -> Self {
        let citations = CitationSelector::new(config.citation_policy)
            .per_kind(config.citations_per_kind)
            .max_chars(config.citation_chars)
            .permalink_base(config.permalink_base.clone());

        Self {
            indicators,
            extractor: KeywordExtractor::default(),
            citations,
            archetype: config.archetype,
            top_topics: config.top_topics,
            frustration_limit: config.frustration_limit,
            frustration_chars: config.frustration_chars,
        }
    }

    /// Replace the keyword extractor (e.g. a custom stop-word list)
    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the citation selector
    pub fn with_citations(mut self, citations: CitationSelector) -> Self {
        self.citations = citations;
        self
    }

    /// Replace the archetype strategy
    pub fn with_archetype(mut self, archetype: ArchetypeStrategy) -> Self {
        self.archetype = archetype;
        self
    }

    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    /// Build a persona for `subject` (the account name, if known)
    pub fn assemble(&self, subject: Option<&str>, corpus: &Corpus) -> Persona {
        let text = corpus.combined_text().to_lowercase();
        let indicators = &self.indicators;

        let keywords = self.extractor.extract(&text);
        let common_topics = keywords.top_words(self.top_topics);

        let personality = score_personality(&text, &indicators.personality);
        let has_evidence = !corpus.is_empty();

        let persona = Persona {
            name: subject
                .map(display_name)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            age: classify(&text, &indicators.age),
            occupation: classify(&text, &indicators.occupation),
            status: classify(&text, &indicators.status),
            location: classify(&text, &indicators.location),
            tier: activity_tier(corpus.len()),
            archetype: self.archetype.choose(&personality, has_evidence),
            personality,
            motivations: score_motivations(&text, &indicators.motivations),
            behaviors_habits: score_presence(&text, &indicators.behaviors),
            goals_needs: score_presence(&text, &indicators.goals),
            frustrations: score_frustrations(
                &text,
                &indicators.frustrations,
                self.frustration_limit,
                self.frustration_chars,
            ),
            sentiment: score_sentiment(&text, &indicators.sentiment),
            quote: activity_quote(corpus),
            citations: self.citations.select(corpus, &common_topics),
            common_topics,
        };

        tracing::debug!(
            comments = corpus.comments.len(),
            posts = corpus.posts.len(),
            topics = persona.common_topics.len(),
            citations = persona.citations.len(),
            sentiment = %persona.sentiment,
            "Assembled heuristic persona"
        );

        persona
    }
}

/// Placeholder quote summarizing what was analyzed
fn activity_quote(corpus: &Corpus) -> String {
    format!(
        "Based on {} comments and {} posts of public activity.",
        corpus.comments.len(),
        corpus.posts.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::citations::CitationPolicy;
    use crate::analysis::indicators::{IndicatorTable, PresenceRule};
    use crate::corpus::{utc_from_epoch, SourceItem, SourceKind};
    use crate::persona::Sentiment;

    fn rpg_corpus() -> Corpus {
        Corpus::new(
            vec![SourceItem::comment(
                "c1",
                "I love playing video games, especially RPGs.",
                10,
                utc_from_epoch(1678886400.0),
                "/r/gaming/comments/abcde/comment1",
            )],
            vec![SourceItem::post(
                "p1",
                "My favorite RPGs of all time",
                "I enjoy games like The Witcher and Skyrim.",
                20,
                utc_from_epoch(1679145600.0),
                "/r/rpg/comments/pqrst",
            )],
        )
    }

    #[test]
    fn test_end_to_end_example() {
        let persona = PersonaAssembler::default().assemble(Some("testuser"), &rpg_corpus());

        assert!(persona.common_topics.contains(&"rpgs".to_string()));
        assert!(persona.common_topics.contains(&"games".to_string()));
        assert_eq!(persona.sentiment, Sentiment::Positive);

        assert_eq!(persona.citations.len(), 2);
        assert_eq!(persona.citations[0].id, 1);
        assert_eq!(persona.citations[0].kind, SourceKind::Comment);
        assert_eq!(persona.citations[0].score, 10);
        assert_eq!(persona.citations[1].id, 2);
        assert_eq!(persona.citations[1].kind, SourceKind::Post);
        assert_eq!(
            persona.citations[1].permalink,
            "https://www.reddit.com/r/rpg/comments/pqrst"
        );

        assert_eq!(persona.name, "Testuser");
        assert_eq!(persona.tier, "Casual User");
        assert!(persona
            .behaviors_habits
            .contains(&"Spends leisure time playing video games".to_string()));
        assert_eq!(persona.motivations["preferences"], 100);
        assert_eq!(persona.quote, "Based on 1 comments and 1 posts of public activity.");
    }

    #[test]
    fn test_topics_most_frequent_first() {
        let persona = PersonaAssembler::default().assemble(None, &rpg_corpus());
        assert_eq!(&persona.common_topics[..2], &["games".to_string(), "rpgs".to_string()]);
        assert!(persona.common_topics.len() <= DEFAULT_TOP_TOPICS);
    }

    #[test]
    fn test_empty_corpus_degenerate_persona() {
        let persona = PersonaAssembler::default().assemble(None, &Corpus::default());
        assert!(persona.common_topics.is_empty());
        assert!(persona.citations.is_empty());
        assert!(persona.behaviors_habits.is_empty());
        assert!(persona.goals_needs.is_empty());
        assert!(persona.frustrations.is_empty());
        assert_eq!(persona.sentiment, Sentiment::Neutral);
        assert_eq!(persona.name, UNKNOWN);
        assert_eq!(persona.age, UNKNOWN);
        assert_eq!(persona.location, UNKNOWN);
        assert_eq!(persona.occupation, UNKNOWN);
        assert_eq!(persona.tier, UNKNOWN);
        assert_eq!(persona.archetype, UNKNOWN);
        assert!(persona.motivations.values().all(|v| *v == 0));
    }

    #[test]
    fn test_substituted_indicator_tables() {
        let indicators = Indicators {
            motivations: IndicatorTable::from_pairs(&[
                ("speed", &["skyrim"]),
                ("comfort", &["witcher"]),
            ]),
            behaviors: vec![PresenceRule::new("fantasy", &["witcher"], "Reads fantasy")],
            goals: Vec::new(),
            location: IndicatorTable::from_pairs(&[("Tamriel", &["skyrim"])]),
            ..Indicators::default()
        };
        let assembler = PersonaAssembler::new(Arc::new(indicators));
        let persona = assembler.assemble(Some("testuser"), &rpg_corpus());

        assert_eq!(persona.motivations.len(), 2);
        assert_eq!(persona.motivations["speed"], 100);
        assert_eq!(persona.motivations["comfort"], 100);
        assert_eq!(persona.behaviors_habits, vec!["Reads fantasy".to_string()]);
        assert!(persona.goals_needs.is_empty());
        assert_eq!(persona.location, "Tamriel");
    }

    #[test]
    fn test_keyword_gated_citations() {
        let mut corpus = rpg_corpus();
        corpus.comments.push(SourceItem::comment(
            "c2",
            "Weather is nice.",
            1,
            utc_from_epoch(1678886500.0),
            "/r/weather/comments/c2",
        ));
        let config = AnalysisConfig {
            citation_policy: CitationPolicy::KeywordGated,
            ..AnalysisConfig::default()
        };
        let assembler = PersonaAssembler::from_config(&config, Arc::new(Indicators::default()));
        let persona = assembler.assemble(None, &corpus);

        // "weather" and "nice" are topics too, so narrow the keyword set
        let gated = CitationSelector::new(CitationPolicy::KeywordGated)
            .select(&corpus, &["rpgs".to_string()]);
        assert_eq!(gated.len(), 2);
        assert_eq!(persona.citations.len(), 3);
        let ids: Vec<u32> = persona.citations.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_frustrations_from_corpus() {
        let corpus = Corpus::new(
            vec![SourceItem::comment(
                "c3",
                "The new movie was terrible, very disappointing. Wasted my time and money.",
                2,
                utc_from_epoch(1679059200.0),
                "/r/movies/comments/klmno/comment3",
            )],
            vec![],
        );
        let persona = PersonaAssembler::default().assemble(None, &corpus);
        assert_eq!(
            persona.frustrations,
            vec![
                "Experiences difficulty with: the new movie was terrible, very disappointing".to_string(),
                "Experiences difficulty with: wasted my time and money".to_string(),
            ]
        );
        assert_eq!(persona.sentiment, Sentiment::Negative);
    }
}
