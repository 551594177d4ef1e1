//! Heuristic persona analysis
//!
//! Keyword extraction and indicator scoring over the corpus text, with no
//! network access. Includes:
//! - Stop-word filtered keyword counts (`keywords`)
//! - Substring indicator tables with compiled-in defaults (`indicators`)
//! - Per-family attribute scorers (`scorers`)
//! - Citation selection policies (`citations`)
//! - Archetype and activity tier (`archetype`)
//! - Persona assembly (`assembler`)

pub mod archetype;
pub mod assembler;
pub mod citations;
pub mod indicators;
pub mod keywords;
pub mod scorers;

pub use archetype::{activity_tier, ArchetypeStrategy, ARCHETYPES};
pub use assembler::{PersonaAssembler, DEFAULT_TOP_TOPICS};
pub use citations::{
    absolute_permalink, CitationPolicy, CitationSelector, DEFAULT_CITATIONS_PER_KIND,
    DEFAULT_CITATION_CHARS, DEFAULT_PERMALINK_BASE,
};
pub use indicators::{
    IndicatorCategory, IndicatorTable, Indicators, PersonalityIndicators, PresenceRule,
    ScoreMap, SentimentLexicon,
};
pub use keywords::{KeywordCounts, KeywordExtractor, STOP_WORDS};
