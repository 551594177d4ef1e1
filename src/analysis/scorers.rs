//! Attribute scorers
//!
//! Each scorer is a pure function of the lower-cased corpus text and one
//! indicator family. Policies differ per family:
//!
//! | Family                  | Policy                                          |
//! |-------------------------|-------------------------------------------------|
//! | personality             | binary pair, strictly higher side wins          |
//! | motivations             | normalized to the maximum, scaled to 0..=100    |
//! | behaviors, goals        | canned statement when any trigger is present    |
//! | age, location, ...      | highest nonzero category, else "Unknown"        |
//! | sentiment               | token scan, sign of positive minus negative     |
//! | frustrations            | first matching sentences, templated, truncated  |

use super::indicators::{
    any_trigger, count_triggers, IndicatorTable, PersonalityIndicators, PresenceRule,
    SentimentLexicon,
};
use super::keywords::tokenize;
use crate::persona::{
    Decisions, Energy, Lifestyle, Motivations, Perception, Personality, Sentiment, UNKNOWN,
};
use std::collections::HashSet;

/// Prefix of every frustration statement
pub const FRUSTRATION_PREFIX: &str = "Experiences difficulty with: ";

/// Pick a side of a binary trait pair.
///
/// The second side wins only with a strictly higher count; ties (including
/// no evidence at all) go to the first-named side.
pub fn pick_side<T>(first_count: usize, second_count: usize, first: T, second: T) -> T {
    if second_count > first_count {
        second
    } else {
        first
    }
}

/// Score the four personality dimensions
pub fn score_personality(text: &str, indicators: &PersonalityIndicators) -> Personality {
    Personality {
        extrovert_introvert: pick_side(
            count_triggers(text, &indicators.extrovert),
            count_triggers(text, &indicators.introvert),
            Energy::Extrovert,
            Energy::Introvert,
        ),
        thinking_feeling: pick_side(
            count_triggers(text, &indicators.thinking),
            count_triggers(text, &indicators.feeling),
            Decisions::Thinking,
            Decisions::Feeling,
        ),
        judging_perceiving: pick_side(
            count_triggers(text, &indicators.judging),
            count_triggers(text, &indicators.perceiving),
            Lifestyle::Judging,
            Lifestyle::Perceiving,
        ),
        sensing_intuition: pick_side(
            count_triggers(text, &indicators.sensing),
            count_triggers(text, &indicators.intuition),
            Perception::Sensing,
            Perception::Intuition,
        ),
    }
}

/// Normalize motivation counts against the strongest category.
///
/// The maximum maps to exactly 100, the rest are rounded proportionally;
/// with no hits at all every category is 0.
pub fn score_motivations(text: &str, table: &IndicatorTable) -> Motivations {
    let scores = table.score(text);
    let max = scores.max();

    scores
        .iter()
        .map(|(label, raw)| {
            let scaled = if max == 0 {
                0
            } else {
                ((raw as f64 / max as f64) * 100.0).round() as u8
            };
            (label.to_string(), scaled)
        })
        .collect()
}

/// Statements of every rule with at least one trigger present, in rule order
pub fn score_presence(text: &str, rules: &[PresenceRule]) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| any_trigger(text, &rule.triggers))
        .map(|rule| rule.statement.clone())
        .collect()
}

/// Highest-scoring category label, or `"Unknown"` without evidence
pub fn classify(text: &str, table: &IndicatorTable) -> String {
    table
        .score(text)
        .leader()
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Token-level sentiment: net positive → Positive, net negative → Negative
pub fn score_sentiment(text: &str, lexicon: &SentimentLexicon) -> Sentiment {
    let positive: HashSet<String> = lexicon.positive.iter().map(|w| w.to_lowercase()).collect();
    let negative: HashSet<String> = lexicon.negative.iter().map(|w| w.to_lowercase()).collect();

    let net: i64 = tokenize(text)
        .map(|token| {
            if positive.contains(&token) {
                1
            } else if negative.contains(&token) {
                -1
            } else {
                0
            }
        })
        .sum();

    match net {
        n if n > 0 => Sentiment::Positive,
        n if n < 0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

/// Split text into trimmed, non-empty sentences
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Truncate to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Collect up to `limit` sentences mentioning a frustration trigger, each
/// rendered as `"Experiences difficulty with: …"` and cut to `max_chars`.
pub fn score_frustrations(
    text: &str,
    triggers: &[String],
    limit: usize,
    max_chars: usize,
) -> Vec<String> {
    sentences(text)
        .filter(|sentence| any_trigger(sentence, triggers))
        .take(limit)
        .map(|sentence| truncate_chars(&format!("{}{}", FRUSTRATION_PREFIX, sentence), max_chars))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::indicators::{default_motivations, IndicatorCategory, Indicators};

    fn lexicon() -> SentimentLexicon {
        SentimentLexicon::default()
    }

    #[test]
    fn test_sentiment_examples() {
        assert_eq!(score_sentiment("i love this, it's great", &lexicon()), Sentiment::Positive);
        assert_eq!(score_sentiment("i hate this, it's terrible", &lexicon()), Sentiment::Negative);
        assert_eq!(score_sentiment("the sky is blue", &lexicon()), Sentiment::Neutral);
        assert_eq!(score_sentiment("", &lexicon()), Sentiment::Neutral);
    }

    #[test]
    fn test_sentiment_is_token_level() {
        // "glove" contains "love" but is a different token
        assert_eq!(score_sentiment("lost a glove", &lexicon()), Sentiment::Neutral);
        assert_eq!(score_sentiment("love love hate", &lexicon()), Sentiment::Positive);
        assert_eq!(score_sentiment("good but bad", &lexicon()), Sentiment::Neutral);
    }

    #[test]
    fn test_pick_side_ties_go_first() {
        assert_eq!(pick_side(0, 0, "first", "second"), "first");
        assert_eq!(pick_side(2, 2, "first", "second"), "first");
        assert_eq!(pick_side(1, 2, "first", "second"), "second");
        assert_eq!(pick_side(3, 2, "first", "second"), "first");
    }

    #[test]
    fn test_personality_scoring() {
        let indicators = PersonalityIndicators {
            extrovert: vec!["party".to_string()],
            introvert: vec!["alone".to_string()],
            thinking: vec!["logic".to_string()],
            feeling: vec!["feel".to_string()],
            judging: vec!["plan".to_string()],
            perceiving: vec!["random".to_string()],
            sensing: vec!["detail".to_string()],
            intuition: vec!["idea".to_string()],
        };
        let personality = score_personality(
            "alone again. i feel it. i feel fine. logic. random idea, random detail",
            &indicators,
        );
        assert_eq!(personality.extrovert_introvert, Energy::Introvert);
        assert_eq!(personality.thinking_feeling, Decisions::Feeling);
        assert_eq!(personality.judging_perceiving, Lifestyle::Perceiving);
        // one "detail" vs one "idea": tie
        assert_eq!(personality.sensing_intuition, Perception::Sensing);
    }

    #[test]
    fn test_personality_empty_text_defaults() {
        let personality = score_personality("", &PersonalityIndicators::default());
        assert_eq!(personality, Personality::default());
    }

    #[test]
    fn test_motivations_normalized_to_max() {
        let table = IndicatorTable::from_pairs(&[
            ("speed", &["fast"]),
            ("comfort", &["cozy"]),
            ("wellness", &["gym"]),
        ]);
        let scores = score_motivations("fast fast fast fast cozy", &table);
        assert_eq!(scores["speed"], 100);
        assert_eq!(scores["comfort"], 25);
        assert_eq!(scores["wellness"], 0);
    }

    #[test]
    fn test_motivations_rounding_and_bounds() {
        let table = IndicatorTable::from_pairs(&[("a", &["x"]), ("b", &["y"])]);
        let scores = score_motivations("x x x y", &table);
        assert_eq!(scores["a"], 100);
        assert_eq!(scores["b"], 33);

        let scores = score_motivations("x x x y y", &table);
        assert_eq!(scores["b"], 67);
        assert!(scores.values().all(|v| *v <= 100));
    }

    #[test]
    fn test_motivations_all_zero() {
        let scores = score_motivations("nothing relevant here", &default_motivations());
        assert_eq!(scores.len(), 6);
        assert!(scores.values().all(|v| *v == 0));
    }

    #[test]
    fn test_presence_gated_statements() {
        let rules = vec![
            PresenceRule::new("gaming", &["game"], "Plays games"),
            PresenceRule::new("cooking", &["recipe"], "Cooks"),
            PresenceRule::new("reading", &["book"], "Reads"),
        ];
        let statements = score_presence("a book about games and more games", &rules);
        assert_eq!(statements, vec!["Plays games".to_string(), "Reads".to_string()]);
    }

    #[test]
    fn test_classify_unknown_without_evidence() {
        let table = IndicatorTable::new(vec![IndicatorCategory::new("Europe", &["london"])]);
        assert_eq!(classify("moved to london last year", &table), "Europe");
        assert_eq!(classify("somewhere", &table), UNKNOWN);
        assert_eq!(classify("anything", &IndicatorTable::default()), UNKNOWN);
    }

    #[test]
    fn test_frustrations_limited_and_truncated() {
        let triggers = Indicators::default().frustrations;
        let text = "the new movie was terrible, very disappointing. i had fun. \
                    this update is broken again! why is everything a problem? \
                    another issue with the servers that keeps going on and on and on and on and on and on and on and on";
        let frustrations = score_frustrations(text, &triggers, 3, 100);
        assert_eq!(frustrations.len(), 3);
        assert_eq!(
            frustrations[0],
            "Experiences difficulty with: the new movie was terrible, very disappointing"
        );
        assert_eq!(frustrations[1], "Experiences difficulty with: this update is broken again");
        assert!(frustrations.iter().all(|f| f.starts_with(FRUSTRATION_PREFIX)));
        assert!(frustrations.iter().all(|f| f.chars().count() <= 100));
    }

    #[test]
    fn test_frustration_truncation() {
        let triggers = vec!["annoy".to_string()];
        let long = format!("annoying {}", "x".repeat(200));
        let frustrations = score_frustrations(&long, &triggers, 3, 100);
        assert_eq!(frustrations.len(), 1);
        assert_eq!(frustrations[0].chars().count(), 100);
    }

    #[test]
    fn test_sentences() {
        let parts: Vec<&str> = sentences("One. Two!  Three?\nFour").collect();
        assert_eq!(parts, vec!["One", "Two", "Three", "Four"]);
        assert_eq!(sentences("").count(), 0);
    }
}
