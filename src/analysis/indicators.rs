//! Indicator tables
//!
//! An indicator table maps a category label to trigger substrings. Scoring
//! counts every occurrence of every trigger in the lower-cased corpus text:
//! plain substring containment, overlapping matches included, no word
//! boundaries ("run" also hits "brunch").
//!
//! Tables are plain values. The defaults below are compiled in; a config
//! file may replace any family, and tests build small tables directly.

use serde::{Deserialize, Serialize};

/// Count occurrences of `needle` in `haystack`, overlapping matches included.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        count += 1;
        let at = start + pos;
        // step one char so the next search may overlap this match
        start = at + haystack[at..].chars().next().map(char::len_utf8).unwrap_or(1);
    }
    count
}

/// Sum of occurrences of all triggers
pub fn count_triggers(text: &str, triggers: &[String]) -> usize {
    triggers
        .iter()
        .map(|t| count_occurrences(text, &t.to_lowercase()))
        .sum()
}

/// True when at least one trigger occurs
pub fn any_trigger(text: &str, triggers: &[String]) -> bool {
    triggers.iter().any(|t| {
        let t = t.to_lowercase();
        !t.is_empty() && text.contains(&t)
    })
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// One labelled category and its triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCategory {
    pub label: String,
    pub triggers: Vec<String>,
}

impl IndicatorCategory {
    pub fn new(label: impl Into<String>, triggers: &[&str]) -> Self {
        Self {
            label: label.into(),
            triggers: words(triggers),
        }
    }
}

/// Ordered label → triggers table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorTable {
    categories: Vec<IndicatorCategory>,
}

impl IndicatorTable {
    pub fn new(categories: Vec<IndicatorCategory>) -> Self {
        Self { categories }
    }

    /// Build from `(label, triggers)` pairs
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(label, triggers)| IndicatorCategory::new(*label, triggers))
                .collect(),
        )
    }

    pub fn categories(&self) -> &[IndicatorCategory] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Raw trigger counts per category, in table order.
    ///
    /// `text` must already be lower-cased.
    pub fn score(&self, text: &str) -> ScoreMap {
        ScoreMap(
            self.categories
                .iter()
                .map(|c| (c.label.clone(), count_triggers(text, &c.triggers)))
                .collect(),
        )
    }
}

/// Category → raw count, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreMap(Vec<(String, usize)>);

impl ScoreMap {
    pub fn get(&self, label: &str) -> usize {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn max(&self) -> usize {
        self.0.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }

    /// Label with the highest nonzero count; ties go to the earlier category
    pub fn leader(&self) -> Option<&str> {
        let max = self.max();
        if max == 0 {
            return None;
        }
        self.0
            .iter()
            .find(|(_, c)| *c == max)
            .map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

/// A category that contributes a canned statement when any trigger occurs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceRule {
    pub label: String,
    pub triggers: Vec<String>,
    pub statement: String,
}

impl PresenceRule {
    pub fn new(label: &str, triggers: &[&str], statement: &str) -> Self {
        Self {
            label: label.to_string(),
            triggers: words(triggers),
            statement: statement.to_string(),
        }
    }
}

/// Triggers for both sides of the four personality dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityIndicators {
    pub extrovert: Vec<String>,
    pub introvert: Vec<String>,
    pub thinking: Vec<String>,
    pub feeling: Vec<String>,
    pub judging: Vec<String>,
    pub perceiving: Vec<String>,
    pub sensing: Vec<String>,
    pub intuition: Vec<String>,
}

impl Default for PersonalityIndicators {
    fn default() -> Self {
        Self {
            extrovert: words(&[
                "party", "friends", "social", "crowd", "hang out", "together", "concert",
                "event", "meetup", "team",
            ]),
            introvert: words(&[
                "alone", "quiet", "introvert", "by myself", "stay in", "recharge", "solitude",
                "reading", "at home",
            ]),
            thinking: words(&[
                "think", "logic", "analy", "data", "reason", "evidence", "objective", "fact",
                "efficient", "technical",
            ]),
            feeling: words(&[
                "feel", "love", "heart", "emotion", "care", "empathy", "hurt", "happy", "sad",
            ]),
            judging: words(&[
                "plan", "schedule", "organized", "deadline", "routine", "checklist", "decide",
                "prepare",
            ]),
            perceiving: words(&[
                "spontaneous", "flexible", "whatever", "random", "improvise", "go with the flow",
                "last minute", "explore",
            ]),
            sensing: words(&[
                "practical", "detail", "hands-on", "step by step", "concrete", "specific",
                "actual", "experience",
            ]),
            intuition: words(&[
                "idea", "imagine", "future", "theory", "possibilit", "concept", "abstract",
                "vision", "meaning", "pattern",
            ]),
        }
    }
}

/// Positive and negative sentiment words, matched per token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            positive: words(&[
                "love", "great", "happy", "good", "awesome", "enjoy", "excellent", "amazing",
                "fantastic", "wonderful",
            ]),
            negative: words(&[
                "hate", "bad", "sad", "terrible", "worse", "worst", "awful", "horrible",
                "disappointing", "angry",
            ]),
        }
    }
}

/// Every indicator family used by the heuristic assembler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indicators {
    pub frustrations: Vec<String>,
    pub personality: PersonalityIndicators,
    pub sentiment: SentimentLexicon,
    pub motivations: IndicatorTable,
    pub age: IndicatorTable,
    pub location: IndicatorTable,
    pub occupation: IndicatorTable,
    pub status: IndicatorTable,
    pub behaviors: Vec<PresenceRule>,
    pub goals: Vec<PresenceRule>,
}

impl Default for Indicators {
    fn default() -> Self {
        Self {
            frustrations: default_frustration_triggers(),
            personality: PersonalityIndicators::default(),
            sentiment: SentimentLexicon::default(),
            motivations: default_motivations(),
            age: default_age_ranges(),
            location: default_locations(),
            occupation: default_occupations(),
            status: default_statuses(),
            behaviors: default_behaviors(),
            goals: default_goals(),
        }
    }
}

pub fn default_frustration_triggers() -> Vec<String> {
    words(&[
        "frustrat", "annoy", "disappoint", "terrible", "hate", "problem", "issue", "broken",
        "waste", "difficult", "struggle", "can't stand", "tired of", "worst",
    ])
}

pub fn default_motivations() -> IndicatorTable {
    IndicatorTable::from_pairs(&[
        (
            "convenience",
            &["easy", "simple", "convenient", "hassle", "delivery", "one click", "automat"],
        ),
        (
            "wellness",
            &["health", "workout", "gym", "exercise", "sleep", "meditat", "mental", "therapy"],
        ),
        ("speed", &["fast", "quick", "speed", "instant", "asap", "hurry", "rush"]),
        (
            "preferences",
            &["prefer", "favorite", "favourite", "rather", "taste", "recommend", "choose"],
        ),
        ("comfort", &["comfort", "cozy", "relax", "chill", "familiar", "calm", "escapism"]),
        (
            "dietary_needs",
            &["vegan", "vegetarian", "gluten", "keto", "diet", "allerg", "protein", "calorie"],
        ),
    ])
}

pub fn default_age_ranges() -> IndicatorTable {
    IndicatorTable::from_pairs(&[
        ("13-17", &["high school", "homework", "my parents won't", "prom", "junior year"]),
        (
            "18-24",
            &["college", "university", "dorm", "freshman", "sophomore", "undergrad", "campus"],
        ),
        ("25-34", &["my career", "coworker", "my apartment", "grad school", "wedding", "engaged"]),
        ("35-44", &["my kids", "my son", "my daughter", "mortgage", "toddler"]),
        ("45-54", &["my teenager", "college fund", "midlife"]),
        ("55+", &["retire", "grandkid", "grandchild", "pension"]),
    ])
}

pub fn default_locations() -> IndicatorTable {
    IndicatorTable::from_pairs(&[
        ("North America", &["usa", "america", "canada", "walmart", "thanksgiving", "dollars"]),
        ("Europe", &["europe", "the uk", "london", "germany", "france", "euro", "nhs"]),
        ("Asia", &["india", "japan", "china", "korea", "singapore", "tokyo", "rupee"]),
        ("Oceania", &["australia", "new zealand", "aussie", "sydney", "melbourne"]),
        ("Latin America", &["brazil", "mexico", "argentina", "chile", "colombia"]),
        ("Africa", &["nigeria", "kenya", "south africa", "ghana", "egypt"]),
    ])
}

pub fn default_occupations() -> IndicatorTable {
    IndicatorTable::from_pairs(&[
        (
            "Software Engineer",
            &["programming", "developer", "software", "debug", "deploy", "codebase"],
        ),
        ("Student", &["exam", "professor", "semester", "homework", "lecture", "my class"]),
        ("Healthcare Worker", &["patient", "nurse", "hospital", "clinic", "my shift"]),
        ("Teacher", &["my students", "classroom", "teaching", "lesson plan"]),
        ("Creative Professional", &["design", "drawing", "illustrat", "photography", "my art"]),
        ("Skilled Trades", &["contractor", "electrician", "plumbing", "construction", "welding"]),
    ])
}

pub fn default_statuses() -> IndicatorTable {
    IndicatorTable::from_pairs(&[
        ("Married", &["my wife", "my husband", "married"]),
        ("In a Relationship", &["girlfriend", "boyfriend", "my partner"]),
        ("Parent", &["my kids", "my son", "my daughter", "parenting"]),
        ("Student", &["college", "university", "semester", "my class"]),
        ("Working Professional", &["my job", "at work", "my boss", "coworker", "the office"]),
        ("Single", &["single", "dating app"]),
    ])
}

pub fn default_behaviors() -> Vec<PresenceRule> {
    vec![
        PresenceRule::new(
            "gaming",
            &["game", "gaming", "rpg", "console", "steam", "playstation", "xbox", "nintendo"],
            "Spends leisure time playing video games",
        ),
        PresenceRule::new(
            "reading",
            &["book", "novel", "author", "reading", "library"],
            "Reads regularly and discusses books",
        ),
        PresenceRule::new(
            "technology",
            &["code", "programming", "software", "python", "linux", "computer"],
            "Engages with technology and programming topics",
        ),
        PresenceRule::new(
            "fitness",
            &["gym", "workout", "running", "exercise", "lifting"],
            "Maintains an active fitness routine",
        ),
        PresenceRule::new(
            "screen_media",
            &["movie", "film", "netflix", "series", "documentar"],
            "Watches and reviews movies and shows",
        ),
        PresenceRule::new(
            "advice",
            &["recommend", "advice", "suggest", "tip"],
            "Shares advice and recommendations with the community",
        ),
        PresenceRule::new(
            "cooking",
            &["cook", "recipe", "bake", "kitchen", "meal"],
            "Cooks at home and trades recipes",
        ),
        PresenceRule::new(
            "travel",
            &["travel", "trip", "flight", "vacation", "hotel"],
            "Travels and shares trip experiences",
        ),
    ]
}

pub fn default_goals() -> Vec<PresenceRule> {
    vec![
        PresenceRule::new(
            "learning",
            &["learn", "study", "course", "understand", "improve", "interested in"],
            "Wants to keep learning and improving their skills",
        ),
        PresenceRule::new(
            "career",
            &["career", "promotion", "interview", "salary", "resume"],
            "Seeks career growth and better job opportunities",
        ),
        PresenceRule::new(
            "health",
            &["healthy", "lose weight", "get fit", "sleep better", "diet"],
            "Aims to build healthier habits",
        ),
        PresenceRule::new(
            "finance",
            &["save money", "budget", "invest", "debt", "afford"],
            "Wants financial stability and smarter spending",
        ),
        PresenceRule::new(
            "connection",
            &["friend", "community", "meet people", "relationship", "dating"],
            "Looks for connection with like-minded people",
        ),
        PresenceRule::new(
            "discovery",
            &["looking for", "recommendation", "suggestion", "any tips", "discover"],
            "Actively looking for new recommendations",
        ),
        PresenceRule::new(
            "relaxation",
            &["relax", "escape", "unwind", "de-stress"],
            "Needs ways to relax and escape daily stress",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_occurrences_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 3);
        assert_eq!(count_occurrences("banana", "ana"), 2);
        assert_eq!(count_occurrences("hello", "xyz"), 0);
        assert_eq!(count_occurrences("hello", ""), 0);
    }

    #[test]
    fn test_count_occurrences_not_word_bounded() {
        assert_eq!(count_occurrences("sunday brunch run", "run"), 2);
    }

    #[test]
    fn test_count_occurrences_multibyte() {
        assert_eq!(count_occurrences("café café", "é"), 2);
        assert_eq!(count_occurrences("ééé", "éé"), 2);
    }

    #[test]
    fn test_table_score_and_leader() {
        let table = IndicatorTable::from_pairs(&[
            ("a", &["x"]),
            ("b", &["y", "z"]),
            ("c", &["y"]),
        ]);
        let scores = table.score("x y z y");
        assert_eq!(scores.get("a"), 1);
        assert_eq!(scores.get("b"), 3);
        assert_eq!(scores.get("c"), 2);
        assert_eq!(scores.get("missing"), 0);
        assert_eq!(scores.leader(), Some("b"));
    }

    #[test]
    fn test_leader_ties_go_to_table_order() {
        let table = IndicatorTable::from_pairs(&[("first", &["x"]), ("second", &["y"])]);
        assert_eq!(table.score("y x").leader(), Some("first"));
        assert_eq!(table.score("nothing").leader(), None);
    }

    #[test]
    fn test_triggers_are_case_folded() {
        let triggers = vec!["Python".to_string()];
        assert_eq!(count_triggers("python and python", &triggers), 2);
        assert!(any_trigger("i write python", &triggers));
        assert!(!any_trigger("i write rust", &triggers));
    }

    #[test]
    fn test_default_indicators_are_populated() {
        let indicators = Indicators::default();
        assert_eq!(indicators.motivations.categories().len(), 6);
        assert!(!indicators.behaviors.is_empty());
        assert!(!indicators.goals.is_empty());
        assert!(indicators.sentiment.positive.contains(&"love".to_string()));
        assert!(indicators.sentiment.negative.contains(&"hate".to_string()));
    }

    #[test]
    fn test_partial_override_from_toml() {
        let toml_str = r#"
            frustrations = ["lag"]

            [[motivations]]
            label = "speed"
            triggers = ["fast"]
        "#;
        let indicators: Indicators = toml::from_str(toml_str).unwrap();
        assert_eq!(indicators.frustrations, vec!["lag".to_string()]);
        assert_eq!(indicators.motivations.categories().len(), 1);
        // untouched families keep their defaults
        assert_eq!(indicators.goals, default_goals());
    }
}
