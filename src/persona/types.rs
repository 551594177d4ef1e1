//! Persona wire types
//!
//! One `Persona` shape serves both generation paths: the heuristic
//! assembler fills it directly and the LLM path deserializes it from the
//! model's JSON answer. Every field defaults, so a partial answer still
//! parses.

use crate::corpus::SourceKind;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder for identity fields that could not be inferred
pub const UNKNOWN: &str = "Unknown";

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Extrovert / introvert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Energy {
    #[default]
    #[serde(alias = "Extrovert", alias = "E")]
    Extrovert,
    #[serde(alias = "Introvert", alias = "I")]
    Introvert,
}

/// Thinking / feeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decisions {
    #[default]
    #[serde(alias = "Thinking", alias = "T")]
    Thinking,
    #[serde(alias = "Feeling", alias = "F")]
    Feeling,
}

/// Judging / perceiving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifestyle {
    #[default]
    #[serde(alias = "Judging", alias = "J")]
    Judging,
    #[serde(alias = "Perceiving", alias = "P")]
    Perceiving,
}

/// Sensing / intuition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perception {
    #[default]
    #[serde(alias = "Sensing", alias = "S")]
    Sensing,
    #[serde(alias = "Intuition", alias = "N")]
    Intuition,
}

macro_rules! trait_label {
    ($ty:ty { $($variant:ident => $label:literal),+ }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

trait_label!(Energy { Extrovert => "extrovert", Introvert => "introvert" });
trait_label!(Decisions { Thinking => "thinking", Feeling => "feeling" });
trait_label!(Lifestyle { Judging => "judging", Perceiving => "perceiving" });
trait_label!(Perception { Sensing => "sensing", Intuition => "intuition" });

/// MBTI-style personality, one side per dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub extrovert_introvert: Energy,
    pub thinking_feeling: Decisions,
    pub judging_perceiving: Lifestyle,
    pub sensing_intuition: Perception,
}

impl Personality {
    /// `(dimension key, chosen side)` pairs in display order
    pub fn entries(&self) -> [(&'static str, &'static str); 4] {
        [
            ("extrovert_introvert", self.extrovert_introvert.as_str()),
            ("thinking_feeling", self.thinking_feeling.as_str()),
            ("judging_perceiving", self.judging_perceiving.as_str()),
            ("sensing_intuition", self.sensing_intuition.as_str()),
        ]
    }

    /// Four-letter type code, e.g. `ISTJ`
    pub fn code(&self) -> String {
        let e = match self.extrovert_introvert {
            Energy::Extrovert => 'E',
            Energy::Introvert => 'I',
        };
        let s = match self.sensing_intuition {
            Perception::Sensing => 'S',
            Perception::Intuition => 'N',
        };
        let t = match self.thinking_feeling {
            Decisions::Thinking => 'T',
            Decisions::Feeling => 'F',
        };
        let j = match self.judging_perceiving {
            Lifestyle::Judging => 'J',
            Lifestyle::Perceiving => 'P',
        };
        [e, s, t, j].iter().collect()
    }
}

/// Overall sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(alias = "positive")]
    Positive,
    #[serde(alias = "negative")]
    Negative,
    #[default]
    #[serde(alias = "neutral", alias = "Mixed", alias = "mixed")]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A traceable excerpt backing the persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Sequence number, unique within one persona
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub content: String,
    pub permalink: String,
    #[serde(default)]
    pub score: i64,
}

/// Motivation label → strength 0..=100, kept in insertion order.
///
/// Serializes as a JSON object; reports list the labels in the order the
/// indicator table (or the model) produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Motivations(Vec<(String, u8)>);

impl Motivations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score of a label; an existing label keeps its position
    pub fn insert(&mut self, label: impl Into<String>, score: u8) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = score,
            None => self.0.push((label, score)),
        }
    }

    pub fn get(&self, label: &str) -> Option<u8> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(l, s)| (l.as_str(), *s))
    }

    pub fn values(&self) -> impl Iterator<Item = &u8> {
        self.0.iter().map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Index<&str> for Motivations {
    type Output = u8;

    fn index(&self, label: &str) -> &u8 {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, s)| s)
            .unwrap_or_else(|| panic!("no motivation named {}", label))
    }
}

impl FromIterator<(String, u8)> for Motivations {
    fn from_iter<I: IntoIterator<Item = (String, u8)>>(iter: I) -> Self {
        let mut motivations = Self::new();
        for (label, score) in iter {
            motivations.insert(label, score);
        }
        motivations
    }
}

impl Serialize for Motivations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, score) in &self.0 {
            map.serialize_entry(label, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Motivations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MotivationsVisitor;

        impl<'de> Visitor<'de> for MotivationsVisitor {
            type Value = Motivations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of motivation label to score")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Motivations, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut motivations = Motivations::new();
                while let Some((label, score)) = map.next_entry::<String, u8>()? {
                    motivations.insert(label, score);
                }
                Ok(motivations)
            }
        }

        deserializer.deserialize_map(MotivationsVisitor)
    }
}

/// Inferred profile of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persona {
    pub name: String,
    pub age: String,
    pub occupation: String,
    pub status: String,
    pub location: String,
    pub tier: String,
    pub archetype: String,
    pub personality: Personality,
    pub motivations: Motivations,
    pub behaviors_habits: Vec<String>,
    pub goals_needs: Vec<String>,
    pub frustrations: Vec<String>,
    pub common_topics: Vec<String>,
    pub sentiment: Sentiment,
    pub quote: String,
    pub citations: Vec<Citation>,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: unknown(),
            age: unknown(),
            occupation: unknown(),
            status: unknown(),
            location: unknown(),
            tier: unknown(),
            archetype: unknown(),
            personality: Personality::default(),
            motivations: Motivations::new(),
            behaviors_habits: Vec::new(),
            goals_needs: Vec::new(),
            frustrations: Vec::new(),
            common_topics: Vec::new(),
            sentiment: Sentiment::Neutral,
            quote: String::new(),
            citations: Vec::new(),
        }
    }
}

impl Persona {
    /// Motivations sorted strongest first (ties keep insertion order)
    pub fn top_motivations(&self, n: usize) -> Vec<(&str, u8)> {
        let mut ranked: Vec<(&str, u8)> = self.motivations.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Number of citations of one kind
    pub fn citation_count(&self, kind: SourceKind) -> usize {
        self.citations.iter().filter(|c| c.kind == kind).count()
    }
}

/// Capitalize the first character of a username for display
pub fn display_name(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => unknown(),
    }
}
