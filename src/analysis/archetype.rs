//! Archetype and activity tier
//!
//! The archetype is a label chosen from a fixed list. It is never drawn
//! from an unseeded generator: either it follows from the personality, or
//! a caller-provided seed makes the pick reproducible.

use crate::persona::{Decisions, Energy, Personality, UNKNOWN};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Archetypes in selection order
pub const ARCHETYPES: &[&str] = &["The Explorer", "The Analyst", "The Helper", "The Creator"];

/// How the heuristic path picks an archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ArchetypeStrategy {
    /// Derived from the energy and decision dimensions
    #[default]
    Derived,
    /// Uniform pick from a generator seeded with `seed`
    Seeded { seed: u64 },
}

impl ArchetypeStrategy {
    /// Choose an archetype. Without any source items there is nothing to
    /// characterize and the result is "Unknown".
    pub fn choose(&self, personality: &Personality, has_evidence: bool) -> String {
        if !has_evidence {
            return UNKNOWN.to_string();
        }
        match self {
            ArchetypeStrategy::Derived => derive(personality).to_string(),
            ArchetypeStrategy::Seeded { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                ARCHETYPES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(UNKNOWN)
                    .to_string()
            }
        }
    }
}

fn derive(personality: &Personality) -> &'static str {
    match (personality.extrovert_introvert, personality.thinking_feeling) {
        (Energy::Extrovert, Decisions::Thinking) => ARCHETYPES[0],
        (Energy::Introvert, Decisions::Thinking) => ARCHETYPES[1],
        (Energy::Extrovert, Decisions::Feeling) => ARCHETYPES[2],
        (Energy::Introvert, Decisions::Feeling) => ARCHETYPES[3],
    }
}

/// Activity tier from the number of analyzed items
pub fn activity_tier(items: usize) -> String {
    match items {
        0 => UNKNOWN,
        1..=19 => "Casual User",
        20..=99 => "Active Contributor",
        _ => "Power User",
    }
    .to_string()
}
