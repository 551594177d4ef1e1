//! Persona prompt

use crate::corpus::Corpus;
use std::fmt::Write as _;

const PERSONA_SCHEMA: &str = r#"{
  "name": "string",                  // the Reddit username, capitalized
  "age": "string",                   // estimated age range, e.g. "20-25", or "Unknown"
  "occupation": "string",            // e.g. "Software Engineer", "Student", or "Unknown"
  "status": "string",                // e.g. "Single", "Married", "Working Professional", or "Unknown"
  "location": "string",              // general region, e.g. "North America", or "Unknown"
  "tier": "string",                  // "Casual User", "Active Contributor" or "Power User"
  "archetype": "string",             // e.g. "The Explorer", "The Analyst", "The Helper", "The Creator"
  "personality": {
    "extrovert_introvert": "string", // "extrovert" or "introvert"
    "thinking_feeling": "string",    // "thinking" or "feeling"
    "judging_perceiving": "string",  // "judging" or "perceiving"
    "sensing_intuition": "string"    // "sensing" or "intuition"
  },
  "motivations": {
    "convenience": 0,                // integer 0-100
    "wellness": 0,
    "speed": 0,
    "preferences": 0,
    "comfort": 0,
    "dietary_needs": 0
  },
  "behaviors_habits": ["string"],
  "goals_needs": ["string"],
  "frustrations": ["string"],
  "common_topics": ["string"],       // 5-10 topics
  "sentiment": "string",             // "Positive", "Negative" or "Neutral"
  "quote": "string"                  // a representative quote from their content
}"#;

/// Build the generation prompt for one account
pub fn build_persona_prompt(username: &str, corpus: &Corpus) -> String {
    let mut prompt = String::from(
        "Analyze the following Reddit user's comments and posts to generate a detailed user persona.\n\
         Respond with a single JSON object and nothing else, using this structure:\n\n",
    );
    prompt.push_str(PERSONA_SCHEMA);
    prompt.push_str("\n\n");

    let _ = writeln!(prompt, "Reddit Username: {}\n", username);

    prompt.push_str("User's Comments:\n");
    if corpus.comments.is_empty() {
        prompt.push_str("(none)\n");
    }
    for comment in &corpus.comments {
        let _ = writeln!(prompt, "- {}", comment.body);
    }

    prompt.push_str("\nUser's Posts:\n");
    if corpus.posts.is_empty() {
        prompt.push_str("(none)\n");
    }
    for post in &corpus.posts {
        let _ = writeln!(prompt, "- {}", post.text());
    }

    let _ = write!(prompt, "\nCombined Text for Analysis:\n{}\n", corpus.combined_text());
    prompt
}
