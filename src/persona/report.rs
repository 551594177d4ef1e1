//! Persona reports
//!
//! A plain-text report in fixed sections, a JSON export of the persona, and
//! a short console summary. Files are named
//! `persona_{username}_{YYYYmmdd_HHMMSS}.{txt|json}`.

use super::types::Persona;
use crate::analysis::scorers::truncate_chars;
use crate::corpus::SourceKind;
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 80;
const SECTION_WIDTH: usize = 40;
const REPORT_CITATION_CHARS: usize = 150;

/// Output format of a saved report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// `extrovert_introvert` → `Extrovert Introvert`
fn title_case(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn section(out: &mut String, heading: &str) {
    out.push_str(heading);
    out.push('\n');
    out.push_str(&"-".repeat(SECTION_WIDTH));
    out.push('\n');
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "• {}", item);
    }
    out.push('\n');
}

/// Render the full text report
pub fn render_text_report(persona: &Persona, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{}\nREDDIT USER PERSONA REPORT\n{}\n", rule, rule);
    let _ = writeln!(out, "USERNAME: {}", persona.name);
    let _ = writeln!(
        out,
        "GENERATED ON: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    section(&mut out, "BASIC INFORMATION");
    let _ = writeln!(out, "Age: {}", persona.age);
    let _ = writeln!(out, "Occupation: {}", persona.occupation);
    let _ = writeln!(out, "Status: {}", persona.status);
    let _ = writeln!(out, "Location: {}", persona.location);
    let _ = writeln!(out, "Tier: {}", persona.tier);
    let _ = writeln!(out, "Archetype: {}", persona.archetype);
    let _ = writeln!(out, "Sentiment: {}\n", persona.sentiment);

    section(&mut out, "PERSONALITY");
    for (dimension, side) in persona.personality.entries() {
        let _ = writeln!(out, "{}: {}", title_case(dimension), title_case(side));
    }
    out.push('\n');

    section(&mut out, "MOTIVATIONS");
    for (motivation, score) in persona.motivations.iter() {
        let _ = writeln!(out, "{}: {}/100", title_case(motivation), score);
    }
    out.push('\n');

    section(&mut out, "BEHAVIOR & HABITS");
    bullets(&mut out, &persona.behaviors_habits);

    section(&mut out, "GOALS & NEEDS");
    bullets(&mut out, &persona.goals_needs);

    section(&mut out, "FRUSTRATIONS");
    bullets(&mut out, &persona.frustrations);

    section(&mut out, "COMMON TOPICS");
    let _ = writeln!(out, "{}\n", persona.common_topics.join(", "));

    section(&mut out, "REPRESENTATIVE QUOTE");
    let _ = writeln!(out, "\"{}\"\n", persona.quote);

    section(&mut out, "CITATIONS & SOURCES");
    for citation in &persona.citations {
        let _ = writeln!(
            out,
            "[{}] ({}) Score: {}",
            citation.id,
            citation.kind.as_str().to_uppercase(),
            citation.score
        );
        let content = truncate_chars(&citation.content, REPORT_CITATION_CHARS);
        let ellipsis = if content.len() < citation.content.len() {
            "..."
        } else {
            ""
        };
        let _ = writeln!(out, "Content: {}{}", content, ellipsis);
        let _ = writeln!(out, "Source: {}\n", citation.permalink);
    }

    out
}

/// Short console summary printed after generation
pub fn render_summary(persona: &Persona) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(out, "{}\nGENERATED PERSONA\n{}", rule, rule);
    let _ = writeln!(out, "Name: {}", persona.name);
    let _ = writeln!(out, "Age: {}", persona.age);
    let _ = writeln!(out, "Occupation: {}", persona.occupation);
    let _ = writeln!(out, "Location: {}", persona.location);
    let _ = writeln!(out, "Archetype: {}", persona.archetype);
    let _ = writeln!(out, "Personality: {}", persona.personality.code());

    let _ = writeln!(out, "\nTop motivations:");
    for (motivation, score) in persona.top_motivations(3) {
        let _ = writeln!(out, "  • {}: {}/100", title_case(motivation), score);
    }

    for (heading, items) in [
        ("Behaviors & habits", &persona.behaviors_habits),
        ("Goals & needs", &persona.goals_needs),
        ("Frustrations", &persona.frustrations),
    ] {
        let _ = writeln!(out, "\n{}:", heading);
        for item in items.iter().take(3) {
            let _ = writeln!(out, "  • {}", item);
        }
    }

    let topics: Vec<&str> = persona.common_topics.iter().take(10).map(String::as_str).collect();
    let _ = writeln!(out, "\nCommon topics: {}", topics.join(", "));
    let _ = writeln!(out, "Sentiment: {}", persona.sentiment);
    let _ = writeln!(
        out,
        "Citations: {} sources ({} comments, {} posts)",
        persona.citations.len(),
        persona.citation_count(SourceKind::Comment),
        persona.citation_count(SourceKind::Post)
    );
    let _ = writeln!(out, "Quote: \"{}\"", persona.quote);

    out
}

/// File name for a report, with the username reduced to safe characters
pub fn report_file_name(username: &str, format: ReportFormat, at: DateTime<Local>) -> String {
    let safe: String = username
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!(
        "persona_{}_{}.{}",
        safe,
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Write a report into `dir`, creating it when missing. Returns the file path.
pub fn write_report(
    persona: &Persona,
    username: &str,
    dir: &Path,
    format: ReportFormat,
    generated_at: DateTime<Local>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Report(format!("Failed to create output directory {}: {}", dir.display(), e))
    })?;

    let content = match format {
        ReportFormat::Text => render_text_report(persona, generated_at),
        ReportFormat::Json => serde_json::to_string_pretty(persona)?,
    };

    let path = dir.join(report_file_name(username, format, generated_at));
    std::fs::write(&path, content)
        .map_err(|e| Error::Report(format!("Failed to write report {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), format = format.extension(), "Persona report saved");
    Ok(path)
}
