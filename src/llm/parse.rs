//! LLM answer parsing

use crate::error::{Error, Result};
use crate::persona::Persona;
use serde_json::{Map, Value};

/// Strip a markdown code fence around a JSON answer, if present
pub fn extract_json_block(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let content_start = start + "```json".len();
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let content_start = start + 3;
        // skip a language tag on the fence line
        let body_start = text[content_start..]
            .find('\n')
            .map(|i| content_start + i + 1)
            .unwrap_or(content_start);
        if let Some(end) = text[body_start..].find("```") {
            return text[body_start..body_start + end].trim();
        }
    }

    text.trim()
}

/// Identity fields rendered as free text
const TEXT_FIELDS: [&str; 8] = [
    "name",
    "age",
    "occupation",
    "status",
    "location",
    "tier",
    "archetype",
    "quote",
];

/// Statement lists
const LIST_FIELDS: [&str; 4] = ["behaviors_habits", "goals_needs", "frustrations", "common_topics"];

/// Personality keys with the accepted sides, first side being the default
const PERSONALITY_SIDES: [(&str, [&str; 2]); 4] = [
    ("extrovert_introvert", ["extrovert", "introvert"]),
    ("thinking_feeling", ["thinking", "feeling"]),
    ("judging_perceiving", ["judging", "perceiving"]),
    ("sensing_intuition", ["sensing", "intuition"]),
];

/// Parse a persona from the model's answer.
///
/// Only an answer that is not a JSON object fails. Fields of the wrong
/// type are coerced where the meaning is clear and reset to their default
/// otherwise. Any `citations` in the answer are dropped; the caller
/// rebuilds them from the corpus.
pub fn parse_persona(answer: &str) -> Result<Persona> {
    let json = extract_json_block(answer);
    let mut value: Value = serde_json::from_str(json)
        .map_err(|e| Error::LlmResponse(format!("Answer is not valid JSON: {}", e)))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| Error::LlmResponse("Answer is not a JSON object".to_string()))?;
    object.remove("citations");
    normalize_persona(object);

    serde_json::from_value(value)
        .map_err(|e| Error::LlmResponse(format!("Answer does not match the persona shape: {}", e)))
}

/// Coerce a persona object into the shape `Persona` deserializes from
fn normalize_persona(object: &mut Map<String, Value>) {
    for field in TEXT_FIELDS {
        normalize_field(object, field, |v| text_value(v).map(Value::String));
    }
    for field in LIST_FIELDS {
        normalize_field(object, field, list_value);
    }
    normalize_field(object, "motivations", motivations_value);
    normalize_field(object, "personality", personality_value);
    normalize_field(object, "sentiment", sentiment_value);
}

/// Replace `field` with `normalize(value)`, or remove it so the default applies
fn normalize_field(
    object: &mut Map<String, Value>,
    field: &str,
    normalize: impl Fn(&Value) -> Option<Value>,
) {
    let normalized = match object.get(field) {
        Some(value) => normalize(value),
        None => return,
    };
    match normalized {
        Some(value) => {
            object.insert(field.to_string(), value);
        }
        None => {
            object.remove(field);
        }
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn list_value(value: &Value) -> Option<Value> {
    let items: Vec<Value> = match value {
        Value::Array(items) => items.iter().filter_map(text_value).map(Value::String).collect(),
        other => text_value(other).map(Value::String).into_iter().collect(),
    };
    Some(Value::Array(items))
}

/// Scores as integers in 0..=100; non-numeric scores are dropped
fn motivations_value(value: &Value) -> Option<Value> {
    let object = value.as_object()?;
    let scores = object
        .iter()
        .filter_map(|(label, score)| {
            let raw = match score {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
                _ => None,
            }?;
            if !raw.is_finite() {
                return None;
            }
            let clamped = raw.round().clamp(0.0, 100.0) as u8;
            Some((label.clone(), Value::from(clamped)))
        })
        .collect();
    Some(Value::Object(scores))
}

/// Known sides per dimension, or a four-letter type code such as `INTJ`
fn personality_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(object) => {
            let sides = PERSONALITY_SIDES
                .iter()
                .filter_map(|(key, options)| {
                    let side = object.get(*key)?.as_str()?;
                    let side = personality_side(side, options)?;
                    Some((key.to_string(), Value::String(side.to_string())))
                })
                .collect();
            Some(Value::Object(sides))
        }
        Value::String(code) => {
            let letters: Vec<char> = code.trim().to_uppercase().chars().collect();
            if letters.len() != 4 {
                return None;
            }
            let pairs = [('E', 'I'), ('T', 'F'), ('J', 'P'), ('S', 'N')];
            let sides = PERSONALITY_SIDES
                .iter()
                .zip(pairs)
                .filter_map(|((key, options), (first, second))| {
                    let side = if letters.contains(&first) {
                        options[0]
                    } else if letters.contains(&second) {
                        options[1]
                    } else {
                        return None;
                    };
                    Some((key.to_string(), Value::String(side.to_string())))
                })
                .collect();
            Some(Value::Object(sides))
        }
        _ => None,
    }
}

/// Match a side by name or initial, case-insensitively
fn personality_side(side: &str, options: &[&'static str; 2]) -> Option<&'static str> {
    fn initial(option: &str) -> &str {
        match option {
            "intuition" => "n",
            other => &other[..1],
        }
    }

    let side = side.trim().to_lowercase();
    options
        .iter()
        .copied()
        .find(|option| side == *option || side == initial(option))
}

/// `Positive`, `Negative` or `Neutral`; anything else falls back to neutral
fn sentiment_value(value: &Value) -> Option<Value> {
    let label = value.as_str()?.to_lowercase();
    let has_positive = label.contains("positive");
    let has_negative = label.contains("negative");
    let sentiment = match (has_positive, has_negative) {
        (true, false) => "Positive",
        (false, true) => "Negative",
        _ => "Neutral",
    };
    Some(Value::String(sentiment.to_string()))
}
