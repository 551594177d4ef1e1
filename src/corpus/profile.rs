//! Subject resolution from profile URLs

use regex::Regex;
use std::sync::OnceLock;

fn profile_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"reddit\.com/(?:user|u)/([^/?#\s]+)").expect("static pattern compiles")
    })
}

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").expect("static pattern compiles"))
}

/// Extract the username from a Reddit profile URL.
///
/// Accepts `reddit.com/user/<name>` and `reddit.com/u/<name>` with or
/// without scheme, `www.` and trailing slash.
pub fn extract_username(url: &str) -> Option<String> {
    profile_url_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolve CLI input that is either a profile URL or a bare username
/// (optionally prefixed with `u/`).
pub fn resolve_subject(input: &str) -> Option<String> {
    let input = input.trim();
    if input.contains("reddit.com") {
        return extract_username(input);
    }
    let bare = input
        .strip_prefix("/u/")
        .or_else(|| input.strip_prefix("u/"))
        .unwrap_or(input);
    username_pattern()
        .is_match(bare)
        .then(|| bare.to_string())
}

/// Name to show for an offline subject: the resolved username when the
/// input is a profile URL or username, else the trimmed input itself
pub fn display_subject(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(resolve_subject(input).unwrap_or_else(|| input.to_string()))
}
