use std::sync::OnceLock;

use regex::Regex;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        // A quoted span with an optional closing quote, or a bare run.
        Regex::new(r#""([^"]*)"?|([^\s"]+)"#).expect("token regex must compile")
    })
}

/// Splits a line on whitespace, keeping `"quoted spans"` together and
/// stripping their quotes. An unterminated quote swallows the rest of the
/// line.
pub fn smart_split(line: &str) -> Vec<String> {
    token_regex()
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}
