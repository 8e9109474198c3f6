//! Line rewrites that prepare prose for the inline-only parser.
//!
//! The inline parser has no notion of block structure, so ATX headers become
//! bold lines and `* ` bullets become `• ` before they could be read as
//! emphasis openers.

use regex::Regex;
use std::sync::OnceLock;

/// The character that replaces a leading `*` bullet marker.
pub const BULLET: char = '•';

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"^#{1,6}\s+(.*)$").expect("Invalid header regex"))
}

fn bullet_regex() -> &'static Regex {
    static BULLET_MARKER: OnceLock<Regex> = OnceLock::new();
    BULLET_MARKER.get_or_init(|| Regex::new(r"^(\s*)\* ").expect("Invalid bullet regex"))
}

/// Rewrites one line. Header lines never go through the bullet rule.
fn preprocess_line(line: &str) -> String {
    if let Some(caps) = header_regex().captures(line) {
        let title = caps.get(1).map_or("", |m| m.as_str()).trim_end();
        if title.is_empty() {
            return String::new();
        }
        return format!("**{title}**");
    }

    bullet_regex()
        .replace(line, |caps: &regex::Captures<'_>| {
            format!("{}{BULLET} ", &caps[1])
        })
        .into_owned()
}

/// Demotes headers to bold and normalises `* ` bullets, line by line.
///
/// Only ever applied to text segments, never to code block bodies.
pub fn preprocess(text: &str) -> String {
    text.split('\n')
        .map(preprocess_line)
        .collect::<Vec<_>>()
        .join("\n")
}
