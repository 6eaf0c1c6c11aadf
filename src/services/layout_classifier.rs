//! Button-layout classification.
//!
//! Maps a desktop button-layout descriptor such as
//! `close,maximize,minimize:` to the [`LayoutLetter`] used in theme names.
//! Rules are tried in a fixed order: exact matches, then `:` prefix, then
//! `:` suffix, then the `close:` and `close` substrings. The first rule that
//! fires wins; anything else is a right-hand layout.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::LayoutLetter;

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn repeated_comma_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",,+").expect("comma pattern is valid"))
}

/// Strips whitespace and collapses repeated commas.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let compact = whitespace_regex().replace_all(raw.trim(), "");
    repeated_comma_regex().replace_all(&compact, ",").into_owned()
}

/// Classifies a raw button-layout descriptor. Total over all inputs.
#[must_use]
pub fn classify(raw: &str) -> LayoutLetter {
    let layout = normalize(raw);

    match layout.as_str() {
        "close,maximize,minimize:" => return LayoutLetter::L,
        ":minimize,maximize,close" => return LayoutLetter::R,
        "close:" | ":close" => return LayoutLetter::G,
        "close:minimize,maximize" => return LayoutLetter::M,
        _ => {}
    }

    if layout.starts_with(':') {
        LayoutLetter::R
    } else if layout.ends_with(':') {
        LayoutLetter::L
    } else if layout.contains("close:") {
        LayoutLetter::M
    } else if layout.contains("close") {
        LayoutLetter::G
    } else {
        LayoutLetter::R
    }
}

/// Classifies an optional descriptor; an absent layout is right-handed.
#[must_use]
pub fn classify_opt(raw: Option<&str>) -> LayoutLetter {
    raw.map_or(LayoutLetter::R, classify)
}
