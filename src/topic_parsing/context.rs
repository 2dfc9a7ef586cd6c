//! Context classification for mention windows
//!
//! Looks at the text immediately around a mention for affiliation or
//! location phrases such as `@ Healix NY`, `at Acme` or `in New York`.
//!
//! Two independent results come out of a window:
//! - `context`: first hit of token-anchored `@`/`at`, name-anchored
//!   `@`/`at`, then `in <Capitalized Words>`
//! - `location`: first capture of `@`/`at <Capitalized Words> [XX]`,
//!   `in <Capitalized Words>`, `<Capitalized Words> office`

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Capitalized word sequence, e.g. `New York`
const CAPITALIZED_WORDS: &str = r"[A-Z][a-zA-Z]*(?:[ \t]+[A-Z][a-zA-Z]*)*";

/// `@` or a standalone `at`, then a run up to the next sentence terminator
const AFFILIATION_TAIL: &str = r"\s*(?:@|\b(?i:at)\b)\s*([^.,;!?\n]+)";

static IN_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\bin[ \t]+({})", CAPITALIZED_WORDS)).unwrap()
});

static AT_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:@|\b(?i:at)\b)[ \t]*({}(?:,?[ \t]+[A-Z]{{2}}\b)?)",
        CAPITALIZED_WORDS
    ))
    .unwrap()
});

static OFFICE_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({})[ \t]+(?i:office)\b", CAPITALIZED_WORDS)).unwrap()
});

/// What the classifier found around one mention
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionContext {
    pub context: Option<String>,
    pub location: Option<String>,
}

/// Classify the window around a mention.
///
/// `token` is the literal `@[name](type:id)` text and `name` its display
/// name. Both are escaped before being embedded in a pattern.
pub fn classify_window(window: &str, token: &str, name: &str) -> MentionContext {
    MentionContext {
        context: find_context(window, token, name),
        location: find_location(window),
    }
}

fn find_context(window: &str, token: &str, name: &str) -> Option<String> {
    if let Some(phrase) = affiliation_after(window, token) {
        return Some(format!("@ {}", phrase));
    }

    if let Some(phrase) = affiliation_after(window, name) {
        return Some(format!("@ {}", phrase));
    }

    first_capture(&IN_PHRASE_RE, window).map(|words| format!("in {}", words))
}

/// Text following `anchor` + `@`/`at`, trimmed, up to a terminator
fn affiliation_after(window: &str, anchor: &str) -> Option<String> {
    if anchor.is_empty() {
        return None;
    }

    let pattern = format!("{}{}", regex::escape(anchor), AFFILIATION_TAIL);
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!(anchor = %anchor, error = %e, "Skipping affiliation pattern");
            return None;
        }
    };

    first_capture(&re, window)
}

fn find_location(window: &str) -> Option<String> {
    [&*AT_LOCATION_RE, &*IN_PHRASE_RE, &*OFFICE_LOCATION_RE]
        .into_iter()
        .find_map(|re| first_capture(re, window))
}

/// First capture group of the first match, trimmed; empty captures count as no match
fn first_capture(re: &Regex, haystack: &str) -> Option<String> {
    let captured = re.captures(haystack)?.get(1)?.as_str().trim();
    if captured.is_empty() {
        None
    } else {
        Some(captured.to_string())
    }
}
