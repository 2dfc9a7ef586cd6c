//! Topic names, descriptions and post auto-titles

use regex::Regex;
use std::sync::LazyLock;

use super::grouping::ParsedContent;
use super::mention::Mention;

static LEADING_AT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@\s*").unwrap());

/// Clauses that end the useful part of a context phrase
const CONTEXT_STOP_WORDS: &[&str] = &[" who ", " that ", " which ", " with ", " and ", " for "];

/// A stop word this close to the start is left alone
const MIN_CONTEXT_CUT: usize = 10;

/// Natural break points for long titles, in priority order
const TITLE_BREAKS: &[&str] = &[" + ", " who ", " that ", " with ", " and ", " for ", " at "];

const ELLIPSIS: &str = "...";

/// Normalize a raw context key for display in a topic name.
///
/// `@Chicago` becomes `@ Chicago`, trailing clauses after a stop word are
/// dropped, and bare locations get an `@ ` prefix.
pub fn clean_context(raw: &str) -> String {
    let mut cleaned = if raw.starts_with('@') {
        LEADING_AT_RE.replace(raw, "@ ").into_owned()
    } else {
        raw.to_string()
    };

    let cut = CONTEXT_STOP_WORDS
        .iter()
        .filter_map(|word| cleaned.find(word))
        .filter(|&idx| cleaned[..idx].chars().count() > MIN_CONTEXT_CUT)
        .min();
    if let Some(idx) = cut {
        cleaned.truncate(idx);
    }

    let cleaned = cleaned.trim();
    if cleaned.starts_with('@') || cleaned.starts_with("in ") {
        cleaned.to_string()
    } else {
        format!("@ {}", cleaned)
    }
}

/// Human-readable topic name from a group's companies and contacts
pub fn topic_name(companies: &[Mention], contacts: &[Mention], context: &str) -> String {
    let cleaned = clean_context(context);

    if let Some(company) = companies.first() {
        let base = format!("{} {}", company.name, cleaned);
        if companies.len() > 1 {
            format!("{} + {} more", base, companies.len() - 1)
        } else if !contacts.is_empty() {
            format!(
                "{} + {} {}",
                base,
                contacts.len(),
                plural(contacts.len(), "contact", "contacts")
            )
        } else {
            base
        }
    } else if let Some(contact) = contacts.first() {
        if contacts.len() == 1 {
            format!("{} {}", contact.name, cleaned)
        } else {
            format!("{} + {} more contacts", contact.name, contacts.len() - 1)
        }
    } else {
        cleaned
    }
}

/// One-line summary, e.g. `2 companies and 1 contact related to @ NY`
pub fn topic_description(company_count: usize, contact_count: usize, context: &str) -> String {
    let mut parts = Vec::with_capacity(2);
    if company_count > 0 {
        parts.push(format!(
            "{} {}",
            company_count,
            plural(company_count, "company", "companies")
        ));
    }
    if contact_count > 0 {
        parts.push(format!(
            "{} {}",
            contact_count,
            plural(contact_count, "contact", "contacts")
        ));
    }

    if parts.is_empty() {
        format!("Mentions related to {}", context)
    } else {
        format!("{} related to {}", parts.join(" and "), context)
    }
}

/// Untruncated title for parsed content, falling back to the trimmed text
pub fn compose_title(parsed: &ParsedContent, text: &str) -> String {
    let standalone_contacts = parsed.standalone_contacts.len();

    if let Some(first) = parsed.topics.first() {
        let additional =
            parsed.topics.len() - 1 + parsed.standalone_companies.len() + standalone_contacts;
        with_more(&first.name, additional)
    } else if let Some(first) = parsed.standalone_companies.first() {
        let additional = parsed.standalone_companies.len() - 1 + standalone_contacts;
        with_more(&first.name, additional)
    } else {
        text.trim().to_string()
    }
}

/// Shorten `title` to at most `max_length` characters.
///
/// Prefers cutting at a natural break (`" + "`, `" who "`, ...), then at the
/// last space past `min_break_ratio` of the budget, then mid-word.
pub fn truncate_title(title: &str, max_length: usize, min_break_ratio: f64) -> String {
    if title.chars().count() <= max_length {
        return title.to_string();
    }
    if max_length <= ELLIPSIS.len() {
        return take_chars(title, max_length).to_string();
    }

    let budget = max_length - ELLIPSIS.len();

    for brk in TITLE_BREAKS {
        if let Some(idx) = title.find(brk) {
            let offset = title[..idx].chars().count();
            if offset > 0 && offset < budget {
                return format!("{}{}", &title[..idx], ELLIPSIS);
            }
        }
    }

    let mut cut = take_chars(title, budget);
    if let Some(space) = cut.rfind(' ') {
        if cut[..space].chars().count() as f64 >= budget as f64 * min_break_ratio {
            cut = &cut[..space];
        }
    }
    format!("{}{}", cut, ELLIPSIS)
}

fn with_more(base: &str, additional: usize) -> String {
    if additional > 0 {
        format!("{} + {} more", base, additional)
    } else {
        base.to_string()
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Prefix of `s` holding at most `n` chars
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
