//! Autocomplete support for writing mentions
//!
//! Pure text helpers for the editor side: detect the `@query` being typed
//! at the cursor and splice a chosen suggestion in as a mention token.
//! Cursor offsets are in characters.

use serde::{Deserialize, Serialize};

use super::mention::MentionType;

/// An entity offered by the autocomplete lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionSuggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub mention_type: MentionType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl MentionSuggestion {
    pub fn new(mention_type: MentionType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mention_type,
            name: name.into(),
            subtitle: None,
        }
    }

    /// Token text for this suggestion.
    ///
    /// Characters that would terminate a token part early are dropped so the
    /// inserted token always extracts back to the same entity.
    pub fn token(&self) -> String {
        let name: String = self.name.chars().filter(|&c| c != ']').collect();
        let kind: String = self.mention_type.as_str().chars().filter(|&c| c != ':').collect();
        let id: String = self.id.chars().filter(|&c| c != ')').collect();
        format!("@[{}]({}:{})", name.trim(), kind, id)
    }
}

/// The in-progress `@query` before the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionQuery {
    /// Char offset of the `@`
    pub start: usize,
    /// Text typed after the `@`
    pub query: String,
}

/// Result of inserting a mention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionInsertion {
    pub text: String,
    /// New cursor position, just past the inserted token and its space
    pub cursor: usize,
}

/// Find the `@query` the user is typing at `cursor`, if any.
///
/// The `@` must start the text or follow whitespace, and the query may not
/// span lines, open a token (`@[`), start with whitespace, or exceed
/// `max_query_len` characters.
pub fn active_mention_query(
    text: &str,
    cursor: usize,
    max_query_len: usize,
) -> Option<MentionQuery> {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let before = &chars[..cursor];

    let at = before.iter().rposition(|&c| c == '@')?;
    if at > 0 && !before[at - 1].is_whitespace() {
        return None;
    }

    let query = &before[at + 1..];
    if query.len() > max_query_len
        || query.contains(&'\n')
        || query.first().is_some_and(|&c| c == '[' || c.is_whitespace())
    {
        return None;
    }

    Some(MentionQuery {
        start: at,
        query: query.iter().collect(),
    })
}

/// Insert `suggestion` at `cursor`, replacing an active `@query` if present
pub fn insert_mention(
    text: &str,
    cursor: usize,
    suggestion: &MentionSuggestion,
    max_query_len: usize,
) -> MentionInsertion {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let start = active_mention_query(text, cursor, max_query_len)
        .map(|q| q.start)
        .unwrap_or(cursor);

    let token = suggestion.token();
    let mut out: String = chars[..start].iter().collect();
    out.push_str(&token);

    let rest = &chars[cursor..];
    if !rest.first().is_some_and(|c| c.is_whitespace()) {
        out.push(' ');
    }
    let new_cursor = start + token.chars().count() + 1;
    out.extend(rest);

    MentionInsertion {
        text: out,
        cursor: new_cursor,
    }
}
