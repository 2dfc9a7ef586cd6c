//! Mention extraction from forum content
//!
//! Mentions are written inline as `@[Name](type:id)`. The extractor scans
//! text left to right for non-overlapping tokens and classifies the text
//! window around each one (see [`super::context`]).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::trace;

use super::context::classify_window;

/// `@[name](type:id)`; name excludes `]`, type excludes `:`, id excludes `)`
pub(crate) static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\[(?P<name>[^\]]+)\]\((?P<type>[^:]+):(?P<id>[^)]+)\)").unwrap()
});

/// Kind of entity a mention refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MentionType {
    Company,
    Contact,
    Category,
    User,
    /// Any type string outside the known set, kept verbatim
    Other(String),
}

impl MentionType {
    pub fn parse(s: &str) -> Self {
        match s {
            "company" => Self::Company,
            "contact" => Self::Contact,
            "category" => Self::Category,
            "user" => Self::User,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Company => "company",
            Self::Contact => "contact",
            Self::Category => "category",
            Self::User => "user",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for MentionType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<MentionType> for String {
    fn from(t: MentionType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for MentionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected mention in a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    #[serde(rename = "type")]
    pub mention_type: MentionType,
    /// Opaque entity identifier, not validated here
    pub id: String,
    /// Display name from the token
    pub name: String,
    /// Affiliation/location phrase found next to the token, e.g. `@ Healix NY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Location detected independently of `context`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Byte offset of the token start in the source text
    pub start: usize,
    /// Byte offset one past the token end
    pub end: usize,
}

impl Mention {
    /// Render back to the `@[name](type:id)` token form
    pub fn token(&self) -> String {
        format!("@[{}]({}:{})", self.name, self.mention_type, self.id)
    }

    pub fn is_company(&self) -> bool {
        self.mention_type == MentionType::Company
    }

    pub fn is_contact(&self) -> bool {
        self.mention_type == MentionType::Contact
    }

    /// True when either a context phrase or a location was found
    pub fn has_context(&self) -> bool {
        self.context.as_deref().is_some_and(|c| !c.is_empty())
            || self.location.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// Extracts mention tokens and their surrounding context
#[derive(Debug, Clone)]
pub struct MentionExtractor {
    /// Characters captured on each side of a token
    window: usize,
}

impl Default for MentionExtractor {
    fn default() -> Self {
        Self { window: 30 }
    }
}

impl MentionExtractor {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Extract every mention in source order
    pub fn extract(&self, text: &str) -> Vec<Mention> {
        let mut mentions = Vec::new();

        for caps in TOKEN_RE.captures_iter(text) {
            let Some(full) = caps.get(0) else {
                continue;
            };
            let name = &caps["name"];
            let mention_type = MentionType::parse(&caps["type"]);
            let id = &caps["id"];

            let (win_start, win_end) = self.window_bounds(text, full.start(), full.end());
            let found = classify_window(&text[win_start..win_end], full.as_str(), name);

            trace!(
                name = %name,
                mention_type = %mention_type,
                context = ?found.context,
                location = ?found.location,
                "extracted mention"
            );

            mentions.push(Mention {
                mention_type,
                id: id.to_string(),
                name: name.to_string(),
                context: found.context,
                location: found.location,
                start: full.start(),
                end: full.end(),
            });
        }

        mentions
    }

    /// Byte range covering `window` chars before `start` through `window`
    /// chars after `end`, clamped to the text
    fn window_bounds(&self, text: &str, start: usize, end: usize) -> (usize, usize) {
        let win_start = if self.window == 0 {
            start
        } else {
            text[..start]
                .char_indices()
                .rev()
                .nth(self.window - 1)
                .map(|(i, _)| i)
                .unwrap_or(0)
        };

        let win_end = text[end..]
            .char_indices()
            .nth(self.window)
            .map(|(i, _)| end + i)
            .unwrap_or(text.len());

        (win_start, win_end)
    }
}

/// Replace every mention token with `@Name`, for previews and notifications
pub fn render_plain_text(text: &str) -> String {
    TOKEN_RE.replace_all(text, "@$name").into_owned()
}
