//! Mention Topics - forum mention & topic parsing engine
//!
//! Scans forum posts for inline `@[Name](type:id)` mention tokens, attaches
//! nearby location/affiliation context, groups mentions that share context
//! into topics and derives a compact auto-title for the post.
//!
//! ## Quick Start
//!
//! ```rust
//! use mention_topics::{generate_auto_title, parse_content_into_topics};
//!
//! let text = "Lunch with @[Acme](company:1) and @[Jane](contact:2) @ Chicago.";
//! let parsed = parse_content_into_topics(text);
//! assert_eq!(parsed.original_mentions.len(), 2);
//!
//! let title = generate_auto_title(text, Some(40));
//! assert!(title.chars().count() <= 40);
//! ```

// Core error handling
pub mod error;

// Tunable thresholds
pub mod config;

// Extraction, classification, grouping and titling
pub mod topic_parsing;

pub use config::TopicParserConfig;
pub use error::{Result, TopicError};
pub use topic_parsing::{
    active_mention_query, extract_mentions, generate_auto_title, insert_mention,
    parse_content_into_topics, render_plain_text, Mention, MentionInsertion, MentionQuery,
    MentionSuggestion, MentionType, ParsedContent, TopicGroup, TopicParser,
};
