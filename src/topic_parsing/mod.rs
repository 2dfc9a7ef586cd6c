//! Mention & topic parsing engine
//!
//! Turns forum content with inline `@[Name](type:id)` tokens into topic
//! groups and an auto-title:
//!
//! ```text
//! text -> MentionExtractor -> [Mention + context] -> group_mentions -> ParsedContent -> title
//! ```
//!
//! Everything here is synchronous and allocation-local. A [`TopicParser`]
//! is immutable after construction, so one instance can be shared across
//! threads; the free functions use a process-wide default.

pub mod context;
pub mod grouping;
pub mod insert;
pub mod mention;
pub mod title;

use std::sync::LazyLock;
use tracing::debug;

use crate::config::TopicParserConfig;

pub use context::{classify_window, MentionContext};
pub use grouping::{group_mentions, ParsedContent, TopicGroup, GENERAL_CONTEXT};
pub use insert::{MentionInsertion, MentionQuery, MentionSuggestion};
pub use mention::{render_plain_text, Mention, MentionExtractor, MentionType};
pub use title::{clean_context, topic_description, topic_name};

static DEFAULT_PARSER: LazyLock<TopicParser> = LazyLock::new(TopicParser::default);

/// Configured entry point for the whole pipeline
#[derive(Debug, Clone)]
pub struct TopicParser {
    config: TopicParserConfig,
    extractor: MentionExtractor,
}

impl Default for TopicParser {
    fn default() -> Self {
        Self::new(TopicParserConfig::default())
    }
}

impl TopicParser {
    pub fn new(config: TopicParserConfig) -> Self {
        Self {
            extractor: MentionExtractor::new(config.context_window),
            config,
        }
    }

    pub fn config(&self) -> &TopicParserConfig {
        &self.config
    }

    /// Every mention in source order, with context attached
    pub fn extract_mentions(&self, text: &str) -> Vec<Mention> {
        self.extractor.extract(text)
    }

    /// Extract, classify and group mentions into topics
    pub fn parse_content_into_topics(&self, text: &str) -> ParsedContent {
        let mentions = self.extract_mentions(text);
        let parsed = group_mentions(mentions, self.config.rich_context_min_len);

        debug!(
            mentions = parsed.original_mentions.len(),
            topics = parsed.topics.len(),
            standalone_companies = parsed.standalone_companies.len(),
            standalone_contacts = parsed.standalone_contacts.len(),
            "parsed content into topics"
        );

        parsed
    }

    /// Auto-title using the configured default length
    pub fn generate_auto_title(&self, text: &str) -> String {
        self.generate_auto_title_with_max(text, self.config.default_title_max_length)
    }

    pub fn generate_auto_title_with_max(&self, text: &str, max_length: usize) -> String {
        let parsed = self.parse_content_into_topics(text);
        self.title_for_parsed(&parsed, text, max_length)
    }

    /// Auto-title from an existing parse of `text`
    pub fn title_for_parsed(
        &self,
        parsed: &ParsedContent,
        text: &str,
        max_length: usize,
    ) -> String {
        let composed = title::compose_title(parsed, text);
        title::truncate_title(&composed, max_length, self.config.min_break_ratio)
    }

    pub fn active_mention_query(&self, text: &str, cursor: usize) -> Option<MentionQuery> {
        insert::active_mention_query(text, cursor, self.config.max_query_len)
    }

    pub fn insert_mention(
        &self,
        text: &str,
        cursor: usize,
        suggestion: &MentionSuggestion,
    ) -> MentionInsertion {
        insert::insert_mention(text, cursor, suggestion, self.config.max_query_len)
    }
}

/// Extract mentions with the default configuration
pub fn extract_mentions(text: &str) -> Vec<Mention> {
    DEFAULT_PARSER.extract_mentions(text)
}

/// Parse text into topics with the default configuration
pub fn parse_content_into_topics(text: &str) -> ParsedContent {
    DEFAULT_PARSER.parse_content_into_topics(text)
}

/// Auto-title text; `max_length` defaults to 80
pub fn generate_auto_title(text: &str, max_length: Option<usize>) -> String {
    match max_length {
        Some(max) => DEFAULT_PARSER.generate_auto_title_with_max(text, max),
        None => DEFAULT_PARSER.generate_auto_title(text),
    }
}

/// Detect the `@query` being typed at `cursor` with the default configuration
pub fn active_mention_query(text: &str, cursor: usize) -> Option<MentionQuery> {
    DEFAULT_PARSER.active_mention_query(text, cursor)
}

/// Splice a suggestion into `text` at `cursor` with the default configuration
pub fn insert_mention(
    text: &str,
    cursor: usize,
    suggestion: &MentionSuggestion,
) -> MentionInsertion {
    DEFAULT_PARSER.insert_mention(text, cursor, suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_groups_shared_context() {
        let text = "Met @[Acme](company:1) @ Healix NY. Also @[Jane](contact:2) @ Healix NY.";
        let parsed = parse_content_into_topics(text);
        assert_eq!(parsed.topics.len(), 1);
        assert_eq!(parsed.topics[0].name, "Acme @ Healix NY + 1 contact");
        assert_eq!(
            parsed.topics[0].description,
            "1 company and 1 contact related to @ Healix NY"
        );
        assert_eq!(generate_auto_title(text, None), "Acme @ Healix NY + 1 contact");
    }

    #[test]
    fn test_standalone_company_title() {
        let text = "Thoughts on @[Acme](company:1) and @[Globex](company:2) lately";
        assert_eq!(generate_auto_title(text, None), "Acme + 1 more");
    }

    #[test]
    fn test_plain_text_title() {
        assert_eq!(
            generate_auto_title("  Any radio reps around?  ", None),
            "Any radio reps around?"
        );
        assert_eq!(generate_auto_title("", Some(20)), "");
    }

    #[test]
    fn test_custom_config() {
        let config = TopicParserConfig {
            rich_context_min_len: 20,
            ..TopicParserConfig::default()
        };
        let parser = TopicParser::new(config);
        let parsed = parser.parse_content_into_topics("@[Acme](company:1) @ Chicago.");
        assert!(parsed.topics.is_empty());
        assert_eq!(parsed.standalone_companies.len(), 1);
    }
}
