//! Topic grouping
//!
//! Clusters mentions that share the same context phrase into topics.
//! Mentions without context, and lone mentions whose context is too thin,
//! are reported as standalone companies/contacts instead.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::mention::{Mention, MentionType};
use super::title::{topic_description, topic_name};

/// Group key for contextual mentions that somehow carry neither field
pub const GENERAL_CONTEXT: &str = "general";

/// A cluster of mentions sharing one context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicGroup {
    pub name: String,
    /// Shared context key the group was formed on
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_company: Option<Mention>,
    pub companies: Vec<Mention>,
    pub contacts: Vec<Mention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
}

impl TopicGroup {
    /// Build a group from its members, in original mention order
    pub fn from_mentions(context: &str, members: &[Mention]) -> Self {
        let companies: Vec<Mention> = members
            .iter()
            .filter(|m| m.is_company())
            .cloned()
            .collect();
        let contacts: Vec<Mention> = members
            .iter()
            .filter(|m| m.is_contact())
            .cloned()
            .collect();
        let location = members.iter().find_map(|m| m.location.clone());

        Self {
            name: topic_name(&companies, &contacts, context),
            context: context.to_string(),
            primary_company: companies.first().cloned(),
            description: topic_description(companies.len(), contacts.len(), context),
            companies,
            contacts,
            location,
        }
    }
}

/// Full result of parsing one text blob
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    pub topics: Vec<TopicGroup>,
    pub standalone_companies: Vec<Mention>,
    pub standalone_contacts: Vec<Mention>,
    /// Every extracted mention, unfiltered, in source order
    pub original_mentions: Vec<Mention>,
}

impl ParsedContent {
    pub fn is_empty(&self) -> bool {
        self.original_mentions.is_empty()
    }

    /// Mentions deduplicated by `(type, id)`, first occurrence wins
    pub fn unique_entities(&self) -> Vec<&Mention> {
        let mut seen: HashSet<(&MentionType, &str)> = HashSet::new();
        self.original_mentions
            .iter()
            .filter(|m| seen.insert((&m.mention_type, m.id.as_str())))
            .collect()
    }
}

/// Partition mentions into topics and standalones.
///
/// A context key shared by several mentions always forms a topic. A key
/// held by one mention forms a topic only when that mention's `context` is
/// longer than `rich_context_min_len` characters.
pub fn group_mentions(mentions: Vec<Mention>, rich_context_min_len: usize) -> ParsedContent {
    let mut keys: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<&Mention>> = HashMap::new();
    let mut bare: Vec<&Mention> = Vec::new();

    for mention in &mentions {
        if !mention.has_context() {
            bare.push(mention);
            continue;
        }

        let key = group_key(mention);
        let bucket = buckets.entry(key.clone()).or_default();
        if bucket.is_empty() {
            keys.push(key);
        }
        bucket.push(mention);
    }

    let mut topics = Vec::new();
    let mut demoted: Vec<&Mention> = bare;

    for key in keys {
        let Some(members) = buckets.remove(&key) else {
            continue;
        };

        let promote = members.len() > 1
            || members[0]
                .context
                .as_deref()
                .is_some_and(|c| c.chars().count() > rich_context_min_len);

        if promote {
            let owned: Vec<Mention> = members.into_iter().cloned().collect();
            topics.push(TopicGroup::from_mentions(&key, &owned));
        } else {
            demoted.extend(members);
        }
    }

    // Standalone lists follow source order regardless of how a mention was demoted
    demoted.sort_by_key(|m| m.start);

    let standalone_companies = demoted
        .iter()
        .filter(|m| m.is_company())
        .map(|m| (*m).clone())
        .collect();
    let standalone_contacts = demoted
        .iter()
        .filter(|m| m.is_contact())
        .map(|m| (*m).clone())
        .collect();

    ParsedContent {
        topics,
        standalone_companies,
        standalone_contacts,
        original_mentions: mentions,
    }
}

fn group_key(mention: &Mention) -> String {
    mention
        .context
        .as_deref()
        .filter(|c| !c.is_empty())
        .or(mention.location.as_deref().filter(|l| !l.is_empty()))
        .unwrap_or(GENERAL_CONTEXT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(
        t: MentionType,
        name: &str,
        start: usize,
        context: Option<&str>,
        location: Option<&str>,
    ) -> Mention {
        Mention {
            mention_type: t,
            id: format!("{}-id", name),
            name: name.to_string(),
            context: context.map(str::to_string),
            location: location.map(str::to_string),
            start,
            end: start + 1,
        }
    }

    #[test]
    fn test_shared_context_forms_one_topic() {
        let mentions = vec![
            mention(MentionType::Company, "Acme", 0, Some("@ NY"), Some("NY")),
            mention(MentionType::Contact, "Jane", 10, Some("@ NY"), None),
        ];
        let parsed = group_mentions(mentions, 3);
        assert_eq!(parsed.topics.len(), 1);
        let topic = &parsed.topics[0];
        assert_eq!(topic.context, "@ NY");
        assert_eq!(topic.companies.len(), 1);
        assert_eq!(topic.contacts.len(), 1);
        assert_eq!(topic.primary_company.as_ref().map(|m| m.name.as_str()), Some("Acme"));
        assert_eq!(topic.location.as_deref(), Some("NY"));
        assert!(parsed.standalone_companies.is_empty());
    }

    #[test]
    fn test_singleton_needs_rich_context() {
        let mentions = vec![
            mention(MentionType::Company, "Short", 0, Some("@ NY"), None),
            mention(MentionType::Company, "Rich", 10, Some("@ Chicago"), None),
        ];
        let parsed = group_mentions(mentions, 3);
        assert_eq!(parsed.topics.len(), 1);
        assert_eq!(parsed.topics[0].context, "@ Chicago");
        assert_eq!(parsed.standalone_companies.len(), 1);
        assert_eq!(parsed.standalone_companies[0].name, "Short");
    }

    #[test]
    fn test_location_only_singleton_is_demoted() {
        let mentions = vec![mention(MentionType::Contact, "Jane", 0, None, Some("Denver"))];
        let parsed = group_mentions(mentions, 3);
        assert!(parsed.topics.is_empty());
        assert_eq!(parsed.standalone_contacts.len(), 1);
    }

    #[test]
    fn test_location_key_groups_pairs() {
        let mentions = vec![
            mention(MentionType::Contact, "Jane", 0, None, Some("Denver")),
            mention(MentionType::Contact, "Bob", 5, None, Some("Denver")),
        ];
        let parsed = group_mentions(mentions, 3);
        assert_eq!(parsed.topics.len(), 1);
        assert_eq!(parsed.topics[0].context, "Denver");
        assert!(parsed.topics[0].primary_company.is_none());
    }

    #[test]
    fn test_topic_order_follows_first_seen_key() {
        let mentions = vec![
            mention(MentionType::Company, "A", 0, Some("@ Boston"), None),
            mention(MentionType::Company, "B", 5, Some("@ Chicago"), None),
            mention(MentionType::Company, "C", 9, Some("@ Boston"), None),
        ];
        let parsed = group_mentions(mentions, 3);
        let contexts: Vec<_> = parsed.topics.iter().map(|t| t.context.as_str()).collect();
        assert_eq!(contexts, vec!["@ Boston", "@ Chicago"]);
        let names: Vec<_> = parsed.topics[0].companies.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_standalones_in_source_order() {
        let mentions = vec![
            mention(MentionType::Company, "A", 0, Some("@ NY"), None),
            mention(MentionType::Company, "B", 5, None, None),
            mention(MentionType::Contact, "C", 9, None, None),
        ];
        let parsed = group_mentions(mentions, 3);
        let names: Vec<_> = parsed.standalone_companies.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(parsed.standalone_contacts[0].name, "C");
    }

    #[test]
    fn test_other_types_only_in_original() {
        let mentions = vec![
            mention(MentionType::Category, "Radio", 0, None, None),
            mention(MentionType::User, "mod", 5, None, None),
            mention(MentionType::Other("fund".into()), "F", 9, Some("@ Chicago"), None),
        ];
        let parsed = group_mentions(mentions, 3);
        assert!(parsed.standalone_companies.is_empty());
        assert!(parsed.standalone_contacts.is_empty());
        assert_eq!(parsed.original_mentions.len(), 3);
        // Rich singleton context still forms a topic, with empty partitions
        assert_eq!(parsed.topics.len(), 1);
        assert!(parsed.topics[0].companies.is_empty());
        assert_eq!(parsed.topics[0].name, "@ Chicago");
    }

    #[test]
    fn test_unique_entities() {
        let mentions = vec![
            mention(MentionType::Company, "A", 0, None, None),
            mention(MentionType::Contact, "B", 5, None, None),
            mention(MentionType::Company, "A", 9, None, None),
        ];
        let parsed = group_mentions(mentions, 3);
        let unique: Vec<_> = parsed.unique_entities().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(unique, vec!["A", "B"]);
    }

    #[test]
    fn test_empty() {
        let parsed = group_mentions(Vec::new(), 3);
        assert_eq!(parsed, ParsedContent::default());
        assert!(parsed.is_empty());
    }
}
