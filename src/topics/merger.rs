//! Folding language-grammar topics into comment topics.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use indexmap::IndexSet;
use regex::Regex;
use tracing::trace;

use super::topic::{AutoTopic, Topic};
use crate::base::Settings;
use crate::base::constants::{CONTINUED_TEXT, GLOBAL_SECTION_TITLE};
use crate::language::{ScopeRule, TopicType};
use crate::markup::symbol_entries;

/// Trailing parameter list in a title: `Foo (a, b)`.
static RE_TITLE_PARAMETERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ]*\([^(]*$").unwrap());

/// Merges auto-topics into the comment topics of one file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoTopicMerger {
    documented_only: bool,
}

impl AutoTopicMerger {
    pub fn new(documented_only: bool) -> Self {
        Self { documented_only }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.documented_only)
    }

    /// Merge by line number, then add package delineators.
    ///
    /// Both inputs must belong to the same file. Comment topics are expected
    /// in source order; auto-topics are sorted here.
    pub fn merge(&self, mut topics: Vec<Topic>, mut auto_topics: Vec<AutoTopic>) -> Vec<Topic> {
        if auto_topics.is_empty() {
            add_package_delineators(&mut topics);
            return topics;
        }
        auto_topics.sort_by_key(|auto| auto.line_number);

        // Names documented as `<ds>` entries of list topics, per type.
        let mut in_lists: HashSet<(TopicType, String)> = HashSet::new();
        let mut auto_topics = auto_topics.into_iter().peekable();
        let mut index = 0;

        while index < topics.len() {
            let Some(auto) = auto_topics.peek() else {
                break;
            };
            let topic = &mut topics[index];

            if auto.line_number < topic.line_number {
                let Some(auto) = auto_topics.next() else {
                    break;
                };
                if in_lists.remove(&(auto.kind.topic_type(), auto.name.clone())) {
                    trace!(name = %auto.name, "auto-topic documented in a list");
                } else if !self.documented_only {
                    topics.insert(index, auto.into_topic());
                    index += 1;
                }
            } else if auto.kind == topic.kind && matches_title(&topic.title, &auto.name) {
                let Some(auto) = auto_topics.next() else {
                    break;
                };
                transfer(topic, auto);
                index += 1;
            } else if topic.kind.is_list() {
                if let Some(body) = &topic.body {
                    let topic_type = topic.kind.topic_type();
                    in_lists.extend(
                        symbol_entries(body)
                            .into_iter()
                            .map(|entry| (topic_type, entry.name)),
                    );
                }
                index += 1;
            } else {
                index += 1;
            }
        }

        if !self.documented_only {
            for auto in auto_topics {
                if !in_lists.remove(&(auto.kind.topic_type(), auto.name.clone())) {
                    topics.push(auto.into_topic());
                }
            }
        }

        add_package_delineators(&mut topics);
        topics
    }
}

/// Whether a comment title names the declaration.
fn matches_title(title: &str, name: &str) -> bool {
    let clean = RE_TITLE_PARAMETERS.replace(title, "");
    clean.contains(name)
}

fn transfer(topic: &mut Topic, auto: AutoTopic) {
    if auto.prototype.is_some() {
        topic.set_prototype(auto.prototype);
    }
    if topic.kind.topic_type().scope_rule() == ScopeRule::Normal {
        topic.package = auto.package.clone();
        topic.scope = auto.package;
    }
    topic.is_exported |= auto.is_exported;
    if topic.parents.is_empty() {
        topic.parents = auto.parents;
    }
}

/// Insert a topic wherever members change package without an explicit
/// Class or Section topic: a "Global" section, or the class restated.
pub fn add_package_delineators(topics: &mut Vec<Topic>) {
    let mut current: Option<Arc<str>> = None;
    let mut opened: IndexSet<Arc<str>> = IndexSet::new();
    let mut index = 0;

    while index < topics.len() {
        let topic = &topics[index];
        match topic.kind.topic_type().scope_rule() {
            ScopeRule::Start => {
                let package: Arc<str> = Arc::from(topic.title.as_str());
                opened.insert(package.clone());
                current = Some(package);
            }
            ScopeRule::End => current = None,
            ScopeRule::AlwaysGlobal => {}
            ScopeRule::Normal if topic.package != current => {
                let mut delineator = match &topic.package {
                    None => Topic::new(
                        TopicType::Section.into(),
                        GLOBAL_SECTION_TITLE,
                        topic.line_number,
                    ),
                    Some(package) => {
                        let class = Topic::new(
                            TopicType::Class.into(),
                            package.as_ref(),
                            topic.line_number,
                        )
                        .with_package(Some(package.clone()));
                        if opened.insert(package.clone()) {
                            class
                        } else {
                            class.with_body(format!("<p>{CONTINUED_TEXT}</p>"))
                        }
                    }
                };
                delineator.is_delineator = true;
                trace!(
                    title = %delineator.title,
                    line = delineator.line_number,
                    "package delineator"
                );
                current = topic.package.clone();
                topics.insert(index, delineator);
                index += 1;
            }
            ScopeRule::Normal => {}
        }
        index += 1;
    }
}
