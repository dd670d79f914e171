//! The message catalog: deduplication, merging and ordering of occurrences.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::catalog::message::{Message, MessageReference, push_unique};
use crate::core::catalog::stats::ExtractorStats;
use crate::core::validate;
use crate::error::{ExtractError, Result};

/// What to do when an occurrence reports a different plural text for a message
/// that already has one. The first plural text always stays.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PluralConflictPolicy {
    /// Keep the first plural text silently.
    #[default]
    Keep,
    /// Keep the first plural text and log a warning.
    Warn,
    /// Refuse the occurrence with [`ExtractError::PluralConflict`].
    Reject,
}

/// Messages sharing one context, in order of first appearance.
#[derive(Debug)]
struct ContextGroup {
    context: Option<String>,
    messages: Vec<Message>,
    by_text: HashMap<String, usize>,
}

impl ContextGroup {
    fn new(context: Option<String>) -> Self {
        Self {
            context,
            messages: Vec::new(),
            by_text: HashMap::new(),
        }
    }
}

/// In-memory store of unique messages keyed by `(text, context)`.
///
/// Entries are never removed. Iteration order is the serialization order: the
/// no-context group first, then each context in order of first appearance, and
/// within a group each text in order of first appearance.
#[derive(Debug)]
pub struct Catalog {
    /// `groups[0]` is always the no-context group.
    groups: Vec<ContextGroup>,
    group_index: HashMap<String, usize>,
    plural_conflicts: PluralConflictPolicy,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            groups: vec![ContextGroup::new(None)],
            group_index: HashMap::new(),
            plural_conflicts: PluralConflictPolicy::default(),
        }
    }

    pub fn with_plural_conflicts(mut self, policy: PluralConflictPolicy) -> Self {
        self.plural_conflicts = policy;
        self
    }

    pub fn plural_conflicts(&self) -> PluralConflictPolicy {
        self.plural_conflicts
    }

    /// Record one occurrence of `message`, optionally located at `reference`.
    ///
    /// Occurrences of a known `(text, context)` are merged: a plural text is adopted
    /// only if the entry has none yet, and new references and comments are appended
    /// in encounter order. Nothing is mutated when validation fails.
    pub fn add_message(
        &mut self,
        message: Message,
        reference: Option<&MessageReference>,
        stats: &mut ExtractorStats,
    ) -> Result<()> {
        validate_occurrence(&message, reference)?;

        let context = message.normalized_context().map(str::to_string);
        if let Some(existing) = self.get(&message.text, context.as_deref()) {
            self.check_plural_conflict(existing, &message)?;
        }

        let Message {
            text,
            text_plural,
            references,
            comments,
            ..
        } = message;
        let references: Vec<String> = references
            .into_iter()
            .chain(reference.map(ToString::to_string))
            .collect();

        let group = self.group_mut(context, stats);
        match group.by_text.get(&text) {
            Some(&idx) => {
                let entry = &mut group.messages[idx];
                if entry.text_plural.is_none()
                    && let Some(plural) = text_plural
                {
                    entry.text_plural = Some(plural);
                    stats.number_of_plural_messages += 1;
                }
                merge(entry, &references, &comments);
            }
            None => {
                let mut entry = Message {
                    text: text.clone(),
                    text_plural,
                    context: group.context.clone(),
                    references: Vec::new(),
                    comments: Vec::new(),
                };
                merge(&mut entry, &references, &comments);

                if entry.text_plural.is_some() {
                    stats.number_of_plural_messages += 1;
                }
                stats.number_of_messages += 1;
                tracing::debug!(text = %entry.text, context = ?entry.context, "new catalog message");

                group.by_text.insert(text, group.messages.len());
                group.messages.push(entry);
            }
        }

        stats.number_of_message_usages += 1;
        Ok(())
    }

    /// Check a batch of occurrences the way [`add_message`](Self::add_message) would,
    /// without recording anything. Plural conflicts between occurrences of the same
    /// batch are caught too, so a batch that passes can be recorded completely.
    pub fn check_batch<'m>(
        &self,
        batch: impl IntoIterator<Item = (&'m Message, Option<&'m MessageReference>)>,
    ) -> Result<()> {
        let mut pending_plurals: HashMap<(Option<&'m str>, &'m str), &'m str> = HashMap::new();
        for (message, reference) in batch {
            validate_occurrence(message, reference)?;
            if self.plural_conflicts != PluralConflictPolicy::Reject {
                continue;
            }
            let Some(plural) = message.text_plural.as_deref() else {
                continue;
            };

            let context = message.normalized_context();
            let key = (context, message.text.as_str());
            let kept = self
                .get(&message.text, context)
                .and_then(|existing| existing.text_plural.clone())
                .or_else(|| pending_plurals.get(&key).map(|p| p.to_string()));
            match kept {
                Some(kept) if kept != plural => {
                    return Err(ExtractError::PluralConflict {
                        text: message.text.clone(),
                        context: context.map(str::to_string),
                        existing: kept,
                        rejected: plural.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    pending_plurals.insert(key, plural);
                }
            }
        }
        Ok(())
    }

    fn check_plural_conflict(&self, existing: &Message, incoming: &Message) -> Result<()> {
        let (Some(kept), Some(rejected)) = (&existing.text_plural, &incoming.text_plural) else {
            return Ok(());
        };
        if kept == rejected {
            return Ok(());
        }

        match self.plural_conflicts {
            PluralConflictPolicy::Keep => Ok(()),
            PluralConflictPolicy::Warn => {
                tracing::warn!(
                    text = %existing.text,
                    context = ?existing.context,
                    kept = %kept,
                    ignored = %rejected,
                    "conflicting plural text, keeping the first one"
                );
                Ok(())
            }
            PluralConflictPolicy::Reject => Err(ExtractError::PluralConflict {
                text: existing.text.clone(),
                context: existing.context.clone(),
                existing: kept.clone(),
                rejected: rejected.clone(),
            }),
        }
    }

    fn group_mut(
        &mut self,
        context: Option<String>,
        stats: &mut ExtractorStats,
    ) -> &mut ContextGroup {
        let idx = match context {
            None => 0,
            Some(context) => match self.group_index.get(&context) {
                Some(&idx) => idx,
                None => {
                    let idx = self.groups.len();
                    self.group_index.insert(context.clone(), idx);
                    self.groups.push(ContextGroup::new(Some(context)));
                    stats.number_of_contexts += 1;
                    idx
                }
            },
        };
        &mut self.groups[idx]
    }

    /// Look up the entry for `(text, context)`. An empty context means no context.
    pub fn get(&self, text: &str, context: Option<&str>) -> Option<&Message> {
        let group = match context.filter(|c| !c.is_empty()) {
            None => &self.groups[0],
            Some(context) => &self.groups[*self.group_index.get(context)?],
        };
        group.by_text.get(text).map(|&idx| &group.messages[idx])
    }

    /// All entries in serialization order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.groups.iter().flat_map(|group| group.messages.iter())
    }

    /// An owned copy of all entries in serialization order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages().cloned().collect()
    }

    /// Entries grouped by context, skipping contexts without messages.
    pub fn messages_by_context(&self) -> Vec<(Option<&str>, &[Message])> {
        self.groups
            .iter()
            .filter(|group| !group.messages.is_empty())
            .map(|group| (group.context.as_deref(), group.messages.as_slice()))
            .collect()
    }

    /// Distinct contexts in order of first appearance.
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().filter_map(|group| group.context.as_deref())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_occurrence(message: &Message, reference: Option<&MessageReference>) -> Result<()> {
    for candidate in &message.references {
        validate::reference(candidate)?;
    }
    if let Some(reference) = reference {
        validate::non_empty_property("reference.file", &reference.file)?;
        validate::no_line_breaks("reference.file", &reference.file)?;
    }
    Ok(())
}

fn merge(entry: &mut Message, references: &[String], comments: &[String]) {
    for reference in references {
        push_unique(&mut entry.references, reference);
    }
    for comment in comments {
        push_unique(&mut entry.comments, comment);
    }
}
