//! Developer comments attached to extracted call expressions.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use swc_common::Span;
use swc_common::comments::Comment;

use crate::core::parsers::ParsedSource;

/// Which comments around a call become developer comments of its message.
///
/// ```js
/// // other line leading
/// /* same line leading */ t('Foo') // same line trailing
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommentOptions {
    #[serde(default)]
    pub other_line_leading: bool,
    #[serde(default)]
    pub same_line_leading: bool,
    #[serde(default)]
    pub same_line_trailing: bool,
    /// Only matching comments are kept; capture group 1, if any, replaces the text.
    #[serde(
        default,
        deserialize_with = "deserialize_regex",
        serialize_with = "serialize_regex",
        skip_serializing_if = "Option::is_none"
    )]
    pub regex: Option<Regex>,
}

fn deserialize_regex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Regex>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|pattern| Regex::new(&pattern).map_err(serde::de::Error::custom))
        .transpose()
}

fn serialize_regex<S: Serializer>(regex: &Option<Regex>, serializer: S) -> Result<S::Ok, S::Error> {
    regex.as_ref().map(Regex::as_str).serialize(serializer)
}

impl CommentOptions {
    pub fn is_enabled(&self) -> bool {
        self.other_line_leading || self.same_line_leading || self.same_line_trailing
    }

    /// Comments for the node covering `span`, leading before trailing, each in
    /// source order.
    pub fn collect(&self, span: Span, source: &ParsedSource) -> Vec<String> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let start_line = source.line_of(span.lo);
        let end_line = source.line_of(span.hi);
        let mut comments = Vec::new();

        let mut leading = Vec::new();
        let mut boundary = span.lo;
        for comment in source.comments.before(span.lo).iter().rev() {
            if !only_whitespace_between(source, comment.span.hi, boundary) {
                break;
            }
            let same_line = source.line_of(comment.span.hi) == start_line;
            // A comment following code on an earlier line belongs to that code.
            if !same_line && !starts_line(source, comment) {
                break;
            }
            if (same_line && self.same_line_leading) || (!same_line && self.other_line_leading) {
                leading.push(comment);
            }
            boundary = comment.span.lo;
        }
        comments.extend(leading.into_iter().rev().filter_map(|c| self.comment_text(c)));

        if self.same_line_trailing {
            let mut boundary = span.hi;
            for comment in source.comments.after(span.hi) {
                if source.line_of(comment.span.lo) != end_line
                    || !only_whitespace_between(source, boundary, comment.span.lo)
                {
                    break;
                }
                comments.extend(self.comment_text(comment));
                boundary = comment.span.hi;
            }
        }

        comments
    }

    fn comment_text(&self, comment: &Comment) -> Option<String> {
        let text = comment.text.trim();
        let text = match &self.regex {
            Some(regex) => {
                let captures = regex.captures(text)?;
                captures.get(1).map_or(text, |m| m.as_str().trim())
            }
            None => text,
        };
        (!text.is_empty()).then(|| text.to_string())
    }
}

fn starts_line(source: &ParsedSource, comment: &Comment) -> bool {
    source
        .line_prefix(comment.span.lo)
        .is_some_and(|prefix| prefix.trim().is_empty())
}

fn only_whitespace_between(
    source: &ParsedSource,
    lo: swc_common::BytePos,
    hi: swc_common::BytePos,
) -> bool {
    source
        .text_between(lo, hi)
        .is_some_and(|gap| gap.chars().all(char::is_whitespace))
}
