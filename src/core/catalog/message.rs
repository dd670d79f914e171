//! Message data flowing from extractors into the catalog.

use std::fmt;

/// A candidate message reported by an extractor, or a merged catalog entry.
///
/// Identity within the catalog is `(text, context)`; everything else is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Singular text. The empty string is valid content.
    pub text: String,
    pub text_plural: Option<String>,
    pub context: Option<String>,
    /// `file:line` strings, unique, in encounter order.
    pub references: Vec<String>,
    /// Developer comments, unique, in encounter order.
    pub comments: Vec<String>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_plural(mut self, text_plural: impl Into<String>) -> Self {
        self.text_plural = Some(text_plural.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    /// Context as stored in the catalog: an empty context means "no context".
    pub fn normalized_context(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.is_empty())
    }
}

/// One physical occurrence of a message in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageReference {
    pub file: String,
    pub line: usize,
}

impl MessageReference {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for MessageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Push `value` unless it is already present.
pub(crate) fn push_unique(values: &mut Vec<String>, value: &str) -> bool {
    if values.iter().any(|v| v == value) {
        return false;
    }
    values.push(value.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_display() {
        assert_eq!(MessageReference::new("src/app.tsx", 12).to_string(), "src/app.tsx:12");
    }

    #[test]
    fn test_empty_context_is_no_context() {
        assert_eq!(Message::new("Foo").with_context("").normalized_context(), None);
        assert_eq!(
            Message::new("Foo").with_context("menu").normalized_context(),
            Some("menu")
        );
    }

    #[test]
    fn test_push_unique() {
        let mut values = vec!["a".to_string()];
        assert!(!push_unique(&mut values, "a"));
        assert!(push_unique(&mut values, "b"));
        assert_eq!(values, vec!["a", "b"]);
    }
}
