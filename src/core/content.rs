//! Content normalization applied to every extracted string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::validate::ValidationError;

/// Whitespace handling for extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentOptions {
    /// Strip leading line breaks and all trailing whitespace.
    pub trim_white_space: bool,
    /// Keep leading spaces/tabs on each line.
    pub preserve_indentation: bool,
    /// Replace every line break with this string.
    pub replace_new_lines: ReplaceNewLines,
}

impl ContentOptions {
    /// Defaults for strings found in program source (call arguments).
    pub fn source_defaults() -> Self {
        Self {
            trim_white_space: false,
            preserve_indentation: true,
            replace_new_lines: ReplaceNewLines::Keep,
        }
    }

    /// Defaults for text taken from markup (element content and attributes).
    pub fn markup_defaults() -> Self {
        Self {
            trim_white_space: true,
            preserve_indentation: false,
            replace_new_lines: ReplaceNewLines::Keep,
        }
    }
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self::source_defaults()
    }
}

/// User-supplied content settings, layered over an extractor's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_white_space: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_indentation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_new_lines: Option<ReplaceNewLines>,
}

impl ContentOverrides {
    pub fn apply(&self, mut base: ContentOptions) -> ContentOptions {
        if let Some(trim) = self.trim_white_space {
            base.trim_white_space = trim;
        }
        if let Some(preserve) = self.preserve_indentation {
            base.preserve_indentation = preserve;
        }
        if let Some(replace) = &self.replace_new_lines {
            base.replace_new_lines = replace.clone();
        }
        base
    }
}

/// Line break replacement. Serialized as `false` or a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReplaceNewLines {
    #[default]
    Keep,
    With(String),
}

impl ReplaceNewLines {
    pub fn replacement(&self) -> Option<&str> {
        match self {
            ReplaceNewLines::Keep => None,
            ReplaceNewLines::With(s) => Some(s),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReplaceNewLines {
    Flag(bool),
    Text(String),
}

impl<'de> Deserialize<'de> for ReplaceNewLines {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawReplaceNewLines::deserialize(deserializer) {
            Ok(RawReplaceNewLines::Flag(false)) => Ok(ReplaceNewLines::Keep),
            Ok(RawReplaceNewLines::Text(s)) => Ok(ReplaceNewLines::With(s)),
            Ok(RawReplaceNewLines::Flag(true)) | Err(_) => Err(serde::de::Error::custom(
                ValidationError::NotFalseOrString("content.replaceNewLines".to_string()),
            )),
        }
    }
}

impl Serialize for ReplaceNewLines {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReplaceNewLines::Keep => serializer.serialize_bool(false),
            ReplaceNewLines::With(s) => serializer.serialize_str(s),
        }
    }
}

/// Normalize raw text according to `options`.
///
/// Windows line endings are always folded to `\n` first.
pub fn normalize_content(raw: &str, options: &ContentOptions) -> String {
    let mut content = raw.replace("\r\n", "\n");

    if options.trim_white_space {
        content = content.trim_start_matches('\n').trim_end().to_string();
    }

    if !options.preserve_indentation {
        content = content
            .split('\n')
            .map(|line| line.trim_start_matches([' ', '\t']))
            .collect::<Vec<_>>()
            .join("\n");
    }

    if let Some(replacement) = options.replace_new_lines.replacement() {
        content = content.replace('\n', replacement);
    }

    content
}
