//! Shared argument and shape validation.
//!
//! Every public boundary (catalog recording, serialization, extractor construction,
//! parsing) funnels its checks through these helpers so failures are reported before
//! any state is touched, with a uniform message format.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Argument '{0}' must be a non-empty string")]
    EmptyArgument(String),

    #[error("Property '{0}' must be a non-empty string")]
    EmptyProperty(String),

    #[error("Argument '{0}' must be a non-empty list")]
    EmptyList(String),

    #[error("Property '{0}' must be false or a string")]
    NotFalseOrString(String),

    #[error("Property '{name}' must not contain {forbidden}")]
    ForbiddenCharacter {
        name: String,
        forbidden: &'static str,
    },

    #[error("Property '{name}' uses argument index {index} more than once")]
    DuplicateArgumentIndex { name: String, index: usize },

    #[error("Invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },
}

pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Reject an empty (or whitespace-only) argument value.
pub fn non_empty_argument(name: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyArgument(name.to_string()));
    }
    Ok(())
}

/// Reject an empty (or whitespace-only) property value.
pub fn non_empty_property(name: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyProperty(name.to_string()));
    }
    Ok(())
}

pub fn non_empty_list<T>(name: &str, values: &[T]) -> ValidationResult {
    if values.is_empty() {
        return Err(ValidationError::EmptyList(name.to_string()));
    }
    Ok(())
}

pub fn no_line_breaks(name: &str, value: &str) -> ValidationResult {
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::ForbiddenCharacter {
            name: name.to_string(),
            forbidden: "line breaks",
        });
    }
    Ok(())
}

/// A header name ends up as `Name: Value\n` inside the header entry, so it can
/// neither be empty nor contain the separator or a line break.
pub fn header(name: &str, value: &str) -> ValidationResult {
    let property = format!("headers.{name}");
    non_empty_property(&property, name)?;
    if name.contains(':') {
        return Err(ValidationError::ForbiddenCharacter {
            name: property,
            forbidden: "':'",
        });
    }
    no_line_breaks(&property, name)?;
    no_line_breaks(&property, value)
}

/// References are rendered on a single `#:` line.
pub fn reference(value: &str) -> ValidationResult {
    non_empty_property("message.references", value)?;
    no_line_breaks("message.references", value)
}

pub fn distinct_indices(name: &str, indices: &[usize]) -> ValidationResult {
    for (pos, index) in indices.iter().enumerate() {
        if indices[..pos].contains(index) {
            return Err(ValidationError::DuplicateArgumentIndex {
                name: name.to_string(),
                index: *index,
            });
        }
    }
    Ok(())
}
