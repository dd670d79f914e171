//! Render a catalog snapshot as POT text.

use std::fmt::Write as _;

use crate::core::catalog::Message;
use crate::core::pot::escape::{escape, fold};
use crate::core::pot::headers::Headers;
use crate::core::validate::{self, ValidationError};

/// Quoted fields wider than this are folded over several lines.
pub const FOLD_WIDTH: usize = 76;

pub const COMMENT_MARKER: &str = "#.";
pub const REFERENCE_MARKER: &str = "#:";

/// First-strong-isolate / pop-directional-isolate pair wrapping references that
/// contain whitespace, so the space-separated reference line stays unambiguous.
pub const ISOLATE_START: char = '\u{2068}';
pub const ISOLATE_END: char = '\u{2069}';

/// Serialize `messages` (in the given order) after a header entry built from the
/// default headers with `headers` layered on top.
///
/// The output is a pure function of the inputs.
pub fn write_pot<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    headers: &Headers,
) -> Result<String, ValidationError> {
    headers.validate()?;

    let mut blocks = vec![header_block(&headers.merged_over_defaults())];
    for message in messages {
        for reference in &message.references {
            validate::reference(reference)?;
        }
        blocks.push(message_block(message));
    }

    Ok(blocks.join("\n"))
}

fn header_block(headers: &Headers) -> String {
    let mut block = String::new();
    push_field(&mut block, "msgid", "");
    push_field(&mut block, "msgstr", &headers.to_header_string());
    block
}

fn message_block(message: &Message) -> String {
    let mut block = String::new();

    for comment in &message.comments {
        let _ = writeln!(block, "{COMMENT_MARKER} {}", escape(comment));
    }

    if !message.references.is_empty() {
        let references: Vec<String> = message
            .references
            .iter()
            .map(|r| isolate_reference(r))
            .collect();
        let _ = writeln!(block, "{REFERENCE_MARKER} {}", references.join(" "));
    }

    if let Some(context) = &message.context {
        push_field(&mut block, "msgctxt", context);
    }
    push_field(&mut block, "msgid", &message.text);

    match &message.text_plural {
        Some(plural) => {
            push_field(&mut block, "msgid_plural", plural);
            push_field(&mut block, "msgstr[0]", "");
            push_field(&mut block, "msgstr[1]", "");
        }
        None => push_field(&mut block, "msgstr", ""),
    }

    block
}

fn isolate_reference(reference: &str) -> String {
    if reference.contains(char::is_whitespace) {
        format!("{ISOLATE_START}{reference}{ISOLATE_END}")
    } else {
        reference.to_string()
    }
}

/// Append `key "value"`, switching to the multi-line form (`key ""` followed by
/// one quoted line per segment) when the value has line breaks or is too wide.
fn push_field(block: &mut String, key: &str, value: &str) {
    let escaped = escape(value);
    let segments = fold(&escaped, FOLD_WIDTH);

    if segments.len() < 2 && !value.contains('\n') {
        let _ = writeln!(block, "{key} \"{escaped}\"");
        return;
    }

    let _ = writeln!(block, "{key} \"\"");
    for segment in segments {
        let _ = writeln!(block, "\"{segment}\"");
    }
}
