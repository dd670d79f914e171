//! Read POT text back into headers and messages.
//!
//! Understands the subset of the PO format that [`write_pot`](super::write_pot) emits,
//! plus unwrapped continuation lines and entries not separated by blank lines.

use crate::core::catalog::Message;
use crate::core::pot::escape::unescape;
use crate::core::pot::headers::Headers;
use crate::core::pot::writer::{COMMENT_MARKER, ISOLATE_END, ISOLATE_START, REFERENCE_MARKER};
use crate::error::{ExtractError, Result};

/// A parsed catalog file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PotFile {
    pub headers: Headers,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    Plural,
    Translation,
}

#[derive(Debug, Default)]
struct PendingEntry {
    comments: Vec<String>,
    references: Vec<String>,
    context: Option<String>,
    id: Option<String>,
    plural: Option<String>,
    translations: Vec<String>,
    field: Option<Field>,
}

impl PendingEntry {
    fn is_empty(&self) -> bool {
        self.comments.is_empty()
            && self.references.is_empty()
            && self.context.is_none()
            && self.id.is_none()
    }

    fn append(&mut self, text: &str) {
        let target = match self.field {
            Some(Field::Context) => self.context.as_mut(),
            Some(Field::Id) => self.id.as_mut(),
            Some(Field::Plural) => self.plural.as_mut(),
            Some(Field::Translation) => self.translations.last_mut(),
            None => None,
        };
        if let Some(target) = target {
            target.push_str(text);
        }
    }
}

/// Parse POT text.
///
/// The first entry with an empty id and no context is read as the header entry.
pub fn read_pot(content: &str) -> Result<PotFile> {
    let mut file = PotFile::default();
    let mut header_seen = false;
    let mut entry = PendingEntry::default();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        // Comment payloads keep trailing whitespace; quoted values are trimmed in `unquote`.
        let line = raw_line.trim_start().trim_end_matches('\r');

        if line.trim_end().is_empty() {
            finish(&mut entry, &mut file, &mut header_seen, line_no)?;
            continue;
        }

        let starts_entry = line.starts_with('#')
            || line.starts_with("msgctxt ")
            || line.starts_with("msgid ");
        if starts_entry && !entry.translations.is_empty() {
            finish(&mut entry, &mut file, &mut header_seen, line_no)?;
        }

        if let Some(rest) = line.strip_prefix(COMMENT_MARKER) {
            entry.comments.push(unescape(strip_one_space(rest)));
        } else if let Some(rest) = line.strip_prefix(REFERENCE_MARKER) {
            entry.references.extend(split_references(rest));
        } else if line.starts_with('#') {
            // Translator, flag and previous-id comments are not part of the model.
        } else if let Some(rest) = line.strip_prefix("msgctxt ") {
            entry.context = Some(unquote(rest, line_no)?);
            entry.field = Some(Field::Context);
        } else if let Some(rest) = line.strip_prefix("msgid_plural ") {
            entry.plural = Some(unquote(rest, line_no)?);
            entry.field = Some(Field::Plural);
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            entry.id = Some(unquote(rest, line_no)?);
            entry.field = Some(Field::Id);
        } else if line.starts_with("msgstr") {
            let line = line.trim_end();
            let value = line
                .split_once(' ')
                .map(|(_, value)| value)
                .ok_or_else(|| syntax_error(line_no, "msgstr without value"))?;
            entry.translations.push(unquote(value, line_no)?);
            entry.field = Some(Field::Translation);
        } else if line.starts_with('"') {
            if entry.field.is_none() {
                return Err(syntax_error(line_no, "continuation line without a field"));
            }
            let text = unquote(line, line_no)?;
            entry.append(&text);
        } else {
            return Err(syntax_error(
                line_no,
                format!("unexpected line: {}", line.trim_end()),
            ));
        }
    }

    finish(&mut entry, &mut file, &mut header_seen, content.lines().count() + 1)?;
    Ok(file)
}

fn finish(
    entry: &mut PendingEntry,
    file: &mut PotFile,
    header_seen: &mut bool,
    line_no: usize,
) -> Result<()> {
    let pending = std::mem::take(entry);
    if pending.is_empty() {
        return Ok(());
    }
    let Some(id) = pending.id else {
        return Err(syntax_error(line_no, "entry without msgid"));
    };

    if !*header_seen && id.is_empty() && pending.context.is_none() {
        *header_seen = true;
        let payload = pending.translations.first().map(String::as_str).unwrap_or("");
        file.headers = parse_header_payload(payload);
        return Ok(());
    }

    file.messages.push(Message {
        text: id,
        text_plural: pending.plural,
        context: pending.context,
        references: pending.references,
        comments: pending.comments,
    });
    Ok(())
}

fn parse_header_payload(payload: &str) -> Headers {
    payload
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name, strip_one_space(value)))
        .collect()
}

fn strip_one_space(s: &str) -> &str {
    s.strip_prefix(' ').unwrap_or(s)
}

fn split_references(line: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == ISOLATE_START {
            chars.next();
            let reference: String = chars.by_ref().take_while(|&c| c != ISOLATE_END).collect();
            references.push(reference);
        } else {
            let mut reference = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                reference.push(c);
                chars.next();
            }
            references.push(reference);
        }
    }
    references
}

fn unquote(value: &str, line_no: usize) -> Result<String> {
    let value = value.trim();
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .filter(|_| value.len() >= 2)
        .ok_or_else(|| syntax_error(line_no, format!("expected a quoted string: {value}")))?;
    Ok(unescape(inner))
}

fn syntax_error(line: usize, message: impl Into<String>) -> ExtractError {
    ExtractError::PotSyntax {
        line,
        message: message.into(),
    }
}
