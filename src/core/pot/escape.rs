//! Quoted-string escaping and line folding for the PO text format.

/// Escape backslash, double quote, tab, carriage return and newline.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse of [`escape`]. Unknown escapes are kept verbatim.
pub fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Split an escaped string into quoted-line segments.
///
/// A segment ends right after every `\n` escape. Segments longer than `width`
/// characters break after the last space that fits, or hard at `width`. An escape
/// sequence is never split.
pub fn fold(escaped: &str, width: usize) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = escaped;
    while !rest.is_empty() {
        let (head, tail) = rest.split_at(next_cut(rest, width));
        segments.push(head);
        rest = tail;
    }
    segments
}

fn next_cut(s: &str, width: usize) -> usize {
    let mut units = 0;
    let mut fit_end = 0;
    let mut space_end = None;
    let mut seen_non_space = false;

    let mut iter = s.char_indices();
    while let Some((start, c)) = iter.next() {
        let (end, len, line_break) = if c == '\\' {
            match iter.next() {
                Some((i, next)) => (i + next.len_utf8(), 2, next == 'n'),
                None => (start + 1, 1, false),
            }
        } else {
            (start + c.len_utf8(), 1, false)
        };

        if units + len > width && fit_end > 0 {
            break;
        }
        units += len;
        fit_end = end;

        if line_break {
            return end;
        }
        if c == ' ' {
            if seen_non_space {
                space_end = Some(end);
            }
        } else {
            seen_non_space = true;
        }
    }

    if fit_end == s.len() {
        return fit_end;
    }
    space_end.unwrap_or(fit_end)
}
