//! HTML template parsing via the html5ever tokenizer.
//!
//! Templates are frequently fragments (`<translate>` tags, partials without `<html>`),
//! so instead of running the full tree construction algorithm the token stream is
//! folded into a plain element tree: start tags open elements, end tags close the
//! nearest open element of the same name, and unmatched end tags are dropped.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element(HtmlElement),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlElement {
    /// Lowercase tag name.
    pub name: String,
    /// Attributes in source order, entity-decoded.
    pub attributes: Vec<(String, String)>,
    /// 1-based line on which the start tag ends, i.e. where the content begins.
    pub line: usize,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text children, for raw text elements like `<script>`.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                HtmlNode::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Children serialized back to markup. Text is escaped the way an HTML
    /// serializer escapes it, except inside raw text elements.
    pub fn inner_html(&self) -> String {
        let mut html = String::new();
        for child in &self.children {
            serialize_node(child, is_raw_text(&self.name), &mut html);
        }
        html
    }

    /// Every element below this one, depth first in document order.
    pub fn descendants(&self) -> Vec<&HtmlElement> {
        let mut found = Vec::new();
        collect_descendants(self, &mut found);
        found
    }
}

fn collect_descendants<'a>(element: &'a HtmlElement, found: &mut Vec<&'a HtmlElement>) {
    for child in &element.children {
        if let HtmlNode::Element(child) = child {
            found.push(child);
            collect_descendants(child, found);
        }
    }
}

fn is_raw_text(name: &str) -> bool {
    matches!(name, "script" | "style")
}

fn serialize_node(node: &HtmlNode, raw_text: bool, html: &mut String) {
    match node {
        HtmlNode::Text(text) if raw_text => html.push_str(text),
        HtmlNode::Text(text) => escape_into(text, false, html),
        HtmlNode::Comment(comment) => {
            html.push_str("<!--");
            html.push_str(comment);
            html.push_str("-->");
        }
        HtmlNode::Element(element) => {
            html.push('<');
            html.push_str(&element.name);
            for (name, value) in &element.attributes {
                html.push(' ');
                html.push_str(name);
                html.push_str("=\"");
                escape_into(value, true, html);
                html.push('"');
            }
            html.push('>');
            if VOID_ELEMENTS.contains(&element.name.as_str()) {
                return;
            }
            html.push_str(&element.inner_html());
            html.push_str("</");
            html.push_str(&element.name);
            html.push('>');
        }
    }
}

fn escape_into(text: &str, attribute_mode: bool, html: &mut String) {
    for c in text.chars() {
        match c {
            '&' => html.push_str("&amp;"),
            '\u{a0}' => html.push_str("&nbsp;"),
            '"' if attribute_mode => html.push_str("&quot;"),
            '<' if !attribute_mode => html.push_str("&lt;"),
            '>' if !attribute_mode => html.push_str("&gt;"),
            c => html.push(c),
        }
    }
}

/// A parsed template. The root is a nameless element holding the top-level nodes.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    pub root: HtmlElement,
}

impl HtmlDocument {
    /// Every element of the document in document order.
    pub fn elements(&self) -> Vec<&HtmlElement> {
        self.root.descendants()
    }
}

/// Parse an HTML document or fragment. Malformed markup never fails; the
/// tokenizer recovers the way browsers do.
pub fn parse_html(source: &str) -> HtmlDocument {
    let builder = TreeBuilder::default();
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(source));

    let tokenizer = Tokenizer::new(&builder, TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    drop(tokenizer);

    HtmlDocument {
        root: builder.finish(),
    }
}

/// Folds tokens into an element tree. `open[0]` is the document root.
struct TreeBuilder {
    open: RefCell<Vec<HtmlElement>>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            open: RefCell::new(vec![HtmlElement::default()]),
        }
    }
}

impl TreeBuilder {
    fn finish(self) -> HtmlElement {
        let mut open = self.open.into_inner();
        close_down_to(&mut open, 1);
        open.pop().unwrap_or_default()
    }

    fn start_tag(&self, tag: Tag, line: usize) -> TokenSinkResult<()> {
        let element = HtmlElement {
            name: tag.name.to_string(),
            attributes: tag
                .attrs
                .iter()
                .map(|attr| (attr.name.local.to_string(), String::from(&*attr.value)))
                .collect(),
            line,
            children: Vec::new(),
        };

        let mut open = self.open.borrow_mut();
        if tag.self_closing || VOID_ELEMENTS.contains(&element.name.as_str()) {
            append(&mut open, HtmlNode::Element(element));
            return TokenSinkResult::Continue;
        }

        let raw_kind = match element.name.as_str() {
            "script" => Some(RawKind::ScriptData),
            "style" => Some(RawKind::Rawtext),
            "textarea" | "title" => Some(RawKind::Rcdata),
            _ => None,
        };
        open.push(element);
        match raw_kind {
            Some(kind) => TokenSinkResult::RawData(kind),
            None => TokenSinkResult::Continue,
        }
    }

    fn end_tag(&self, tag: Tag) {
        let mut open = self.open.borrow_mut();
        let name = tag.name.to_string();
        if let Some(depth) = open.iter().skip(1).rposition(|element| element.name == name) {
            close_down_to(&mut open, depth + 1);
        }
    }

    fn text(&self, text: &str) {
        let mut open = self.open.borrow_mut();
        if let Some(current) = open.last_mut() {
            match current.children.last_mut() {
                Some(HtmlNode::Text(existing)) => existing.push_str(text),
                _ => current.children.push(HtmlNode::Text(text.to_string())),
            }
        }
    }
}

/// Close open elements until only `keep` remain, attaching each to its parent.
fn close_down_to(open: &mut Vec<HtmlElement>, keep: usize) {
    while open.len() > keep.max(1) {
        if let Some(element) = open.pop() {
            append(open, HtmlNode::Element(element));
        }
    }
}

fn append(open: &mut [HtmlElement], node: HtmlNode) {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
    }
}

impl TokenSink for &TreeBuilder {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        let line = usize::try_from(line_number).unwrap_or(usize::MAX);
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.start_tag(tag, line),
                TagKind::EndTag => self.end_tag(tag),
            },
            Token::CharacterTokens(text) => self.text(&text),
            Token::NullCharacterToken => self.text("\u{fffd}"),
            Token::CommentToken(comment) => {
                let mut open = self.open.borrow_mut();
                append(&mut open, HtmlNode::Comment(comment.to_string()));
            }
            Token::ParseError(error) => {
                tracing::trace!(line, error = %error, "recoverable HTML parse error");
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(document: &HtmlDocument) -> Vec<(&str, usize)> {
        document
            .elements()
            .into_iter()
            .map(|element| (element.name.as_str(), element.line))
            .collect()
    }

    #[test]
    fn test_element_tree_and_lines() {
        let document = parse_html(
            "<div id=\"app\">\n  <p class=\"a\">Hello <b>world</b></p>\n  <br>\n  <translate\n    text=\"Foo\"/>\n</div>",
        );
        assert_eq!(
            names(&document),
            vec![("div", 1), ("p", 2), ("b", 2), ("br", 3), ("translate", 5)]
        );
        let paragraph = document.elements()[1];
        assert_eq!(paragraph.attribute("class"), Some("a"));
        assert_eq!(paragraph.inner_html(), "Hello <b>world</b>");
    }

    #[test]
    fn test_fragments_and_unmatched_end_tags() {
        let document = parse_html("<span>a</i>b</span><em>c");
        let elements = document.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].inner_html(), "ab");
        assert_eq!(elements[1].inner_html(), "c");
    }

    #[test]
    fn test_entities_are_decoded_and_reescaped() {
        let document = parse_html("<p title=\"Tom &amp; &quot;Jerry&quot;\">a &lt; b&nbsp;c</p>");
        let paragraph = document.elements()[0];
        assert_eq!(paragraph.attribute("title"), Some("Tom & \"Jerry\""));
        assert_eq!(paragraph.text(), "a < b\u{a0}c");
        assert_eq!(paragraph.inner_html(), "a &lt; b&nbsp;c");
    }

    #[test]
    fn test_script_content_is_raw_text() {
        let document = parse_html("<script>\nif (a < b) { _('x </b>'); }\n</script><p>after</p>");
        let elements = document.elements();
        assert_eq!(elements[0].name, "script");
        assert_eq!(elements[0].text(), "\nif (a < b) { _('x </b>'); }\n");
        assert_eq!(elements[0].children.len(), 1);
        assert_eq!(elements[1].name, "p");
        assert_eq!(elements[1].line, 3);
    }

    #[test]
    fn test_comments_are_kept_in_inner_html() {
        let document = parse_html("<div>a<!-- note -->b</div>");
        assert_eq!(document.elements()[0].inner_html(), "a<!-- note -->b");
    }
}
