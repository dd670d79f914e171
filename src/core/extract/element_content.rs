//! Text taken from the children of matching JSX or HTML elements:
//! `<Translate context="menu">Open <b>file</b></Translate>`.

use swc_common::BytePos;
use swc_ecma_ast::JSXElement;

use crate::core::catalog::Message;
use crate::core::content::{ContentOptions, normalize_content};
use crate::core::extract::element::{
    ElementAttributes, ElementSelector, MarkupElement, decode_entities,
};
use crate::core::extract::element_attribute::ElementOptions;
use crate::core::extract::{Extract, HtmlExtract};
use crate::core::parsers::{HtmlElement, ParsedSource};
use crate::core::validate::ValidationResult;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ElementContentExtractor {
    selector: ElementSelector,
    attributes: ElementAttributes,
    content: ContentOptions,
}

impl ElementContentExtractor {
    pub fn new(selector: &str, options: ElementOptions) -> ValidationResult<Self> {
        let selector: ElementSelector = selector.parse()?;
        options.attributes.validate()?;

        Ok(Self {
            selector,
            attributes: options.attributes,
            content: options.content.apply(ContentOptions::markup_defaults()),
        })
    }

    /// Children exactly as written in the source.
    fn inner_source<'a>(element: &JSXElement, source: &'a ParsedSource) -> Option<&'a str> {
        let closing = element.closing.as_ref()?;
        source.text_between(element.opening.span.hi, closing.span.lo)
    }

    fn message<E: MarkupElement + ?Sized>(&self, element: &E, inner: &str) -> Option<Message> {
        let text = normalize_content(&decode_entities(inner), &self.content);
        if text.is_empty() {
            return None;
        }
        let (text_plural, context, comment) = self.attributes.read(element, &self.content);
        Some(Message {
            text,
            text_plural,
            context,
            comments: comment.into_iter().collect(),
            ..Default::default()
        })
    }
}

impl Extract for ElementContentExtractor {
    fn extract_element(
        &self,
        element: &JSXElement,
        source: &ParsedSource,
        add_message: &mut dyn FnMut(Message, BytePos),
    ) -> Result<()> {
        if !self.selector.matches(element) {
            return Ok(());
        }
        let Some(inner) = Self::inner_source(element, source) else {
            return Ok(());
        };
        if let Some(message) = self.message(element, inner) {
            add_message(message, element.span.lo);
        }
        Ok(())
    }
}

impl HtmlExtract for ElementContentExtractor {
    fn extract_html_element(
        &self,
        element: &HtmlElement,
        _file_name: &str,
        add_message: &mut dyn FnMut(Message, usize),
    ) -> Result<()> {
        if !self.selector.matches(element) {
            return Ok(());
        }
        if let Some(message) = self.message(element, &element.inner_html()) {
            add_message(message, element.line);
        }
        Ok(())
    }
}
