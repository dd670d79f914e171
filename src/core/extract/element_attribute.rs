//! Text taken from an attribute of matching JSX or HTML elements:
//! `<Translate text="Foo" plural="Foos" context="menu" />`.

use serde::{Deserialize, Serialize};
use swc_common::BytePos;
use swc_ecma_ast::JSXElement;

use crate::core::catalog::Message;
use crate::core::content::{ContentOptions, ContentOverrides};
use crate::core::extract::element::{
    ElementAttributes, ElementSelector, MarkupElement, normalized_attribute,
};
use crate::core::extract::{Extract, HtmlExtract};
use crate::core::parsers::{HtmlElement, ParsedSource};
use crate::core::validate::{self, ValidationResult};
use crate::error::Result;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElementOptions {
    #[serde(default)]
    pub attributes: ElementAttributes,
    #[serde(default)]
    pub content: ContentOverrides,
}

#[derive(Debug, Clone)]
pub struct ElementAttributeExtractor {
    selector: ElementSelector,
    text_attribute: String,
    attributes: ElementAttributes,
    content: ContentOptions,
}

impl ElementAttributeExtractor {
    pub fn new(
        selector: &str,
        text_attribute: &str,
        options: ElementOptions,
    ) -> ValidationResult<Self> {
        let selector: ElementSelector = selector.parse()?;
        validate::non_empty_argument("textAttribute", text_attribute)?;
        options.attributes.validate()?;

        Ok(Self {
            selector,
            text_attribute: text_attribute.to_string(),
            attributes: options.attributes,
            content: options.content.apply(ContentOptions::markup_defaults()),
        })
    }

    fn message<E: MarkupElement + ?Sized>(&self, element: &E) -> Option<Message> {
        if !self.selector.matches(element) {
            return None;
        }
        let text = normalized_attribute(element, &self.text_attribute, &self.content)?;
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

impl Extract for ElementAttributeExtractor {
    fn extract_element(
        &self,
        element: &JSXElement,
        _source: &ParsedSource,
        add_message: &mut dyn FnMut(Message, BytePos),
    ) -> Result<()> {
        if let Some(message) = self.message(element) {
            add_message(message, element.span.lo);
        }
        Ok(())
    }
}

impl HtmlExtract for ElementAttributeExtractor {
    fn extract_html_element(
        &self,
        element: &HtmlElement,
        _file_name: &str,
        add_message: &mut dyn FnMut(Message, usize),
    ) -> Result<()> {
        if let Some(message) = self.message(element) {
            add_message(message, element.line);
        }
        Ok(())
    }
}
