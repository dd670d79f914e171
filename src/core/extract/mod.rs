//! Extraction adapters.
//!
//! An extractor inspects one AST node at a time and reports candidate messages
//! through the add-message callback together with the position they were found at.
//! The drivers ([`crate::core::parser`]) walk each file once: program sources offer
//! every call expression and JSX element to every [`Extractor`], templates offer
//! every HTML element to every [`HtmlExtractor`].
//!
//! - `call_expression`: `t('Foo')`-style calls in program source
//! - `element_attribute`: text from an attribute of matching elements
//! - `element_content`: text from the children of matching elements
//! - `embedded_js`: program source inside template elements like `<script>`
//! - `comments`: developer comments around calls
//! - `element`: selector and attribute helpers
//! - `literal`: static string values

pub mod call_expression;
pub mod comments;
pub mod element;
pub mod element_attribute;
pub mod element_content;
pub mod embedded_js;
pub mod literal;

use enum_dispatch::enum_dispatch;
use swc_common::BytePos;
use swc_ecma_ast::{CallExpr, JSXElement};

use crate::core::catalog::Message;
use crate::core::parsers::{HtmlElement, ParsedSource};
use crate::error::Result;

pub use call_expression::{ArgumentMapping, CallExpressionExtractor, CallExpressionOptions};
pub use comments::CommentOptions;
pub use element::{ElementAttributes, ElementSelector, MarkupElement};
pub use element_attribute::{ElementAttributeExtractor, ElementOptions};
pub use element_content::ElementContentExtractor;
pub use embedded_js::EmbeddedJsExtractor;

/// A node inspector that may report messages.
///
/// Both hooks default to doing nothing; an error aborts the current file.
#[enum_dispatch]
pub trait Extract {
    fn extract_call(
        &self,
        _call: &CallExpr,
        _source: &ParsedSource,
        _add_message: &mut dyn FnMut(Message, BytePos),
    ) -> Result<()> {
        Ok(())
    }

    fn extract_element(
        &self,
        _element: &JSXElement,
        _source: &ParsedSource,
        _add_message: &mut dyn FnMut(Message, BytePos),
    ) -> Result<()> {
        Ok(())
    }
}

/// The registered extractor variants.
#[enum_dispatch(Extract)]
#[derive(Debug, Clone)]
pub enum Extractor {
    CallExpression(CallExpressionExtractor),
    ElementAttribute(ElementAttributeExtractor),
    ElementContent(ElementContentExtractor),
}

/// A template element inspector. `add_message` takes the 1-based line in the
/// template the message was found on.
#[enum_dispatch]
pub trait HtmlExtract {
    fn extract_html_element(
        &self,
        element: &HtmlElement,
        file_name: &str,
        add_message: &mut dyn FnMut(Message, usize),
    ) -> Result<()>;
}

/// The extractor variants for HTML templates.
#[enum_dispatch(HtmlExtract)]
#[derive(Debug, Clone)]
pub enum HtmlExtractor {
    ElementAttribute(ElementAttributeExtractor),
    ElementContent(ElementContentExtractor),
    EmbeddedJs(EmbeddedJsExtractor),
}
