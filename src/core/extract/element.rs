//! Element selection and attribute access shared by the element extractors, for
//! both JSX elements and HTML template elements.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swc_ecma_ast::{
    JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementName, JSXExpr, JSXObject,
};

use crate::core::content::{ContentOptions, normalize_content};
use crate::core::extract::literal::string_value;
use crate::core::parsers::HtmlElement;
use crate::core::validate::{self, ValidationError, ValidationResult};

/// Comma-separated alternatives of `name`, `[attr]`, `[attr=value]` and
/// `name[attr="value"]` (bracket groups may repeat and must all match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSelector {
    source: String,
    alternatives: Vec<SimpleSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SimpleSelector {
    name: Option<String>,
    conditions: Vec<AttributeCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeCondition {
    name: String,
    value: Option<String>,
}

/// Name and attribute lookup over a markup element.
pub trait MarkupElement {
    fn tag_name(&self) -> Cow<'_, str>;

    /// `None` when the attribute is absent, `Some(None)` when it is present without
    /// a static string value (`<input disabled>`, `title={label}`).
    fn attribute_value(&self, name: &str) -> Option<Option<String>>;
}

impl MarkupElement for JSXElement {
    fn tag_name(&self) -> Cow<'_, str> {
        Cow::Owned(element_name(&self.opening.name))
    }

    fn attribute_value(&self, name: &str) -> Option<Option<String>> {
        attribute(self, name).map(attribute_string)
    }
}

impl MarkupElement for HtmlElement {
    fn tag_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn attribute_value(&self, name: &str) -> Option<Option<String>> {
        self.attribute(name).map(|value| Some(value.to_string()))
    }
}

impl ElementSelector {
    pub fn matches<E: MarkupElement + ?Sized>(&self, element: &E) -> bool {
        let name = element.tag_name();
        self.alternatives.iter().any(|alternative| {
            alternative.name.as_ref().is_none_or(|n| *n == name)
                && alternative.conditions.iter().all(|condition| {
                    match (&condition.value, element.attribute_value(&condition.name)) {
                        (_, None) => false,
                        (None, Some(_)) => true,
                        (Some(expected), Some(value)) => value.as_deref() == Some(expected.as_str()),
                    }
                })
        })
    }
}

impl fmt::Display for ElementSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for ElementSelector {
    type Err = ValidationError;

    fn from_str(selector: &str) -> ValidationResult<Self> {
        validate::non_empty_argument("selector", selector)?;

        let invalid = |reason: &str| ValidationError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        };

        let alternatives = selector
            .split(',')
            .map(|part| parse_simple(part.trim()).map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: selector.to_string(),
            alternatives,
        })
    }
}

impl<'de> Deserialize<'de> for ElementSelector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let selector = String::deserialize(deserializer)?;
        selector.parse::<ElementSelector>().map_err(serde::de::Error::custom)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

fn parse_simple(part: &str) -> Result<SimpleSelector, &'static str> {
    if part.is_empty() {
        return Err("empty alternative");
    }

    let name_end = part.find('[').unwrap_or(part.len());
    let name = &part[..name_end];
    if !name.chars().all(is_name_char) {
        return Err("element names may only contain letters, digits, '-', '_', '.' and ':'");
    }

    let mut conditions = Vec::new();
    let mut rest = &part[name_end..];
    while !rest.is_empty() {
        let Some(inner_rest) = rest.strip_prefix('[') else {
            return Err("unexpected characters after ']'");
        };
        let Some(close) = inner_rest.find(']') else {
            return Err("missing ']'");
        };
        conditions.push(parse_condition(&inner_rest[..close])?);
        rest = &inner_rest[close + 1..];
    }

    Ok(SimpleSelector {
        name: (!name.is_empty()).then(|| name.to_string()),
        conditions,
    })
}

fn parse_condition(inner: &str) -> Result<AttributeCondition, &'static str> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => (name.trim(), Some(unquote(value.trim()))),
        None => (inner.trim(), None),
    };
    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err("attribute names must be non-empty and may only contain letters, digits, '-', '_', '.' and ':'");
    }
    Ok(AttributeCondition {
        name: name.to_string(),
        value: value.map(str::to_string),
    })
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
        .unwrap_or(value)
}

/// Attribute names for the optional message parts of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElementAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ElementAttributes {
    pub fn validate(&self) -> ValidationResult {
        let named = [
            ("options.attributes.textPlural", &self.text_plural),
            ("options.attributes.context", &self.context),
            ("options.attributes.comment", &self.comment),
        ];
        for (property, name) in named {
            if let Some(name) = name {
                validate::non_empty_property(property, name)?;
            }
        }
        Ok(())
    }

    /// Plural, context and comment of `element`; empty values count as absent.
    pub fn read<E: MarkupElement + ?Sized>(
        &self,
        element: &E,
        content: &ContentOptions,
    ) -> (Option<String>, Option<String>, Option<String>) {
        let read = |name: &Option<String>| {
            name.as_deref()
                .and_then(|name| normalized_attribute(element, name, content))
                .filter(|value| !value.is_empty())
        };
        (read(&self.text_plural), read(&self.context), read(&self.comment))
    }
}

/// Tag name as written: `div`, `Trans`, `Foo.Bar`, `svg:path`.
pub fn element_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => jsx_member_name(member),
        JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

fn jsx_member_name(member: &swc_ecma_ast::JSXMemberExpr) -> String {
    let object_name = match &member.obj {
        JSXObject::Ident(ident) => ident.sym.to_string(),
        JSXObject::JSXMemberExpr(nested) => jsx_member_name(nested),
    };
    format!("{}.{}", object_name, member.prop.sym)
}

fn attribute_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

/// The attribute's value slot: `Some(None)` for a bare attribute like `<input disabled>`.
fn attribute<'a>(element: &'a JSXElement, name: &str) -> Option<Option<&'a JSXAttrValue>> {
    element.opening.attrs.iter().find_map(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) if attribute_name(&attr.name) == name => {
            Some(attr.value.as_ref())
        }
        _ => None,
    })
}

/// Static string of an attribute value: `a="x"` or `a={'x'}`.
fn attribute_string(value: Option<&JSXAttrValue>) -> Option<String> {
    match value? {
        JSXAttrValue::Str(s) => s.value.as_str().map(str::to_string),
        JSXAttrValue::JSXExprContainer(container) => match &container.expr {
            JSXExpr::Expr(expr) => string_value(expr),
            JSXExpr::JSXEmptyExpr(_) => None,
        },
        _ => None,
    }
}

pub fn normalized_attribute<E: MarkupElement + ?Sized>(
    element: &E,
    name: &str,
    content: &ContentOptions,
) -> Option<String> {
    element
        .attribute_value(name)
        .flatten()
        .map(|value| normalize_content(&value, content))
}

/// Decode the entities a markup serializer escapes in text content.
pub fn decode_entities(content: &str) -> String {
    let mut decoded = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let (replacement, len) = if rest.starts_with("&amp;") {
            ('&', 5)
        } else if rest.starts_with("&lt;") {
            ('<', 4)
        } else if rest.starts_with("&gt;") {
            ('>', 4)
        } else {
            ('&', 1)
        };
        decoded.push(replacement);
        rest = &rest[len..];
    }
    decoded.push_str(rest);
    decoded
}
