//! Call expression matching: `t('Foo')`, `i18n.ngettext('One', 'Many', n)`,
//! `this.translations.get('Foo')`.

use serde::{Deserialize, Serialize};
use swc_common::BytePos;
use swc_ecma_ast::{CallExpr, Callee, Expr, MemberProp};

use crate::core::catalog::Message;
use crate::core::content::{ContentOptions, ContentOverrides, normalize_content};
use crate::core::extract::Extract;
use crate::core::extract::comments::CommentOptions;
use crate::core::extract::literal::string_value;
use crate::core::parsers::ParsedSource;
use crate::core::validate::{self, ValidationResult};
use crate::error::Result;

/// Positions of the message parts in the call's argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArgumentMapping {
    pub text: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_plural: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<usize>,
}

impl ArgumentMapping {
    pub fn text(index: usize) -> Self {
        Self {
            text: index,
            text_plural: None,
            context: None,
        }
    }

    pub fn with_plural(mut self, index: usize) -> Self {
        self.text_plural = Some(index);
        self
    }

    pub fn with_context(mut self, index: usize) -> Self {
        self.context = Some(index);
        self
    }

    fn validate(&self) -> ValidationResult {
        let indices: Vec<usize> = [Some(self.text), self.text_plural, self.context]
            .into_iter()
            .flatten()
            .collect();
        validate::distinct_indices("options.arguments", &indices)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CallExpressionOptions {
    pub arguments: ArgumentMapping,
    #[serde(default)]
    pub comments: CommentOptions,
    #[serde(default)]
    pub content: ContentOverrides,
}

impl CallExpressionOptions {
    pub fn new(arguments: ArgumentMapping) -> Self {
        Self {
            arguments,
            comments: CommentOptions::default(),
            content: ContentOverrides::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallExpressionExtractor {
    callee_names: Vec<String>,
    arguments: ArgumentMapping,
    comments: CommentOptions,
    content: ContentOptions,
}

impl CallExpressionExtractor {
    pub fn new<I, S>(callee_names: I, options: CallExpressionOptions) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let callee_names: Vec<String> = callee_names.into_iter().map(Into::into).collect();
        validate::non_empty_list("calleeName", &callee_names)?;
        for name in &callee_names {
            validate::non_empty_argument("calleeName", name)?;
        }
        options.arguments.validate()?;

        Ok(Self {
            callee_names: callee_names
                .iter()
                .map(|name| name.split('.').map(str::trim).collect::<Vec<_>>().join("."))
                .collect(),
            arguments: options.arguments,
            comments: options.comments,
            content: options.content.apply(ContentOptions::source_defaults()),
        })
    }

    pub fn callee_names(&self) -> &[String] {
        &self.callee_names
    }

    fn matches(&self, call: &CallExpr) -> bool {
        let Callee::Expr(callee) = &call.callee else {
            return false;
        };
        callee_name(callee).is_some_and(|name| self.callee_names.contains(&name))
    }

    fn argument(&self, call: &CallExpr, index: usize) -> Option<String> {
        let arg = call.args.get(index).filter(|arg| arg.spread.is_none())?;
        string_value(&arg.expr).map(|raw| normalize_content(&raw, &self.content))
    }

    fn message_for(&self, call: &CallExpr) -> Option<Message> {
        let text = self.argument(call, self.arguments.text)?;
        let text_plural = match self.arguments.text_plural {
            Some(index) => Some(self.argument(call, index)?),
            None => None,
        };
        let context = self
            .arguments
            .context
            .and_then(|index| self.argument(call, index));

        Some(Message {
            text,
            text_plural,
            context,
            ..Default::default()
        })
    }
}

impl Extract for CallExpressionExtractor {
    fn extract_call(
        &self,
        call: &CallExpr,
        source: &ParsedSource,
        add_message: &mut dyn FnMut(Message, BytePos),
    ) -> Result<()> {
        if !self.matches(call) {
            return Ok(());
        }
        if let Some(mut message) = self.message_for(call) {
            message.comments = self.comments.collect(call.span, source);
            add_message(message, call.span.lo);
        }
        Ok(())
    }
}

/// Dotted name of a callee: `t`, `i18n.gettext`, `this.translations.get`.
fn callee_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Paren(paren) => callee_name(&paren.expr),
        Expr::Member(member) => {
            let property = match &member.prop {
                MemberProp::Ident(ident) => ident.sym.to_string(),
                MemberProp::Computed(computed) => string_value(&computed.expr)?,
                MemberProp::PrivateName(_) => return None,
            };
            Some(format!("{}.{property}", callee_name(&member.obj)?))
        }
        _ => None,
    }
}
