use swc_ecma_ast::{BinaryOp, Expr, Lit};

/// Static string value of an expression.
///
/// Accepts string literals, templates without substitutions, and `+`
/// concatenations of those, any of which may be parenthesized.
pub fn string_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(str::to_string)),
        Expr::Paren(paren) => string_value(&paren.expr),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let mut value = string_value(&bin.left)?;
            value.push_str(&string_value(&bin.right)?);
            Some(value)
        }
        _ => None,
    }
}
