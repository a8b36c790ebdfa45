use std::fmt;

use crate::expression::ast::Expression;
use crate::expression::operator::{Associativity, Operator};

/// Bracketing rules used when rendering an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Brackets a child only when its operator binds strictly looser than the
    /// parent's, and always brackets both sides of `//`.
    ///
    /// Right-nested `-`, `%` and `//`, left-nested `**` and `%` under `*` come
    /// out without brackets, so the text can read differently from the tree.
    #[default]
    Faithful,
    /// Faithful rules plus whatever brackets are needed for the text to read
    /// back as the same tree under both the declared precedence table and the
    /// conventional one where `*`, `//` and `%` share a level.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn needs_brackets(parent: Operator, child: &Expression, side: Side, style: RenderStyle) -> bool {
    if parent == Operator::Div {
        return true;
    }

    let Some(child_op) = child.operator() else {
        return style == RenderStyle::Strict
            && side == Side::Left
            && parent == Operator::Pow
            && child.value() < 0;
    };

    if child_op.precedence() < parent.precedence() {
        return true;
    }
    if style == RenderStyle::Faithful {
        return false;
    }

    if child_op == Operator::Mod && parent == Operator::Mul {
        return true;
    }
    if child_op.precedence() > parent.precedence() {
        return false;
    }

    match side {
        Side::Left => parent.associativity() == Associativity::Right,
        Side::Right => {
            let regroupable = parent == Operator::Add
                || (parent.is_associative() && child_op == parent)
                || parent.associativity() == Associativity::Right;
            !regroupable
        }
    }
}

fn write_with_parens(
    f: &mut fmt::Formatter,
    expr: &Expression,
    need_parens: bool,
    style: RenderStyle,
) -> fmt::Result {
    if need_parens {
        write!(f, "(")?;
        fmt_expression(f, expr, style)?;
        write!(f, ")")
    } else {
        fmt_expression(f, expr, style)
    }
}

fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression, style: RenderStyle) -> fmt::Result {
    match (expr.operator(), expr.children()) {
        (Some(op), Some((left, right))) => {
            write_with_parens(f, left, needs_brackets(op, left, Side::Left, style), style)?;
            write!(f, " {} ", op.symbol())?;
            write_with_parens(f, right, needs_brackets(op, right, Side::Right, style), style)
        }
        _ => write!(f, "{}", expr.value()),
    }
}

/// Adapter that formats an expression with a chosen [`RenderStyle`]
pub struct Rendered<'a> {
    expr: &'a Expression,
    style: RenderStyle,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expression(f, self.expr, self.style)
    }
}

impl Expression {
    pub fn rendered(&self, style: RenderStyle) -> Rendered<'_> {
        Rendered { expr: self, style }
    }

    pub fn render(&self, style: RenderStyle) -> String {
        self.rendered(style).to_string()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expression(f, self, RenderStyle::Faithful)
    }
}
