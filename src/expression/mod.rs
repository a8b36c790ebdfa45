//! Expression trees, their operators, rendering and parsing

mod ast;
mod display;
mod errors;
mod eval;
mod operator;
mod parse;

pub use ast::Expression;
pub use display::{RenderStyle, Rendered};
pub use errors::ExpressionError;
pub use operator::{Associativity, Operator};

#[cfg(test)]
mod tests;
