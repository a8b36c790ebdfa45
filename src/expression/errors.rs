use thiserror::Error;

use crate::expression::operator::Operator;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Negative exponent has no integer result: {base} ** {exponent}")]
    NegativeExponent { base: i64, exponent: i64 },
    #[error("Integer overflow evaluating {left} {operator} {right}")]
    Overflow {
        operator: Operator,
        left: i64,
        right: i64,
    },
    #[error("Unknown operator: '{0}'")]
    UnknownOperator(String),
    #[error("Invalid integer literal: '{0}'")]
    InvalidLiteral(String),
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { position: usize, found: char },
    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { position: usize, found: String },
    #[error("Unexpected end of input")]
    UnexpectedEnd,
}
