use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::ExpressionError;

impl Expression {
    /// Recompute the value from the leaves, ignoring the cached node values.
    ///
    /// # Errors
    ///
    /// Returns an error when a sub-expression divides by zero, raises to a
    /// negative exponent or overflows `i64`.
    pub fn evaluate(&self) -> Result<i64, ExpressionError> {
        let result = match (self.operator(), self.children()) {
            (Some(operator), Some((left, right))) => {
                let left = left.evaluate()?;
                let right = right.evaluate()?;
                operator.apply(left, right)
            }
            _ => Ok(self.value()),
        };

        match &result {
            Ok(value) => debug!("Expression {} evaluated to: {}", self, value),
            Err(e) => debug!("Expression {} failed to evaluate: {}", self, e),
        }

        result
    }

    /// True when the cached value agrees with a fresh evaluation
    pub fn is_consistent(&self) -> bool {
        self.evaluate() == Ok(self.value())
    }
}
