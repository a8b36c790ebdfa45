use std::rc::Rc;

use crate::expression::errors::ExpressionError;
use crate::expression::operator::Operator;

/// An arithmetic expression over integer operands.
///
/// Every node caches its value and token length. Children are shared through
/// `Rc`, so one sub-expression can be the building block of many longer ones.
#[derive(Debug, Clone)]
pub struct Expression {
    value: i64,
    length: usize,
    node: Node,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf,
    Binary {
        operator: Operator,
        left: Rc<Expression>,
        right: Rc<Expression>,
    },
}

impl Expression {
    pub fn leaf(value: i64) -> Self {
        Self {
            value,
            length: 1,
            node: Node::Leaf,
        }
    }

    /// Combine two sub-expressions, computing the new value.
    ///
    /// # Errors
    ///
    /// Propagates the arithmetic error from [`Operator::apply`].
    pub fn combine(
        operator: Operator,
        left: Rc<Expression>,
        right: Rc<Expression>,
    ) -> Result<Self, ExpressionError> {
        let value = operator.apply(left.value, right.value)?;
        Ok(Self::from_parts(operator, left, right, value))
    }

    /// Build a node whose value has already been computed by the caller
    pub(crate) fn from_parts(
        operator: Operator,
        left: Rc<Expression>,
        right: Rc<Expression>,
        value: i64,
    ) -> Self {
        Self {
            value,
            length: left.length + right.length,
            node: Node::Binary {
                operator,
                left,
                right,
            },
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Number of operand tokens in the expression
    pub fn length(&self) -> usize {
        self.length
    }

    /// `None` for a leaf
    pub fn operator(&self) -> Option<Operator> {
        match &self.node {
            Node::Leaf => None,
            Node::Binary { operator, .. } => Some(*operator),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf)
    }

    pub fn children(&self) -> Option<(&Expression, &Expression)> {
        match &self.node {
            Node::Leaf => None,
            Node::Binary { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// Operand values in left-to-right order
    pub fn operands(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.length);
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr.children() {
                None => out.push(expr.value),
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }
}
