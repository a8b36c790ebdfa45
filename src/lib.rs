//! shortest-expr - A library for finding the shortest arithmetic expression for an integer
//!
//! Given a pool of operand values and a pool of binary operators, the solver
//! builds expressions length by length and returns one with the fewest
//! operands that evaluates to the target. Expressions render back to infix
//! text with the operator symbols `+ - * // % **`.

pub mod expression;
pub mod solver;
pub mod utils;

// Re-export the main public API
pub use expression::{Expression, ExpressionError, Operator, RenderStyle};
pub use solver::{
    ExpressionSolver, OverflowPolicy, SearchOutcome, SearchReport, SearchStatistics,
    SolverConfig, SolverError, StopReason, TableReport,
};
pub use utils::{UtilsError, parse_number_list, parse_operator_list};

/// Find a shortest expression for `target` with the default solver configuration
///
/// # Arguments
///
/// * `target` - The value the expression must evaluate to
/// * `operands` - Values usable as operands, each any number of times
/// * `operators` - Usable operators; their order breaks ties between equally short expressions
///
/// # Returns
///
/// * `Ok(Some(Expression))` - If a matching expression is found
/// * `Ok(None)` - If the search stopped without a match
/// * `Err(SolverError)` - If the input is invalid or an overflow aborted the search
///
/// # Errors
///
/// This function will return an error if:
/// * The operand pool is empty
/// * A combination overflowed while the solver was set to abort on overflow
///
/// # Examples
///
/// ```
/// use shortest_expr::{Operator, find_expression};
///
/// match find_expression(3, &[1, 2], &[Operator::Add]) {
///     Ok(Some(expr)) => println!("Found: {}", expr),
///     Ok(None) => println!("No solution found"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn find_expression(
    target: i64,
    operands: &[i64],
    operators: &[Operator],
) -> Result<Option<Expression>, SolverError> {
    let report = ExpressionSolver::default().search(target, operands, operators)?;
    match report.into_expression() {
        Ok(expr) => Ok(Some(expr)),
        Err(SolverError::Unreachable { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Render a shortest expression for `target` as infix text
///
/// # Errors
///
/// Returns an error for invalid input, or [`SolverError::Unreachable`] when
/// the default length limit is reached without a match.
///
/// # Examples
///
/// ```
/// use shortest_expr::{Operator, shortest_expression};
///
/// let text = shortest_expression(3, &[1, 2], &[Operator::Add]);
/// assert_eq!(text.ok().as_deref(), Some("1 + 2"));
/// ```
pub fn shortest_expression(
    target: i64,
    operands: &[i64],
    operators: &[Operator],
) -> Result<String, SolverError> {
    let report = ExpressionSolver::default().search(target, operands, operators)?;
    Ok(report.into_expression()?.to_string())
}
