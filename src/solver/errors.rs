use thiserror::Error;

use crate::expression::ExpressionError;
use crate::solver::outcome::StopReason;
use crate::utils::UtilsError;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Expression evaluation error: {0}")]
    ExpressionError(#[from] ExpressionError),
    #[error("Utils error: {0}")]
    UtilsError(#[from] UtilsError),
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),
    #[error("No expression for {target} found up to length {explored_length}: {reason}")]
    Unreachable {
        target: i64,
        reason: StopReason,
        explored_length: usize,
    },
}
