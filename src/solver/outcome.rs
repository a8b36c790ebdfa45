//! Search outcomes and statistics

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::expression::{Expression, ExpressionError, Operator};
use crate::solver::errors::SolverError;

/// Why a search ended without reaching its goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured maximum token length was fully explored
    LengthLimit,
    /// The configured time budget ran out
    TimeBudget,
    /// No longer expression can ever be built from the surviving ones
    Exhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::LengthLimit => write!(f, "length limit reached"),
            StopReason::TimeBudget => write!(f, "time budget exhausted"),
            StopReason::Exhausted => write!(f, "search space exhausted"),
        }
    }
}

/// Result of a single-target search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Expression),
    Unreachable {
        reason: StopReason,
        explored_length: usize,
    },
    /// A combination overflowed under [`OverflowPolicy::Abort`](crate::solver::OverflowPolicy::Abort)
    Overflow {
        length: usize,
        operator: Operator,
        left: i64,
        right: i64,
    },
}

impl SearchOutcome {
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            SearchOutcome::Found(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Longest token length whose bucket was completed
    pub explored_length: usize,
    /// Number of (pair, operator) combinations computed
    pub candidates_evaluated: u64,
    /// Combined expressions kept as building blocks
    pub expressions_retained: usize,
    pub duplicates_discarded: u64,
    pub non_positive_discarded: u64,
    pub division_by_zero_skipped: u64,
    pub negative_exponent_skipped: u64,
    pub overflow_skipped: u64,
    /// Surviving expressions per token length, starting at length 1
    pub bucket_sizes: Vec<usize>,
    pub elapsed: Duration,
}

/// A search outcome together with its statistics
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub target: i64,
    pub outcome: SearchOutcome,
    pub statistics: SearchStatistics,
}

impl SearchReport {
    /// Turn the outcome into a plain result.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Unreachable`] when the search stopped without a
    /// match, and an overflow error when it was aborted.
    pub fn into_expression(self) -> Result<Expression, SolverError> {
        match self.outcome {
            SearchOutcome::Found(expr) => Ok(expr),
            SearchOutcome::Unreachable {
                reason,
                explored_length,
            } => Err(SolverError::Unreachable {
                target: self.target,
                reason,
                explored_length,
            }),
            SearchOutcome::Overflow {
                operator,
                left,
                right,
                ..
            } => Err(ExpressionError::Overflow {
                operator,
                left,
                right,
            }
            .into()),
        }
    }
}

/// Shortest expressions for every value of a range
#[derive(Debug, Clone)]
pub struct TableReport {
    pub lower: i64,
    pub upper: i64,
    pub entries: BTreeMap<i64, Expression>,
    /// `None` when every value of the range was covered
    pub stopped: Option<StopReason>,
    pub statistics: SearchStatistics,
}

impl TableReport {
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none()
    }

    /// Values of the range that have no entry, capped at `limit` items
    pub fn missing(&self, limit: usize) -> Vec<i64> {
        (self.lower..=self.upper)
            .filter(|value| !self.entries.contains_key(value))
            .take(limit)
            .collect()
    }
}
