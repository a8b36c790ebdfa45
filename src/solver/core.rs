use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::time::Instant;

use log::{debug, info, warn};

use crate::expression::{Expression, ExpressionError, Operator};
use crate::solver::config::SolverConfig;
use crate::solver::errors::SolverError;
use crate::solver::frontier::{Expansion, Frontier};
use crate::solver::outcome::{
    SearchOutcome, SearchReport, SearchStatistics, StopReason, TableReport,
};
use crate::utils::{dedup_operators, validate_operands, validate_range};

/// Breadth-first search for the shortest expression reaching a target value
pub struct ExpressionSolver {
    config: SolverConfig,
}

impl ExpressionSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the solver configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find an expression of minimum token length that evaluates to `target`.
    ///
    /// Expressions are built length by length from the surviving expressions
    /// of shorter lengths. A combination is kept for later lengths only if
    /// its value is positive and was never produced before, so the first
    /// match is a shortest one among the expressions this pruning allows.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the operand pool
    /// is empty. Running out of length or time is reported through
    /// [`SearchOutcome::Unreachable`], not as an error.
    pub fn search(
        &self,
        target: i64,
        operands: &[i64],
        operators: &[Operator],
    ) -> Result<SearchReport, SolverError> {
        self.config.validate()?;
        validate_operands(operands)?;
        let operators = dedup_operators(operators);

        info!(
            "Searching for {} using {} operands and operators [{}]",
            target,
            operands.len(),
            join_symbols(&operators)
        );

        let started = Instant::now();
        let deadline = self
            .config
            .time_budget
            .and_then(|budget| started.checked_add(budget));
        let mut stats = SearchStatistics {
            explored_length: 1,
            ..SearchStatistics::default()
        };
        let mut frontier = Frontier::new(operands, operators);

        let leaf_match = frontier
            .leaves()
            .iter()
            .find(|leaf| leaf.value() == target)
            .map(|leaf| Expression::clone(leaf));

        let outcome = if let Some(leaf) = leaf_match {
            SearchOutcome::Found(leaf)
        } else {
            loop {
                let length = frontier.next_length();
                if let Some(reason) = self.stop_reason(&frontier, deadline) {
                    break SearchOutcome::Unreachable {
                        reason,
                        explored_length: length - 1,
                    };
                }

                let expansion =
                    frontier.expand(deadline, self.config.overflow, &mut stats, |candidate| {
                        if candidate.value == target {
                            ControlFlow::Break(candidate.build())
                        } else {
                            ControlFlow::Continue(())
                        }
                    });

                match expansion {
                    Expansion::Completed => {}
                    Expansion::Stopped(expr) => break SearchOutcome::Found(expr),
                    Expansion::TimedOut => {
                        break SearchOutcome::Unreachable {
                            reason: StopReason::TimeBudget,
                            explored_length: length - 1,
                        };
                    }
                    Expansion::Overflow {
                        operator,
                        left,
                        right,
                    } => {
                        warn!(
                            "Aborting search at length {}: {} {} {} overflows",
                            length, left, operator, right
                        );
                        break SearchOutcome::Overflow {
                            length,
                            operator,
                            left,
                            right,
                        };
                    }
                }
            }
        };

        stats.bucket_sizes = frontier.bucket_sizes();
        stats.elapsed = started.elapsed();

        match &outcome {
            SearchOutcome::Found(expr) => info!(
                "Found {} = {} with {} operands after {} candidates",
                target,
                expr,
                expr.length(),
                stats.candidates_evaluated
            ),
            SearchOutcome::Unreachable {
                reason,
                explored_length,
            } => info!(
                "No expression for {} up to length {}: {}",
                target, explored_length, reason
            ),
            SearchOutcome::Overflow { .. } => {}
        }

        Ok(SearchReport {
            target,
            outcome,
            statistics: stats,
        })
    }

    /// Find the shortest expression for every value in `lower..=upper`.
    ///
    /// Runs the same length-ordered search as [`ExpressionSolver::search`] and
    /// keeps the first expression produced for each value of the range,
    /// leaves included. Stops once the range is covered or the configured
    /// limits are hit; the report then holds whatever was found.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid input, or when a combination overflows
    /// under [`OverflowPolicy::Abort`](crate::solver::OverflowPolicy::Abort).
    pub fn table(
        &self,
        lower: i64,
        upper: i64,
        operands: &[i64],
        operators: &[Operator],
    ) -> Result<TableReport, SolverError> {
        self.config.validate()?;
        validate_operands(operands)?;
        validate_range(lower, upper)?;
        let operators = dedup_operators(operators);

        let wanted =
            usize::try_from(i128::from(upper) - i128::from(lower) + 1).unwrap_or(usize::MAX);
        info!(
            "Building table for {}..={} ({} values) with operators [{}]",
            lower,
            upper,
            wanted,
            join_symbols(&operators)
        );

        let started = Instant::now();
        let deadline = self
            .config
            .time_budget
            .and_then(|budget| started.checked_add(budget));
        let mut stats = SearchStatistics {
            explored_length: 1,
            ..SearchStatistics::default()
        };
        let mut frontier = Frontier::new(operands, operators);
        let mut entries = BTreeMap::new();

        for leaf in frontier.leaves() {
            if (lower..=upper).contains(&leaf.value()) {
                entries
                    .entry(leaf.value())
                    .or_insert_with(|| Expression::clone(leaf));
            }
        }

        let stopped = loop {
            if entries.len() >= wanted {
                break None;
            }
            if let Some(reason) = self.stop_reason(&frontier, deadline) {
                break Some(reason);
            }

            let expansion =
                frontier.expand(deadline, self.config.overflow, &mut stats, |candidate| {
                    if (lower..=upper).contains(&candidate.value)
                        && !entries.contains_key(&candidate.value)
                    {
                        entries.insert(candidate.value, candidate.build());
                        if entries.len() >= wanted {
                            return ControlFlow::Break(());
                        }
                    }
                    ControlFlow::Continue(())
                });

            match expansion {
                Expansion::Completed => debug!(
                    "Table covers {} of {} values after length {}",
                    entries.len(),
                    wanted,
                    stats.explored_length
                ),
                Expansion::Stopped(()) => break None,
                Expansion::TimedOut => break Some(StopReason::TimeBudget),
                Expansion::Overflow {
                    operator,
                    left,
                    right,
                } => {
                    return Err(ExpressionError::Overflow {
                        operator,
                        left,
                        right,
                    }
                    .into());
                }
            }
        };

        stats.bucket_sizes = frontier.bucket_sizes();
        stats.elapsed = started.elapsed();
        info!(
            "Table for {}..={} has {} entries",
            lower,
            upper,
            entries.len()
        );

        Ok(TableReport {
            lower,
            upper,
            entries,
            stopped,
            statistics: stats,
        })
    }

    /// Check the termination policy before building the next length
    fn stop_reason(&self, frontier: &Frontier, deadline: Option<Instant>) -> Option<StopReason> {
        if frontier.is_exhausted() {
            return Some(StopReason::Exhausted);
        }
        if self
            .config
            .max_length
            .is_some_and(|max| frontier.next_length() > max)
        {
            return Some(StopReason::LengthLimit);
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(StopReason::TimeBudget);
        }
        None
    }
}

impl Default for ExpressionSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

fn join_symbols(operators: &[Operator]) -> String {
    operators
        .iter()
        .map(|op| op.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}
