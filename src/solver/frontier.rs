use std::collections::HashSet;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Instant;

use log::{debug, trace};

use crate::expression::{Expression, ExpressionError, Operator};
use crate::solver::config::OverflowPolicy;
use crate::solver::constants::DEADLINE_CHECK_INTERVAL;
use crate::solver::outcome::SearchStatistics;

/// A freshly computed combination, before any node is allocated for it
pub(crate) struct Candidate<'a> {
    pub operator: Operator,
    pub left: &'a Rc<Expression>,
    pub right: &'a Rc<Expression>,
    pub value: i64,
}

impl Candidate<'_> {
    pub fn build(&self) -> Expression {
        Expression::from_parts(
            self.operator,
            Rc::clone(self.left),
            Rc::clone(self.right),
            self.value,
        )
    }
}

/// How a call to [`Frontier::expand`] ended
pub(crate) enum Expansion<B> {
    /// Every combination of the new length was tried
    Completed,
    /// The visitor asked to stop
    Stopped(B),
    TimedOut,
    Overflow {
        operator: Operator,
        left: i64,
        right: i64,
    },
}

/// Surviving expressions grouped by token length, plus the values already seen.
///
/// `buckets[n]` holds the expressions of length `n + 1`. Leaves are never
/// entered into `seen`, so a combined expression may repeat a leaf value.
pub(crate) struct Frontier {
    buckets: Vec<Vec<Rc<Expression>>>,
    seen: HashSet<i64>,
    operators: Vec<Operator>,
}

impl Frontier {
    pub fn new(operands: &[i64], operators: Vec<Operator>) -> Self {
        let leaves = operands
            .iter()
            .map(|&value| Rc::new(Expression::leaf(value)))
            .collect();

        Self {
            buckets: vec![leaves],
            seen: HashSet::new(),
            operators,
        }
    }

    pub fn leaves(&self) -> &[Rc<Expression>] {
        self.buckets.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Token length the next call to [`Frontier::expand`] builds
    pub fn next_length(&self) -> usize {
        self.buckets.len() + 1
    }

    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// True when no split of the next length can draw from two non-empty
    /// buckets. Every later length is then empty as well.
    pub fn is_exhausted(&self) -> bool {
        let longest = self
            .buckets
            .iter()
            .rposition(|bucket| !bucket.is_empty())
            .map_or(0, |index| index + 1);
        self.next_length() > 2 * longest
    }

    /// Build every combination of the next token length.
    ///
    /// Pairs are visited by left length ascending, then left index, then
    /// right index, then operator order. Each successful combination goes to
    /// `visit` first; if it continues, the combination is kept when its value
    /// is positive and new.
    pub fn expand<B, F>(
        &mut self,
        deadline: Option<Instant>,
        overflow: OverflowPolicy,
        stats: &mut SearchStatistics,
        mut visit: F,
    ) -> Expansion<B>
    where
        F: FnMut(&Candidate<'_>) -> ControlFlow<B>,
    {
        let length = self.next_length();
        let mut retained = Vec::new();

        for left_length in 1..length {
            let right_length = length - left_length;
            let lefts = self
                .buckets
                .get(left_length - 1)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let rights = self
                .buckets
                .get(right_length - 1)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            for left in lefts {
                for right in rights {
                    for &operator in &self.operators {
                        stats.candidates_evaluated += 1;
                        if stats.candidates_evaluated % DEADLINE_CHECK_INTERVAL == 0
                            && deadline.is_some_and(|d| Instant::now() >= d)
                        {
                            debug!("Time budget ran out while building length {}", length);
                            return Expansion::TimedOut;
                        }

                        let value = match operator.apply(left.value(), right.value()) {
                            Ok(value) => value,
                            Err(ExpressionError::Overflow { .. })
                                if overflow == OverflowPolicy::Abort =>
                            {
                                return Expansion::Overflow {
                                    operator,
                                    left: left.value(),
                                    right: right.value(),
                                };
                            }
                            Err(e) => {
                                trace!(
                                    "Skipping {} {} {}: {}",
                                    left.value(),
                                    operator,
                                    right.value(),
                                    e
                                );
                                match e {
                                    ExpressionError::DivisionByZero => {
                                        stats.division_by_zero_skipped += 1
                                    }
                                    ExpressionError::NegativeExponent { .. } => {
                                        stats.negative_exponent_skipped += 1
                                    }
                                    ExpressionError::Overflow { .. } => {
                                        stats.overflow_skipped += 1
                                    }
                                    _ => {}
                                }
                                continue;
                            }
                        };

                        let candidate = Candidate {
                            operator,
                            left,
                            right,
                            value,
                        };
                        if let ControlFlow::Break(found) = visit(&candidate) {
                            return Expansion::Stopped(found);
                        }

                        if value <= 0 {
                            stats.non_positive_discarded += 1;
                        } else if self.seen.insert(value) {
                            retained.push(Rc::new(candidate.build()));
                        } else {
                            stats.duplicates_discarded += 1;
                        }
                    }
                }
            }
        }

        debug!(
            "Length {}: kept {} new values ({} distinct so far)",
            length,
            retained.len(),
            self.seen.len()
        );
        stats.expressions_retained += retained.len();
        stats.explored_length = length;
        self.buckets.push(retained);
        Expansion::Completed
    }
}
