use std::time::Duration;

use crate::solver::constants::DEFAULT_MAX_LENGTH;
use crate::solver::errors::SolverError;

/// What the search does when a combination overflows `i64`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Drop the combination, as with a zero divisor
    #[default]
    Skip,
    /// Stop the search and report the offending combination
    Abort,
}

/// Configuration for the expression search
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Longest token length explored, `None` for no limit
    pub max_length: Option<usize>,
    /// Wall-clock budget for one search, `None` for no limit
    pub time_budget: Option<Duration>,
    pub overflow: OverflowPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_length: Some(DEFAULT_MAX_LENGTH),
            time_budget: None,
            overflow: OverflowPolicy::Skip,
        }
    }
}

impl SolverConfig {
    /// A configuration without length or time limits.
    ///
    /// A search for an unreachable target only ends if the expression space
    /// runs dry, which for most pools never happens.
    pub fn unbounded() -> Self {
        Self {
            max_length: None,
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Option<Duration>) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_overflow_policy(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// # Errors
    ///
    /// Returns an error if `max_length` is zero.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.max_length == Some(0) {
            return Err(SolverError::InvalidConfig(
                "max_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
