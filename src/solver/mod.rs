pub mod config;
pub mod constants;
mod core;
mod errors;
mod frontier;
pub mod outcome;

pub use config::{OverflowPolicy, SolverConfig};
pub use self::core::ExpressionSolver;
pub use errors::SolverError;
pub use outcome::{SearchOutcome, SearchReport, SearchStatistics, StopReason, TableReport};
