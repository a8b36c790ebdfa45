use thiserror::Error;

/// Errors that can occur in utility functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Operand pool cannot be empty")]
    EmptyOperandPool,
    #[error("Invalid number in list: '{0}'")]
    InvalidNumber(String),
    #[error("Unknown operator in list: '{0}'")]
    UnknownOperator(String),
    #[error("Invalid range: lower={lower} is greater than upper={upper}")]
    InvalidRange { lower: i64, upper: i64 },
}
