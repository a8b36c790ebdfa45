use log::{debug, warn};

use crate::expression::Operator;
use crate::utils::errors::UtilsError;

/// # Errors
///
/// Returns an error if the operand pool is empty.
pub fn validate_operands(operands: &[i64]) -> Result<(), UtilsError> {
    debug!("Validating operand pool: {:?}", operands);

    if operands.is_empty() {
        warn!("Operand pool is empty");
        return Err(UtilsError::EmptyOperandPool);
    }

    debug!("Operand pool validation successful");
    Ok(())
}

/// # Errors
///
/// Returns an error if `lower` is greater than `upper`.
pub fn validate_range(lower: i64, upper: i64) -> Result<(), UtilsError> {
    if lower > upper {
        warn!("Empty range: {}..={}", lower, upper);
        return Err(UtilsError::InvalidRange { lower, upper });
    }
    Ok(())
}

/// Drop repeated operators, keeping the first occurrence so the tie-break
/// order is unchanged.
pub fn dedup_operators(operators: &[Operator]) -> Vec<Operator> {
    let mut unique = Vec::with_capacity(operators.len());
    for &op in operators {
        if unique.contains(&op) {
            warn!("Ignoring repeated operator '{}'", op);
        } else {
            unique.push(op);
        }
    }
    if unique.is_empty() {
        warn!("Operator pool is empty, only single operands can match");
    }
    unique
}
