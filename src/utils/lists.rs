use log::debug;

use crate::expression::Operator;
use crate::utils::errors::UtilsError;

fn entries(list: &str) -> impl Iterator<Item = &str> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
}

/// Parse a comma- or whitespace-separated list of integers such as `1, 2, 3`.
///
/// # Errors
///
/// Returns an error naming the first entry that is not an `i64`.
pub fn parse_number_list(list: &str) -> Result<Vec<i64>, UtilsError> {
    let numbers = entries(list)
        .map(|entry| {
            entry
                .parse::<i64>()
                .map_err(|_| UtilsError::InvalidNumber(entry.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed number list: {:?}", numbers);
    Ok(numbers)
}

/// Parse a comma- or whitespace-separated list of operator symbols or names.
///
/// # Errors
///
/// Returns an error naming the first entry that is not a known operator.
pub fn parse_operator_list(list: &str) -> Result<Vec<Operator>, UtilsError> {
    let operators = entries(list)
        .map(|entry| {
            entry
                .parse::<Operator>()
                .map_err(|_| UtilsError::UnknownOperator(entry.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed operator list: {:?}", operators);
    Ok(operators)
}
