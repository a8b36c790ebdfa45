//! Input validation and list parsing

mod errors;
mod lists;
mod validation;

pub use errors::UtilsError;
pub use lists::{parse_number_list, parse_operator_list};
pub use validation::{dedup_operators, validate_operands, validate_range};
