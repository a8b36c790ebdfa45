use std::fmt;
use std::str::FromStr;

use crate::expression::errors::ExpressionError;

/// Binary operators available to the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

/// Which side a chain of equal-precedence operators groups towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl Operator {
    /// Every operator, in the default tie-break order
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Pow,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "//",
            Operator::Mod => "%",
            Operator::Pow => "**",
        }
    }

    /// Binding strength used by the renderer and the parser. Higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 0,
            Operator::Mul | Operator::Div => 1,
            Operator::Mod => 2,
            Operator::Pow => 3,
        }
    }

    pub const fn associativity(self) -> Associativity {
        match self {
            Operator::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// `a op (b op c) == (a op b) op c` for every integer triple
    pub const fn is_associative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
            Operator::Mod => "mod",
            Operator::Pow => "pow",
        }
    }

    /// Apply the operator with checked `i64` arithmetic.
    ///
    /// Division truncates towards zero and the remainder takes the sign of the
    /// dividend, so `-7 // 2 == -3` and `-7 % 2 == -1`.
    ///
    /// # Errors
    ///
    /// Returns an error when:
    /// - the right operand of `//` or `%` is zero
    /// - the exponent of `**` is negative
    /// - the result does not fit in an `i64`
    pub fn apply(self, left: i64, right: i64) -> Result<i64, ExpressionError> {
        let overflow = || ExpressionError::Overflow {
            operator: self,
            left,
            right,
        };

        match self {
            Operator::Add => left.checked_add(right).ok_or_else(overflow),
            Operator::Sub => left.checked_sub(right).ok_or_else(overflow),
            Operator::Mul => left.checked_mul(right).ok_or_else(overflow),
            Operator::Div => {
                if right == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                left.checked_div(right).ok_or_else(overflow)
            }
            Operator::Mod => {
                if right == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                // i64::MIN % -1 overflows in the machine instruction but is 0 mathematically
                Ok(left.checked_rem(right).unwrap_or(0))
            }
            Operator::Pow => {
                if right < 0 {
                    return Err(ExpressionError::NegativeExponent {
                        base: left,
                        exponent: right,
                    });
                }
                match left {
                    0 if right == 0 => Ok(1),
                    0 => Ok(0),
                    1 => Ok(1),
                    -1 => Ok(if right % 2 == 0 { 1 } else { -1 }),
                    _ => {
                        let exponent = u32::try_from(right).map_err(|_| overflow())?;
                        left.checked_pow(exponent).ok_or_else(overflow)
                    }
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" => Ok(Operator::Add),
            "-" | "sub" => Ok(Operator::Sub),
            "*" | "mul" => Ok(Operator::Mul),
            "//" | "/" | "div" => Ok(Operator::Div),
            "%" | "mod" => Ok(Operator::Mod),
            "**" | "^" | "pow" => Ok(Operator::Pow),
            other => Err(ExpressionError::UnknownOperator(other.to_string())),
        }
    }
}
