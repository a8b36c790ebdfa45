use std::iter::Peekable;
use std::rc::Rc;
use std::str::{CharIndices, FromStr};

use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::ExpressionError;
use crate::expression::operator::{Associativity, Operator};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Op(Operator),
    Minus,
    Open,
    Close,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(digits) => digits.clone(),
            Token::Op(op) => op.symbol().to_string(),
            Token::Minus => "-".to_string(),
            Token::Open => "(".to_string(),
            Token::Close => ")".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<CharIndices> = input.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '0'..='9' => {
                let mut digits = c.to_string();
                while let Some(&(_, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    digits.push(next);
                    chars.next();
                }
                Token::Number(digits)
            }
            '+' => Token::Op(Operator::Add),
            '-' => Token::Minus,
            '%' => Token::Op(Operator::Mod),
            '(' => Token::Open,
            ')' => Token::Close,
            '*' => {
                if chars.next_if(|&(_, next)| next == '*').is_some() {
                    Token::Op(Operator::Pow)
                } else {
                    Token::Op(Operator::Mul)
                }
            }
            '/' => {
                if chars.next_if(|&(_, next)| next == '/').is_none() {
                    return Err(ExpressionError::UnexpectedCharacter { position, found: c });
                }
                Token::Op(Operator::Div)
            }
            found => return Err(ExpressionError::UnexpectedCharacter { position, found }),
        };
        tokens.push((position, token));
    }

    Ok(tokens)
}

/// Precedence-climbing parser over a given operator precedence table
struct Parser {
    tokens: Vec<(usize, Token)>,
    cursor: usize,
    precedence: fn(Operator) -> u8,
}

impl Parser {
    fn peek(&self) -> Option<&(usize, Token)> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn peek_operator(&self) -> Option<Operator> {
        match self.peek() {
            Some((_, Token::Op(op))) => Some(*op),
            Some((_, Token::Minus)) => Some(Operator::Sub),
            _ => None,
        }
    }

    fn parse_expression(&mut self, min_precedence: u8) -> Result<Expression, ExpressionError> {
        let mut lhs = self.parse_operand()?;

        while let Some(op) = self.peek_operator() {
            let precedence = (self.precedence)(op);
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let next_min = match op.associativity() {
                Associativity::Left => precedence + 1,
                Associativity::Right => precedence,
            };
            let rhs = self.parse_expression(next_min)?;
            lhs = Expression::combine(op, Rc::new(lhs), Rc::new(rhs))?;
        }

        Ok(lhs)
    }

    fn parse_operand(&mut self) -> Result<Expression, ExpressionError> {
        match self.advance() {
            Some((_, Token::Number(digits))) => literal(&digits),
            Some((position, Token::Minus)) => match self.advance() {
                Some((_, Token::Number(digits))) => literal(&format!("-{}", digits)),
                Some((_, token)) => Err(ExpressionError::UnexpectedToken {
                    position,
                    found: format!("-{}", token.describe()),
                }),
                None => Err(ExpressionError::UnexpectedEnd),
            },
            Some((_, Token::Open)) => {
                let inner = self.parse_expression(0)?;
                match self.advance() {
                    Some((_, Token::Close)) => Ok(inner),
                    Some((position, token)) => Err(ExpressionError::UnexpectedToken {
                        position,
                        found: token.describe(),
                    }),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some((position, token)) => Err(ExpressionError::UnexpectedToken {
                position,
                found: token.describe(),
            }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

fn literal(text: &str) -> Result<Expression, ExpressionError> {
    text.parse::<i64>()
        .map(Expression::leaf)
        .map_err(|_| ExpressionError::InvalidLiteral(text.to_string()))
}

/// Parse infix text, ranking operators with `precedence` instead of
/// [`Operator::precedence`]. Associativity is unchanged.
pub(crate) fn parse_with_precedence(
    input: &str,
    precedence: fn(Operator) -> u8,
) -> Result<Expression, ExpressionError> {
    debug!("Parsing expression: '{}'", input);

    let mut parser = Parser {
        tokens: tokenize(input)?,
        cursor: 0,
        precedence,
    };
    let expr = parser.parse_expression(0)?;

    if let Some((position, token)) = parser.advance() {
        return Err(ExpressionError::UnexpectedToken {
            position,
            found: token.describe(),
        });
    }

    debug!("Parsed expression with {} operands", expr.length());
    Ok(expr)
}

impl FromStr for Expression {
    type Err = ExpressionError;

    /// Parse infix text such as `9 * (4 ** 5 + 7)`.
    ///
    /// `%` binds tighter than `*` and `//`, and `**` groups to the right. A `-`
    /// directly in operand position starts a negative literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_precedence(s, Operator::precedence)
    }
}
