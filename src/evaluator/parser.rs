//! Tokenizer and chain parser.
//!
//! A single left-to-right scan driven by two states, `ExpectNumber` and
//! `ExpectOperator`. Reaching end of input while expecting an operator is the
//! only accepting outcome; everything else unexpected is a [`ParseError`].

use crate::error::ParseError;

use super::token::{Operator, Token};

/// A parsed expression: a leading literal followed by `(operator, literal)` steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// The first literal, the initial accumulator.
    pub first: f64,
    /// Every subsequent operator with its right-hand literal, in textual order.
    pub steps: Vec<(Operator, f64)>,
}

impl Chain {
    /// Fold the steps into the accumulator strictly left to right.
    ///
    /// There is no precedence: `2+3*4` is `(2+3)*4`.
    #[must_use]
    pub fn reduce(&self) -> f64 {
        self.steps
            .iter()
            .fold(self.first, |acc, &(op, rhs)| op.apply(acc, rhs))
    }

    /// The chain as a flat token sequence.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(1 + self.steps.len() * 2);
        tokens.push(Token::Number(self.first));
        for &(op, rhs) in &self.steps {
            tokens.push(Token::Operator(op));
            tokens.push(Token::Number(rhs));
        }
        tokens
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectNumber,
    ExpectOperator,
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Read a literal starting at the cursor, including a leading minus if present.
    fn read_number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while self.peek().is_some_and(is_literal_char) {
            self.bump();
        }

        let literal = &self.input[start..self.pos];
        let malformed = || ParseError::MalformedNumber {
            literal: literal.to_string(),
            position: start,
        };

        let digits = literal.chars().filter(char::is_ascii_digit).count();
        let dots = literal.matches('.').count();
        if digits == 0 || dots > 1 {
            return Err(malformed());
        }
        literal.parse::<f64>().map_err(|_| malformed())
    }
}

const fn is_literal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Parse an expression into a [`Chain`].
///
/// Grammar: `expression := number (operator number)*`, where a number may carry
/// one leading `-` written directly against its digits. Whitespace between
/// tokens is ignored.
///
/// # Errors
///
/// Returns [`ParseError`] when the input is empty, starts or ends with an
/// operator, has two operators in a row, has a malformed literal, or contains
/// a character outside digits, `.`, `+ - * /` and whitespace.
pub fn parse(expression: &str) -> Result<Chain, ParseError> {
    let mut scanner = Scanner::new(expression);
    let mut state = State::ExpectNumber;
    let mut first: Option<f64> = None;
    let mut steps = Vec::new();
    let mut pending: Option<(Operator, usize)> = None;

    loop {
        scanner.skip_whitespace();
        let position = scanner.pos;

        let Some(c) = scanner.peek() else {
            return match (state, first, pending) {
                (State::ExpectOperator, Some(first), _) => Ok(Chain { first, steps }),
                (_, _, Some((_, at))) => Err(ParseError::MissingOperand { position: at }),
                _ => Err(ParseError::Empty),
            };
        };

        match state {
            State::ExpectNumber => {
                let signed = c == '-' && scanner.peek_second().is_some_and(is_literal_char);
                if is_literal_char(c) || signed {
                    let value = scanner.read_number()?;
                    match pending.take() {
                        Some((op, _)) => steps.push((op, value)),
                        None => first = Some(value),
                    }
                    state = State::ExpectOperator;
                } else if Operator::from_char(c).is_some() {
                    return Err(ParseError::UnexpectedOperator {
                        operator: c,
                        position,
                    });
                } else {
                    return Err(ParseError::InvalidCharacter {
                        character: c,
                        position,
                    });
                }
            }
            State::ExpectOperator => {
                if let Some(op) = Operator::from_char(c) {
                    scanner.bump();
                    pending = Some((op, position));
                    state = State::ExpectNumber;
                } else if is_literal_char(c) {
                    return Err(ParseError::UnexpectedNumber { position });
                } else {
                    return Err(ParseError::InvalidCharacter {
                        character: c,
                        position,
                    });
                }
            }
        }
    }
}

/// Split an expression into its alternating literal/operator tokens.
///
/// # Errors
///
/// Same conditions as [`parse`].
pub fn tokenize(expression: &str) -> Result<Vec<Token>, ParseError> {
    parse(expression).map(|chain| chain.tokens())
}
