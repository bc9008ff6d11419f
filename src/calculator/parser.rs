//! Recursive-descent evaluator over a closed token set.
//!
//! Grammar, lowest to highest precedence:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | CONSTANT | FUNCTION '(' expr ')' | '(' expr ')'
//! ```
//!
//! `^` is right-associative and binds tighter than unary minus on its left,
//! so `-2 ^ 2` is `-(2 ^ 2)`. `%` is the floating-point remainder.

use super::error::{EvalError, Result};
use super::primitives::{Constant, Function};

/// Deepest allowed nesting of groups, calls, signs and exponents.
const MAX_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Open,
    Close,
    Func(Function),
    Const(Constant),
}

/// Split a sanitized expression into tokens.
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        let token = match c {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                    pos += 1;
                }
                let text: String = chars[start..pos].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| EvalError::syntax(format!("invalid number '{text}'")))?;
                tokens.push(Token::Number(value));
                continue;
            }
            'a'..='z' | 'A'..='Z' => {
                let start = pos;
                while pos < chars.len() && chars[pos].is_ascii_alphabetic() {
                    pos += 1;
                }
                let name: String = chars[start..pos].iter().collect();
                let token = Function::from_canonical_name(&name)
                    .map(Token::Func)
                    .or_else(|| Constant::from_canonical_name(&name).map(Token::Const))
                    .ok_or_else(|| EvalError::disallowed(name.clone()))?;
                tokens.push(token);
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Caret,
            '(' => Token::Open,
            ')' => Token::Close,
            other => return Err(EvalError::disallowed(other.to_string())),
        };
        tokens.push(token);
        pos += 1;
    }

    Ok(tokens)
}

/// Parser state: a token buffer, a cursor and the current nesting depth.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Parse the whole buffer; leftover tokens are an error.
    fn parse(&mut self) -> Result<f64> {
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(Token::Close) => Err(EvalError::UnbalancedParens),
            Some(token) => Err(EvalError::syntax(format!("unexpected {token:?}"))),
        }
    }

    fn expr(&mut self) -> Result<f64> {
        let mut left = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    left += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    left -= self.term()?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut left = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    left *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let right = self.unary()?;
                    if right == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    left /= right;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    let right = self.unary()?;
                    if right == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    left %= right;
                }
                _ => return Ok(left),
            }
        }
    }

    /// Every nested construct recurses through here, so the depth is
    /// bounded in one place.
    fn unary(&mut self) -> Result<f64> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::syntax("expression nested too deeply"));
        }
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Caret) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Const(constant)) => Ok(constant.value()),
            Some(Token::Func(function)) => {
                self.expect_open()?;
                let arg = self.expr()?;
                self.expect_close()?;
                function.apply(arg)
            }
            Some(Token::Open) => {
                let value = self.expr()?;
                self.expect_close()?;
                Ok(value)
            }
            Some(Token::Close) => Err(EvalError::UnbalancedParens),
            Some(token) => Err(EvalError::syntax(format!("unexpected {token:?}"))),
            None => Err(EvalError::syntax("unexpected end of expression")),
        }
    }

    fn expect_open(&mut self) -> Result<()> {
        match self.advance() {
            Some(Token::Open) => Ok(()),
            _ => Err(EvalError::syntax("expected '(' after function name")),
        }
    }

    fn expect_close(&mut self) -> Result<()> {
        match self.advance() {
            Some(Token::Close) => Ok(()),
            None => Err(EvalError::UnbalancedParens),
            Some(token) => Err(EvalError::syntax(format!("expected ')', found {token:?}"))),
        }
    }
}

/// Evaluate a sanitized expression.
///
/// The result is not checked for finiteness here; see
/// [`evaluate`](super::evaluation::evaluate).
pub fn parse_and_evaluate(input: &str) -> Result<f64> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    Parser::new(tokens).parse()
}
