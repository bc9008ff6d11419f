//! Discrete input events accepted by the expression builder.
//!
//! Events come from three places: keypad buttons, the physical keyboard
//! mapping and whitespace-separated key scripts used by the CLI.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
}

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Glyph written into the committed expression.
    pub fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Whether `c` is an operator glyph, in display or ASCII form.
    pub fn is_operator_glyph(c: char) -> bool {
        matches!(c, '+' | '-' | '−' | '×' | '÷' | '*' | '/')
    }
}

/// A scientific key that writes into the expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScientificPrefix {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Pi,
    E,
}

impl ScientificPrefix {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Constants stand alone; everything else opens a parenthesis.
    pub fn is_constant(self) -> bool {
        matches!(self, Self::Pi | Self::E)
    }
}

/// An operation applied directly to the current entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Square,
    Cube,
    Sqrt,
    Reciprocal,
    Negate,
    Percent,
}

impl UnaryOp {
    /// Apply the operation. The result may be infinite or NaN; the caller
    /// decides how to surface that.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Square => x * x,
            Self::Cube => x * x * x,
            Self::Sqrt => x.sqrt(),
            Self::Reciprocal => 1.0 / x,
            Self::Negate => x * -1.0,
            Self::Percent => x / 100.0,
        }
    }
}

/// Memory register actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MemoryAction {
    Clear,
    Recall,
    Add,
    Subtract,
}

/// One discrete input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum InputEvent {
    Digit(u8),
    DecimalPoint,
    Operator(BinaryOperator),
    OpenParen,
    CloseParen,
    Scientific(ScientificPrefix),
    Unary(UnaryOp),
    Clear,
    Backspace,
    Evaluate,
    Memory(MemoryAction),
}

impl InputEvent {
    /// Map a physical keyboard key name to an event.
    ///
    /// Only the keys a desktop keyboard offers directly are mapped; the
    /// scientific keys are reachable through [`InputEvent::from_token`].
    pub fn from_key(key: &str) -> Option<Self> {
        let event = match key {
            "+" => Self::Operator(BinaryOperator::Add),
            "-" => Self::Operator(BinaryOperator::Subtract),
            "*" => Self::Operator(BinaryOperator::Multiply),
            "/" => Self::Operator(BinaryOperator::Divide),
            "Enter" | "=" => Self::Evaluate,
            "Escape" => Self::Clear,
            "." => Self::DecimalPoint,
            "%" => Self::Unary(UnaryOp::Percent),
            "Backspace" => Self::Backspace,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::Digit(c as u8 - b'0'),
                    _ => return None,
                }
            }
        };
        Some(event)
    }

    /// Map a key-script token (keyboard key or keypad label) to an event.
    pub fn from_token(token: &str) -> Option<Self> {
        if let Some(event) = Self::from_key(token) {
            return Some(event);
        }

        let event = match token {
            "×" | "x" => Self::Operator(BinaryOperator::Multiply),
            "÷" => Self::Operator(BinaryOperator::Divide),
            "−" => Self::Operator(BinaryOperator::Subtract),
            "sin" => Self::Scientific(ScientificPrefix::Sin),
            "cos" => Self::Scientific(ScientificPrefix::Cos),
            "tan" => Self::Scientific(ScientificPrefix::Tan),
            "log" => Self::Scientific(ScientificPrefix::Log),
            "ln" => Self::Scientific(ScientificPrefix::Ln),
            "pi" | "π" => Self::Scientific(ScientificPrefix::Pi),
            "e" => Self::Scientific(ScientificPrefix::E),
            "sq" | "x²" => Self::Unary(UnaryOp::Square),
            "cube" | "x³" => Self::Unary(UnaryOp::Cube),
            "sqrt" | "√" => Self::Unary(UnaryOp::Sqrt),
            "1/x" | "inv" => Self::Unary(UnaryOp::Reciprocal),
            "neg" | "±" => Self::Unary(UnaryOp::Negate),
            "AC" | "C" | "Esc" => Self::Clear,
            "back" | "⌫" => Self::Backspace,
            "MC" => Self::Memory(MemoryAction::Clear),
            "MR" => Self::Memory(MemoryAction::Recall),
            "M+" => Self::Memory(MemoryAction::Add),
            "M-" => Self::Memory(MemoryAction::Subtract),
            _ => return None,
        };
        Some(event)
    }

    /// Parse a whitespace-separated key script.
    ///
    /// Tokens made only of digits and decimal points expand to one event per
    /// character, so `12.5 + 3 =` is five keystrokes, an operator, a digit
    /// and evaluate.
    pub fn parse_script(script: &str) -> Result<Vec<Self>, InputError> {
        let mut events = Vec::new();

        for token in script.split_whitespace() {
            if token.len() > 1 && token.chars().all(|c| c.is_ascii_digit() || c == '.') {
                events.extend(token.chars().filter_map(|c| Self::from_key(&c.to_string())));
                continue;
            }

            let event =
                Self::from_token(token).ok_or_else(|| InputError::UnknownKey(token.to_string()))?;
            events.push(event);
        }

        Ok(events)
    }
}
