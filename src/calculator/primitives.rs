//! The closed set of numeric primitives an expression may call.
//!
//! Scientific keys on the keypad produce user-facing names (`log`, `pi`, ...).
//! The sanitizer rewrites those into the canonical names below, and the parser
//! only ever resolves canonical names back into these enums. Nothing outside
//! this table can be invoked from an expression.

use super::error::{EvalError, Result};

/// A one-argument function that takes a parenthesized operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sqrt,
    /// Base-10 logarithm.
    Log10,
    /// Natural logarithm.
    Ln,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sqrt,
        Self::Log10,
        Self::Ln,
    ];

    /// Name as it appears on the keypad and in the committed expression.
    pub fn key_name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
            Self::Log10 => "log",
            Self::Ln => "ln",
        }
    }

    /// Name in sanitized expressions.
    ///
    /// Canonical names contain no digits so that the implicit multiplication
    /// pass never mistakes a name for a number followed by `(`.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Log10 => "lg",
            other => other.key_name(),
        }
    }

    pub fn from_key_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key_name() == name)
    }

    pub fn from_canonical_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.canonical_name() == name)
    }

    /// Apply the function, rejecting arguments outside its domain.
    pub fn apply(self, x: f64) -> Result<f64> {
        let value = match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Sqrt => {
                if x < 0.0 {
                    return Err(EvalError::domain(self.key_name(), x));
                }
                x.sqrt()
            }
            Self::Log10 | Self::Ln => {
                if x <= 0.0 {
                    return Err(EvalError::domain(self.key_name(), x));
                }
                if self == Self::Log10 { x.log10() } else { x.ln() }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

/// A named constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub const ALL: [Constant; 2] = [Self::Pi, Self::E];

    pub fn key_name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Pi => "PI",
            Self::E => "E",
        }
    }

    pub fn from_key_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key_name() == name)
    }

    pub fn from_canonical_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.canonical_name() == name)
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}
