//! Expression evaluation and result formatting.
//!
//! Wraps the sanitizer and the parser to provide a simple interface for
//! evaluating builder output and formatting results for the display.

use super::error::{EvalError, Result};
use super::parser::parse_and_evaluate;
use super::sanitize::sanitize;
use tracing::debug;

/// Display value shown in place of a result when evaluation fails.
pub const ERROR_SENTINEL: &str = "Error";

/// Results whose natural text is longer than this are shortened.
const MAX_NATURAL_LEN: usize = 12;

/// Significant digits kept when shortening.
const SIGNIFICANT_DIGITS: usize = 10;

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The expression as handed to the evaluator.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display, history and clipboard.
        display_result: String,
    },
    /// The expression was malformed or had no finite result.
    Error {
        /// The expression as handed to the evaluator.
        expression: String,
        /// Why evaluation failed.
        error: EvalError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (formatted result or the error sentinel).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { .. } => ERROR_SENTINEL,
        }
    }

    pub fn error(&self) -> Option<&EvalError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }
}

/// Evaluate an expression to a finite number.
pub fn evaluate(input: &str) -> Result<f64> {
    let sanitized = sanitize(input)?;
    debug!(input, sanitized = %sanitized, "Evaluating expression");

    let value = parse_and_evaluate(&sanitized)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

/// Evaluate an expression and format the outcome.
///
/// Never fails: every error is captured in [`CalcResult::Error`].
pub fn evaluate_expression(input: &str) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(&expression) {
        Ok(value) => CalcResult::Success {
            display_result: format_number(value),
            expression,
            value,
        },
        Err(error) => CalcResult::Error { expression, error },
    }
}

/// Format a number for the display.
///
/// Short results keep their natural decimal text; anything longer than
/// twelve characters is cut to ten significant digits.
pub fn format_number(value: f64) -> String {
    // -0 prints as "-0"
    let value = if value == 0.0 { 0.0 } else { value };

    let natural = value.to_string();
    if natural.chars().count() > MAX_NATURAL_LEN {
        to_precision(value, SIGNIFICANT_DIGITS)
    } else {
        natural
    }
}

/// Render `value` with `digits` significant digits.
///
/// Uses positional notation for exponents in `-6..digits` and `1.23e+21`
/// style otherwise. Trailing fractional zeros are dropped.
fn to_precision(value: f64, digits: usize) -> String {
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -6 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Render an evaluated expression with display glyphs for history.
pub fn display_form(expression: &str) -> String {
    expression.replace('*', "×").replace('/', "÷")
}
