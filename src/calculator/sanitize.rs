//! Rewriting of builder output into the restricted arithmetic grammar.
//!
//! Three passes run in a fixed order:
//! 1. Symbol substitution (display glyphs, keypad names to canonical names)
//! 2. Implicit multiplication insertion
//! 3. Allow-list validation of the rewritten text

use super::error::{EvalError, Result};
use super::primitives::{Constant, Function};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Keypad names for functions and constants, as whole words.
    static ref KEY_NAMES: Regex = Regex::new(
        r"\b(sin|cos|tan|sqrt|log|ln|pi|e)\b"
    ).unwrap();

    /// A digit directly before an opening parenthesis: `2 (` -> `2*(`.
    static ref DIGIT_OPEN: Regex = Regex::new(r"(\d)\s*\(").unwrap();

    /// A closing parenthesis directly before a digit: `) 2` -> `)*2`.
    static ref CLOSE_DIGIT: Regex = Regex::new(r"\)\s*(\d)").unwrap();

    /// Adjacent groups: `) (` -> `)*(`.
    static ref CLOSE_OPEN: Regex = Regex::new(r"\)\s*\(").unwrap();

    /// Everything a sanitized expression may consist of.
    static ref ALLOWED: Regex = Regex::new(
        r"^(?:[0-9.+\-*/%^()\s]|sin|cos|tan|sqrt|lg|ln|PI|E)*$"
    ).unwrap();
}

/// Run all three passes over a builder-produced expression.
pub fn sanitize(expr: &str) -> Result<String> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(EvalError::Empty);
    }

    let substituted = substitute_symbols(trimmed);
    let rewritten = insert_implicit_multiplication(&substituted);

    if !is_allowed(&rewritten) {
        return Err(EvalError::disallowed(trimmed));
    }

    Ok(rewritten)
}

/// Replace display glyphs with ASCII operators and keypad names with their
/// canonical primitive names.
///
/// Names are matched in one pass, so a canonical name is never rewritten
/// again (`e` becomes `E`, which no longer matches).
pub fn substitute_symbols(expr: &str) -> String {
    let ascii: String = expr
        .chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            other => other,
        })
        .collect();

    let named = KEY_NAMES.replace_all(&ascii, |caps: &Captures<'_>| {
        let name = &caps[1];
        Function::from_key_name(name)
            .map(Function::canonical_name)
            .or_else(|| Constant::from_key_name(name).map(Constant::canonical_name))
            .unwrap_or(name)
            .to_string()
    });

    named.replace("**", "^")
}

/// Insert `*` where multiplication is implied by adjacency.
///
/// Each rewrite runs exactly once, in order, and never sees its own output
/// as new input.
pub fn insert_implicit_multiplication(expr: &str) -> String {
    let step = DIGIT_OPEN.replace_all(expr, "${1}*(");
    let step = CLOSE_DIGIT.replace_all(&step, ")*${1}");
    CLOSE_OPEN.replace_all(&step, ")*(").into_owned()
}

/// Strict allow-list check over a rewritten expression.
pub fn is_allowed(expr: &str) -> bool {
    ALLOWED.is_match(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_substitution() {
        assert_eq!(substitute_symbols("6 × 7 ÷ 2 − 1"), "6 * 7 / 2 - 1");
    }

    #[test]
    fn test_name_substitution() {
        assert_eq!(substitute_symbols(" sin(30)"), " sin(30)");
        assert_eq!(substitute_symbols(" log(100)"), " lg(100)");
        assert_eq!(substitute_symbols("2 × pi"), "2 * PI");
        assert_eq!(substitute_symbols("e ^ 2"), "E ^ 2");
        assert_eq!(substitute_symbols("2 ** 3"), "2 ^ 3");
    }

    #[test]
    fn test_scientific_notation_is_not_a_constant() {
        // `e` inside a number is not a word of its own
        assert_eq!(substitute_symbols("2e3"), "2e3");
        assert!(sanitize("2e3").is_err());
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(insert_implicit_multiplication("2 ( 3 )"), "2*( 3 )");
        assert_eq!(insert_implicit_multiplication("( 2 ) 3"), "( 2 )*3");
        assert_eq!(insert_implicit_multiplication("( 2 ) ( 3 )"), "( 2 )*( 3 )");
    }

    #[test]
    fn test_implicit_multiplication_is_single_pass() {
        assert_eq!(insert_implicit_multiplication("2(3)(4)5"), "2*(3)*(4)*5");
        assert_eq!(insert_implicit_multiplication("2 * 3"), "2 * 3");
    }

    #[test]
    fn test_log_name_survives_implicit_multiplication() {
        assert_eq!(sanitize(" log(1000)").unwrap(), "lg(1000)");
    }

    #[test]
    fn test_allow_list() {
        assert!(is_allowed("2 * (3 + 4) / 5 % 2 ^ 2"));
        assert!(is_allowed("sin(PI) + lg(E) + ln(2) + sqrt(4) + cos(0) + tan(0)"));
        assert!(!is_allowed("alert(1)"));
        assert!(!is_allowed("2; 3"));
        assert!(!is_allowed("Math.sin(1)"));
    }

    #[test]
    fn test_sanitize_rejects_unknown_names() {
        assert_eq!(
            sanitize("exp(1)"),
            Err(EvalError::disallowed("exp(1)"))
        );
        assert_eq!(sanitize("   "), Err(EvalError::Empty));
    }

    #[test]
    fn test_allow_list_covers_every_canonical_name() {
        for f in Function::ALL {
            assert!(is_allowed(&format!("{}(1)", f.canonical_name())));
        }
        for c in Constant::ALL {
            assert!(is_allowed(c.canonical_name()));
        }
    }
}
