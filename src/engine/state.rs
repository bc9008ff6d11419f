//! Calculator state owned by the expression builder.

use super::input::BinaryOperator;
use crate::calculator::{Constant, ERROR_SENTINEL};
use serde::Serialize;

/// The entry value before anything has been typed.
pub const DEFAULT_ENTRY: &str = "0";

/// In-progress expression plus the one operand under edit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculatorState {
    /// Finalized operands, operators and functions, space separated.
    /// Never contains the pending entry.
    pub committed_expression: String,
    /// Digits of the operand being typed, a finished value, or the error sentinel.
    pub current_entry: String,
    /// Set after a result or immediate operation; the next digit starts a new entry.
    pub just_produced_result: bool,
    /// Memory register.
    pub memory: f64,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            committed_expression: String::new(),
            current_entry: DEFAULT_ENTRY.to_string(),
            just_produced_result: false,
            memory: 0.0,
        }
    }
}

impl CalculatorState {
    pub fn is_error(&self) -> bool {
        self.current_entry == ERROR_SENTINEL
    }

    /// Whether the entry is still the untouched default.
    pub fn entry_is_default(&self) -> bool {
        self.current_entry == DEFAULT_ENTRY
    }

    /// Last space-separated token of the committed expression.
    fn last_committed_token(&self) -> Option<&str> {
        self.committed_expression.split_whitespace().next_back()
    }

    pub fn committed_is_empty(&self) -> bool {
        self.committed_expression.trim().is_empty()
    }

    /// Whether the committed expression ends in a binary operator.
    pub fn ends_with_operator(&self) -> bool {
        self.committed_expression
            .trim_end()
            .chars()
            .next_back()
            .is_some_and(BinaryOperator::is_operator_glyph)
    }

    /// Whether the committed expression already ends in a complete operand:
    /// a closing parenthesis or a constant.
    pub fn ends_with_operand(&self) -> bool {
        match self.last_committed_token() {
            Some(")") => true,
            Some(token) => Constant::from_key_name(token).is_some(),
            None => false,
        }
    }

    /// Committed expression followed by the entry when it carries anything,
    /// with ASCII operators shown as display glyphs.
    pub fn preview(&self) -> String {
        let mut preview = self.committed_expression.clone();
        if !self.entry_is_default() && !self.is_error() {
            preview.push_str(&self.current_entry);
        }
        preview.replace('*', "×").replace('/', "÷")
    }
}
