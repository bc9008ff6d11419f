//! Incremental expression builder.
//!
//! Every operation is a synchronous state transition driven by one input
//! event. Structurally invalid input is ignored rather than reported; failed
//! evaluations turn the entry into the error sentinel.

use super::history::{DEFAULT_HISTORY_LIMIT, History};
use super::input::{BinaryOperator, InputEvent, MemoryAction, ScientificPrefix, UnaryOp};
use super::state::{CalculatorState, DEFAULT_ENTRY};
use crate::calculator::{CalcResult, ERROR_SENTINEL, evaluate_expression, format_number};
use crate::items::HistoryEntry;
use tracing::{debug, warn};

/// Owner of the calculator state and its history.
#[derive(Clone, Debug)]
pub struct ExpressionBuilder {
    state: CalculatorState,
    history: History,
}

impl Default for ExpressionBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ExpressionBuilder {
    pub fn new(history_limit: usize) -> Self {
        Self {
            state: CalculatorState::default(),
            history: History::new(history_limit),
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The value shown on the main display.
    pub fn display(&self) -> &str {
        &self.state.current_entry
    }

    pub fn preview(&self) -> String {
        self.state.preview()
    }

    /// Dispatch one input event.
    ///
    /// Returns the evaluation outcome for [`InputEvent::Evaluate`], `None`
    /// for everything else.
    pub fn apply(&mut self, event: InputEvent) -> Option<CalcResult> {
        match event {
            InputEvent::Digit(d) => self.append_digit(d),
            InputEvent::DecimalPoint => self.append_decimal_point(),
            InputEvent::Operator(op) => self.apply_binary_operator(op),
            InputEvent::OpenParen => self.open_parenthesis(),
            InputEvent::CloseParen => self.close_parenthesis(),
            InputEvent::Scientific(prefix) => self.apply_scientific_prefix(prefix),
            InputEvent::Unary(op) => self.apply_immediate_unary(op),
            InputEvent::Clear => self.clear(),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Evaluate => return self.evaluate(),
            InputEvent::Memory(action) => self.memory_op(action),
        }
        None
    }

    /// Append a digit to the entry, or start over after a finished value.
    ///
    /// Evaluations, immediate operations and memory recall all count as a
    /// finished value.
    pub fn append_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        let d = char::from(b'0' + digit);

        if self.state.just_produced_result || self.state.is_error() {
            self.state.committed_expression.clear();
            self.state.current_entry = d.to_string();
        } else if self.state.entry_is_default() {
            self.state.current_entry = d.to_string();
        } else {
            self.state.current_entry.push(d);
        }
        self.state.just_produced_result = false;

        debug!(entry = %self.state.current_entry, "Digit appended");
    }

    /// Append a decimal point unless the entry already has one.
    pub fn append_decimal_point(&mut self) {
        if self.state.just_produced_result || self.state.is_error() {
            self.state.committed_expression.clear();
            self.state.current_entry = format!("{DEFAULT_ENTRY}.");
            self.state.just_produced_result = false;
            return;
        }

        if !self.state.current_entry.contains('.') {
            self.state.current_entry.push('.');
        }
    }

    /// Append a binary operator, replacing a trailing one when no operand
    /// was typed in between.
    pub fn apply_binary_operator(&mut self, op: BinaryOperator) {
        if self.state.is_error() {
            return;
        }

        if self.state.just_produced_result {
            // A finished value is always an operand, even when it is "0".
            self.state.just_produced_result = false;
            self.flush_entry();
        } else if self.state.entry_is_default() && self.state.ends_with_operator() {
            let trimmed = self.state.committed_expression.trim_end();
            let mut without_op = trimmed.to_string();
            without_op.pop();
            self.state.committed_expression = without_op;
        } else if self.state.entry_is_default() && self.state.ends_with_operand() {
            // the parenthesis or constant already supplies the operand
        } else {
            self.flush_entry();
        }

        self.push_token(&op.glyph().to_string());
        self.state.current_entry = DEFAULT_ENTRY.to_string();

        debug!(committed = %self.state.committed_expression, "Operator applied");
    }

    /// Open a group. A previous result becomes an implicit left factor.
    pub fn open_parenthesis(&mut self) {
        if self.state.is_error() {
            self.state.committed_expression.clear();
            self.state.current_entry = DEFAULT_ENTRY.to_string();
        } else if self.state.just_produced_result || !self.state.entry_is_default() {
            self.flush_entry();
        }

        self.push_token("(");
        self.state.current_entry = DEFAULT_ENTRY.to_string();
        self.state.just_produced_result = false;

        debug!(committed = %self.state.committed_expression, "Parenthesis opened");
    }

    /// Close a group. Ignored when it would be the first token.
    ///
    /// The entry is flushed when it carries a value or when the group would
    /// otherwise end without an operand (`sin(` then `)` closes on `0`).
    pub fn close_parenthesis(&mut self) {
        if self.state.is_error() {
            return;
        }
        if self.state.committed_is_empty()
            && (self.state.just_produced_result || self.state.entry_is_default())
        {
            return;
        }

        if self.state.just_produced_result
            || !self.state.entry_is_default()
            || !self.state.ends_with_operand()
        {
            self.flush_entry();
        }

        self.push_token(")");
        self.state.current_entry = DEFAULT_ENTRY.to_string();
        self.state.just_produced_result = false;

        debug!(committed = %self.state.committed_expression, "Parenthesis closed");
    }

    /// Write a function call opener or a constant into the expression.
    pub fn apply_scientific_prefix(&mut self, prefix: ScientificPrefix) {
        if self.state.is_error() {
            return;
        }

        if self.state.just_produced_result || !self.state.entry_is_default() {
            self.flush_entry();
        }

        if prefix.is_constant() {
            self.push_token(prefix.name());
        } else {
            self.separate();
            self.state.committed_expression.push_str(prefix.name());
            self.state.committed_expression.push('(');
        }
        self.state.current_entry = DEFAULT_ENTRY.to_string();
        self.state.just_produced_result = false;

        debug!(committed = %self.state.committed_expression, "Scientific prefix applied");
    }

    /// Transform the entry in place without touching the committed expression.
    pub fn apply_immediate_unary(&mut self, op: UnaryOp) {
        let Ok(value) = self.state.current_entry.parse::<f64>() else {
            self.fail();
            return;
        };

        let result = op.apply(value);
        if !result.is_finite() {
            warn!(?op, value, "Immediate operation has no finite result");
            self.fail();
            return;
        }

        self.state.current_entry = format_number(result);
        self.state.just_produced_result = true;

        debug!(?op, entry = %self.state.current_entry, "Immediate operation applied");
    }

    /// Reset everything except memory and history.
    pub fn clear(&mut self) {
        self.state.committed_expression.clear();
        self.state.current_entry = DEFAULT_ENTRY.to_string();
        self.state.just_produced_result = false;

        debug!("Cleared");
    }

    /// Drop the last character of the entry. The committed expression is
    /// never edited.
    pub fn backspace(&mut self) {
        if self.state.is_error() {
            self.state.current_entry = DEFAULT_ENTRY.to_string();
            return;
        }

        if self.state.current_entry.chars().count() > 1 {
            self.state.current_entry.pop();
            if self.state.current_entry == "-" {
                self.state.current_entry = DEFAULT_ENTRY.to_string();
            }
        } else {
            self.state.current_entry = DEFAULT_ENTRY.to_string();
        }
    }

    /// Evaluate the committed expression plus the entry.
    ///
    /// Returns `None` when there is nothing to evaluate.
    pub fn evaluate(&mut self) -> Option<CalcResult> {
        let mut final_expr = self.state.committed_expression.clone();
        if !(self.state.ends_with_operand() && self.state.entry_is_default()) {
            final_expr.push_str(&self.state.current_entry);
        }
        if final_expr.trim().is_empty() {
            return None;
        }

        let result = evaluate_expression(&final_expr);
        match &result {
            CalcResult::Success { display_result, .. } => {
                if let Some(entry) = HistoryEntry::from_calc_result(&result) {
                    self.history.push(entry);
                }
                self.state.current_entry = display_result.clone();
                debug!(expression = %result.expression(), result = %display_result, "Evaluated");
            }
            CalcResult::Error { error, .. } => {
                warn!(expression = %result.expression(), %error, kind = ?error.kind(), "Evaluation failed");
                self.state.current_entry = ERROR_SENTINEL.to_string();
            }
        }
        self.state.committed_expression.clear();
        self.state.just_produced_result = true;

        Some(result)
    }

    /// Clear, recall, add to or subtract from the memory register.
    pub fn memory_op(&mut self, action: MemoryAction) {
        match action {
            MemoryAction::Clear => self.state.memory = 0.0,
            MemoryAction::Recall => {
                self.state.current_entry = format_number(self.state.memory);
                self.state.just_produced_result = true;
            }
            MemoryAction::Add | MemoryAction::Subtract => {
                let Ok(value) = self.state.current_entry.parse::<f64>() else {
                    return;
                };
                if action == MemoryAction::Add {
                    self.state.memory += value;
                } else {
                    self.state.memory -= value;
                }
            }
        }

        debug!(?action, memory = self.state.memory, "Memory operation");
    }

    /// Copy a history result back into the entry. Returns false when there
    /// is no entry at `index` (0 is the most recent).
    pub fn recall_history(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.get(index) else {
            return false;
        };

        self.state.current_entry = entry.result.clone();
        self.state.committed_expression.clear();
        self.state.just_produced_result = true;
        true
    }

    /// Normalize the committed expression so the next token starts after a
    /// single space (or directly after a function's opening parenthesis).
    fn separate(&mut self) {
        let committed = &mut self.state.committed_expression;
        committed.truncate(committed.trim_end().len());
        if !committed.is_empty() && !committed.ends_with('(') {
            committed.push(' ');
        }
    }

    /// Append a standalone token followed by a space.
    fn push_token(&mut self, token: &str) {
        self.separate();
        self.state.committed_expression.push_str(token);
        self.state.committed_expression.push(' ');
    }

    /// Move the entry into the committed expression.
    fn flush_entry(&mut self) {
        let entry = std::mem::replace(&mut self.state.current_entry, DEFAULT_ENTRY.to_string());
        self.state.committed_expression.push_str(&entry);
    }

    /// Enter the error state.
    fn fail(&mut self) {
        self.state.current_entry = ERROR_SENTINEL.to_string();
        self.state.committed_expression.clear();
        self.state.just_produced_result = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> ExpressionBuilder {
        let mut builder = ExpressionBuilder::default();
        for event in InputEvent::parse_script(script).unwrap() {
            builder.apply(event);
        }
        builder
    }

    #[test]
    fn test_digits_accumulate() {
        assert_eq!(run("1 2 3").display(), "123");
        assert_eq!(run("0 5").display(), "5");
        assert_eq!(run("0 0 7").display(), "7");
    }

    #[test]
    fn test_decimal_point_once() {
        assert_eq!(run("1 . 5 .").display(), "1.5");
        assert_eq!(run(". 5").display(), "0.5");
    }

    #[test]
    fn test_simple_evaluation() {
        let builder = run("2 + 3 =");
        assert_eq!(builder.display(), "5");
        assert!(builder.state().just_produced_result);
        assert!(builder.state().committed_is_empty());
        assert_eq!(builder.history().get(0).unwrap().equation, "2 + 3");
    }

    #[test]
    fn test_grouping() {
        let builder = run("( 2 + 3 ) × 4 =");
        assert_eq!(builder.display(), "20");
        assert_eq!(builder.history().get(0).unwrap().equation, "( 2 + 3 ) × 4");
    }

    #[test]
    fn test_implicit_multiplication_before_group() {
        assert_eq!(run("2 ( 3 ) =").display(), "6");
    }

    #[test]
    fn test_operator_substitution() {
        let builder = run("5 + ×");
        assert_eq!(builder.state().committed_expression, "5 × ");
    }

    #[test]
    fn test_substituted_operator_with_no_operand_uses_zero() {
        assert_eq!(run("5 + × =").display(), "0");
    }

    #[test]
    fn test_operator_after_group_keeps_expression() {
        let builder = run("( 2 ) +");
        assert_eq!(builder.state().committed_expression, "( 2 ) + ");
        assert_eq!(run("( 2 ) + 3 =").display(), "5");
    }

    #[test]
    fn test_trailing_group_is_not_followed_by_zero() {
        let builder = run("( 1 + 2 ) =");
        assert_eq!(builder.display(), "3");
    }

    #[test]
    fn test_result_continues_as_left_operand() {
        let builder = run("2 + 3 = × 2 =");
        assert_eq!(builder.display(), "10");
        assert_eq!(builder.history().len(), 2);
        assert_eq!(builder.history().get(0).unwrap().equation, "5 × 2");
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        let builder = run("2 + 3 = 7");
        assert_eq!(builder.display(), "7");
        assert!(!builder.state().just_produced_result);
        assert_eq!(run("2 + 3 = 7 + 1 =").display(), "8");
    }

    #[test]
    fn test_digit_after_immediate_op_starts_over() {
        let builder = run("2 + 9 √ 4");
        assert_eq!(builder.display(), "4");
        assert!(builder.state().committed_is_empty());
        assert_eq!(run("2 + 9 √ 4 =").display(), "4");
        assert_eq!(run("4 M+ AC 1 + MR 2 =").display(), "2");
    }

    #[test]
    fn test_decimal_point_after_result_starts_over() {
        let builder = run("5 = . 3");
        assert_eq!(builder.display(), "0.3");
        assert!(builder.state().committed_is_empty());
        assert_eq!(run("1 + 2 = . 5 =").display(), "0.5");
        assert_eq!(run("1 ÷ 0 = . 2 =").display(), "0.2");
    }

    #[test]
    fn test_open_paren_after_result_multiplies() {
        assert_eq!(run("4 = ( 1 + 2 ) =").display(), "12");
    }

    #[test]
    fn test_close_paren_as_first_token_is_ignored() {
        let builder = run(")");
        assert_eq!(builder.state(), &CalculatorState::default());
        let builder = run("5 = )");
        assert_eq!(builder.display(), "5");
        assert!(builder.state().committed_is_empty());
    }

    #[test]
    fn test_unbalanced_parentheses_fail_at_evaluation() {
        let builder = run("( 2 + 3 =");
        assert_eq!(builder.display(), ERROR_SENTINEL);
        assert!(builder.history().is_empty());
    }

    #[test]
    fn test_deep_nesting_shows_error() {
        let mut builder = ExpressionBuilder::default();
        for _ in 0..1000 {
            builder.open_parenthesis();
        }
        builder.append_digit(1);
        for _ in 0..1000 {
            builder.close_parenthesis();
        }
        assert!(!builder.evaluate().unwrap().is_success());
        assert_eq!(builder.display(), ERROR_SENTINEL);
        assert!(builder.state().committed_is_empty());
    }

    #[test]
    fn test_scientific_functions() {
        assert_eq!(run("sin 0 ) =").display(), "0");
        assert_eq!(run("log 1000 ) =").display(), "3");
        assert_eq!(run("2 + ln 1 ) =").display(), "2");
        assert_eq!(run("sqrt").display(), "0");
    }

    #[test]
    fn test_function_closed_on_default_entry() {
        let builder = run("cos )");
        assert_eq!(builder.state().committed_expression, "cos(0 ) ");
        assert_eq!(run("cos ) =").display(), "1");
    }

    #[test]
    fn test_empty_operand_before_close_paren_is_zero() {
        let builder = run("( 2 + )");
        assert_eq!(builder.state().committed_expression, "( 2 + 0 ) ");
        assert_eq!(run("( 2 + ) =").display(), "2");
        assert_eq!(run("( 2 ) )").state().committed_expression, "( 2 ) ) ");
    }

    #[test]
    fn test_constants() {
        assert_eq!(run("pi =").display(), "3.141592654");
        assert_eq!(run("2 × pi =").display(), "6.283185307");
        assert_eq!(run("e × 1 =").display(), "2.718281828");
    }

    #[test]
    fn test_square_is_not_idempotent() {
        let mut builder = run("3");
        builder.apply_immediate_unary(UnaryOp::Square);
        assert_eq!(builder.display(), "9");
        builder.apply_immediate_unary(UnaryOp::Square);
        assert_eq!(builder.display(), "81");
    }

    #[test]
    fn test_immediate_ops_leave_expression_alone() {
        let builder = run("2 + 9 √");
        assert_eq!(builder.display(), "3");
        assert_eq!(builder.state().committed_expression, "2 + ");
        assert_eq!(run("2 + 9 √ =").display(), "5");
        assert_eq!(run("2 + 9 √ × 2 =").display(), "8");
    }

    #[test]
    fn test_percent() {
        let builder = run("5 0 %");
        assert_eq!(builder.display(), "0.5");
        assert!(builder.state().just_produced_result);
    }

    #[test]
    fn test_negate_and_cube() {
        assert_eq!(run("4 ±").display(), "-4");
        assert_eq!(run("2 x³").display(), "8");
        assert_eq!(run("4 1/x").display(), "0.25");
    }

    #[test]
    fn test_reciprocal_of_zero_is_an_error() {
        let builder = run("1/x");
        assert_eq!(builder.display(), ERROR_SENTINEL);
        assert!(builder.state().just_produced_result);
    }

    #[test]
    fn test_sqrt_of_negative_is_an_error() {
        assert_eq!(run("4 ± √").display(), ERROR_SENTINEL);
    }

    #[test]
    fn test_division_by_zero() {
        let builder = run("5 ÷ 0 =");
        assert_eq!(builder.display(), ERROR_SENTINEL);
        assert!(builder.state().committed_is_empty());
        assert!(builder.state().just_produced_result);
    }

    #[test]
    fn test_recovery_after_error() {
        let builder = run("5 ÷ 0 = 7");
        assert_eq!(builder.display(), "7");
        assert!(builder.state().committed_is_empty());
        assert_eq!(run("5 ÷ 0 = +").display(), ERROR_SENTINEL);
        assert_eq!(run("5 ÷ 0 = ( 2 ) =").display(), "2");
    }

    #[test]
    fn test_clear_keeps_memory() {
        let builder = run("7 M+ AC 1 + 2 AC");
        assert_eq!(builder.state().committed_expression, "");
        assert_eq!(builder.display(), "0");
        assert_eq!(builder.state().memory, 7.0);
    }

    #[test]
    fn test_backspace() {
        assert_eq!(run("1 2 3 back").display(), "12");
        assert_eq!(run("5 back").display(), "0");
        assert_eq!(run("5 ± back").display(), "0");
        let builder = run("5 + 1 2 back back back");
        assert_eq!(builder.display(), "0");
        assert_eq!(builder.state().committed_expression, "5 + ");
        assert_eq!(run("1 ÷ 0 = back").display(), "0");
    }

    #[test]
    fn test_memory_clear_then_recall() {
        let builder = run("7 M+ MC MR");
        assert_eq!(builder.display(), "0");
        assert!(builder.state().just_produced_result);
    }

    #[test]
    fn test_memory_add_subtract() {
        let builder = run("7 M+ AC 2 M- AC 1 0 M+ AC MR");
        assert_eq!(builder.display(), "15");
        assert_eq!(run("MR + 2 =").display(), "2");
    }

    #[test]
    fn test_memory_add_subtract_ignore_error_sentinel() {
        let builder = run("4 M+ AC 5 ÷ 0 = M+ M-");
        assert_eq!(builder.display(), ERROR_SENTINEL);
        assert_eq!(builder.state().memory, 4.0);
        assert_eq!(run("4 M+ AC 5 ÷ 0 = M+ M- MR").display(), "4");
    }

    #[test]
    fn test_memory_recall_into_expression() {
        assert_eq!(run("4 M+ AC 1 + MR =").display(), "5");
    }

    #[test]
    fn test_history_bound() {
        let mut builder = ExpressionBuilder::default();
        for n in 0..11u8 {
            builder.append_digit(n % 10);
            builder.apply_binary_operator(BinaryOperator::Add);
            builder.append_digit(1);
            builder.evaluate();
        }
        assert_eq!(builder.history().len(), 10);
        assert_eq!(builder.history().get(0).unwrap().equation, "0 + 1");
        assert_eq!(builder.history().get(9).unwrap().equation, "1 + 1");
    }

    #[test]
    fn test_recall_history() {
        let mut builder = run("6 × 7 = 2 + 2 = 9 +");
        assert!(builder.recall_history(1));
        assert_eq!(builder.display(), "42");
        assert!(builder.state().committed_is_empty());
        assert_eq!(builder.history().len(), 2);
        assert!(!builder.recall_history(5));
    }

    #[test]
    fn test_evaluate_on_fresh_state() {
        let mut builder = ExpressionBuilder::default();
        let result = builder.evaluate().unwrap();
        assert!(result.is_success());
        assert_eq!(builder.display(), "0");
    }

    #[test]
    fn test_preview() {
        let builder = run("1 2 × 3");
        assert_eq!(builder.preview(), "12 × 3");
        assert_eq!(run("5 ÷").preview(), "5 ÷ ");
    }

    #[test]
    fn test_long_results_are_shortened() {
        assert_eq!(run("1 ÷ 3 =").display(), "0.3333333333");
        let builder = run("1 ÷ 3 =");
        assert_eq!(builder.history().get(0).unwrap().result, "0.3333333333");
    }
}
