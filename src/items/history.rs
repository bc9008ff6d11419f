//! History item representing one finished calculation.

use crate::calculator::{CalcResult, display_form};
use serde::{Deserialize, Serialize};

/// A past calculation as shown in the history list.
///
/// Entries are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The evaluated expression, rendered with display glyphs.
    pub equation: String,
    /// The formatted result, reused verbatim on recall.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(equation: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            equation: equation.into(),
            result: result.into(),
        }
    }

    /// Create a history entry from a CalcResult.
    /// Returns None for failed evaluations, which are never recorded.
    pub fn from_calc_result(result: &CalcResult) -> Option<Self> {
        match result {
            CalcResult::Success {
                expression,
                display_result,
                ..
            } => Some(Self::new(display_form(expression), display_result.clone())),
            CalcResult::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::evaluate_expression;

    #[test]
    fn test_from_successful_result() {
        let entry = HistoryEntry::from_calc_result(&evaluate_expression("6 * 7")).unwrap();
        assert_eq!(entry.equation, "6 × 7");
        assert_eq!(entry.result, "42");
    }

    #[test]
    fn test_failed_result_is_not_recorded() {
        assert!(HistoryEntry::from_calc_result(&evaluate_expression("1 / 0")).is_none());
    }
}
