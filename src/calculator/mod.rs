//! Expression evaluator for the calculator.
//!
//! This module provides functionality to:
//! - Rewrite builder output into a restricted arithmetic grammar
//! - Evaluate it with a dedicated parser over a closed token set
//! - Format results for the display
//! - Copy results to the clipboard

mod clipboard;
mod error;
mod evaluation;
mod parser;
mod primitives;
mod sanitize;

pub use clipboard::{ClipboardError, copy_to_clipboard, is_copyable};
pub use error::{ErrorKind, EvalError};
pub use evaluation::{
    CalcResult, ERROR_SENTINEL, display_form, evaluate, evaluate_expression, format_number,
};
pub use primitives::{Constant, Function};
pub use sanitize::sanitize;
