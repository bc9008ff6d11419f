//! Keystroke-driven expression builder.
//!
//! This module provides:
//! - The calculator state and its invariants
//! - Input events and the keyboard/key-script mapping
//! - The builder that applies events and records a bounded history

mod builder;
mod history;
mod input;
mod state;

pub use builder::ExpressionBuilder;
pub use history::{DEFAULT_HISTORY_LIMIT, History};
pub use input::{
    BinaryOperator, InputError, InputEvent, MemoryAction, ScientificPrefix, UnaryOp,
};
pub use state::{CalculatorState, DEFAULT_ENTRY};
