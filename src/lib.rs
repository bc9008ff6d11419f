//! Arithon: a keystroke-driven scientific calculator.
//!
//! The crate is split into an expression engine and a thin terminal front end:
//! - [`engine`] accumulates input events into an expression
//! - [`calculator`] sanitizes and evaluates finished expressions
//! - [`ui`] renders the panel and holds presentation-only state
//! - [`session`] ties one builder to one presentation state

pub mod calculator;
pub mod config;
pub mod engine;
pub mod items;
pub mod session;
pub mod ui;

pub use config::Config;
pub use session::Session;
