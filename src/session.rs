//! A calculator session: one expression builder plus its presentation state.
//!
//! The session is the single owner of both. Input events, history recall and
//! clipboard copies all go through it, one at a time.

use crate::calculator::{CalcResult, ClipboardError, copy_to_clipboard};
use crate::config::Config;
use crate::engine::{CalculatorState, ExpressionBuilder, InputError, InputEvent};
use crate::items::HistoryEntry;
use crate::ui::{self, PresentationState};
use serde::Serialize;
use tracing::{debug, info};

/// Serializable view of a session.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub state: &'a CalculatorState,
    pub preview: String,
    pub history: Vec<&'a HistoryEntry>,
    pub presentation: PresentationState,
}

#[derive(Debug, Default)]
pub struct Session {
    builder: ExpressionBuilder,
    presentation: PresentationState,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            builder: ExpressionBuilder::new(config.history_limit),
            presentation: PresentationState::new(config.theme, config.layout),
        }
    }

    pub fn builder(&self) -> &ExpressionBuilder {
        &self.builder
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut PresentationState {
        &mut self.presentation
    }

    /// Apply one input event. Any calculator input closes the history panel.
    pub fn handle(&mut self, event: InputEvent) -> Option<CalcResult> {
        self.presentation.hide_history();
        self.builder.apply(event)
    }

    /// Parse and apply a key script, returning every evaluation outcome.
    ///
    /// Nothing is applied if the script contains an unknown key.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<CalcResult>, InputError> {
        let events = InputEvent::parse_script(script)?;
        debug!(count = events.len(), "Running key script");
        Ok(events
            .into_iter()
            .filter_map(|event| self.handle(event))
            .collect())
    }

    /// Recall the history entry at `index` (0 is the most recent).
    pub fn recall(&mut self, index: usize) -> bool {
        self.presentation.hide_history();
        self.builder.recall_history(index)
    }

    /// Copy the current result to the system clipboard.
    pub fn copy(&self) -> Result<(), ClipboardError> {
        if !ui::can_copy(&self.builder) {
            return Err(ClipboardError::NothingToCopy);
        }
        copy_to_clipboard(self.builder.display())?;
        info!(value = %self.builder.display(), "Copied result to clipboard");
        Ok(())
    }

    pub fn render(&self) -> String {
        ui::render_panel(&self.builder, &self.presentation)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.builder.state(),
            preview: self.builder.preview(),
            history: self.builder.history().iter().collect(),
            presentation: self.presentation,
        }
    }
}
