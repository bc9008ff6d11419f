//! Presentation state kept apart from the calculator engine.
//!
//! Theme, layout and history visibility never influence how expressions are
//! built or evaluated; the engine never reads them.

use super::theme::Theme;
use serde::{Deserialize, Serialize};

/// Panel orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Portrait,
    Landscape,
}

impl Layout {
    pub fn toggled(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }

    /// Width of the rendered panel in columns.
    pub fn panel_width(self) -> usize {
        match self {
            Self::Portrait => 28,
            Self::Landscape => 56,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PresentationState {
    pub theme: Theme,
    pub layout: Layout,
    pub show_history: bool,
}

impl PresentationState {
    pub fn new(theme: Theme, layout: Layout) -> Self {
        Self {
            theme,
            layout,
            show_history: false,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggled();
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    /// Close the history panel; any calculator input does this.
    pub fn hide_history(&mut self) {
        self.show_history = false;
    }
}
