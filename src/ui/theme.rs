//! Terminal color themes.

use colored::Color;
use serde::{Deserialize, Serialize};

/// Light or dark color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors used when rendering the calculator panel.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub display_text: Color,
    pub preview_text: Color,
    pub error_text: Color,
    pub accent: Color,
    pub muted: Color,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                display_text: Color::BrightWhite,
                preview_text: Color::BrightBlack,
                error_text: Color::BrightRed,
                accent: Color::BrightBlue,
                muted: Color::BrightBlack,
            },
            Self::Light => Palette {
                display_text: Color::Black,
                preview_text: Color::BrightBlack,
                error_text: Color::Red,
                accent: Color::Yellow,
                muted: Color::BrightBlack,
            },
        }
    }
}
