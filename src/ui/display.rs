//! Calculator panel rendering.
//!
//! Renders, top to bottom:
//! - The live preview of the expression being built
//! - The main display (entry, result or error sentinel)
//! - A status row with the memory indicator and the copy hint
//! - The history panel, when open

use super::items::render_history;
use super::presentation::PresentationState;
use super::{align_right, truncate_left};
use crate::calculator::{ERROR_SENTINEL, is_copyable};
use crate::engine::ExpressionBuilder;
use colored::Colorize;

/// Displays longer than this render in the compact style.
const COMPACT_THRESHOLD: usize = 12;

/// Whether a display value is long enough to use the compact style.
pub fn is_compact(display: &str) -> bool {
    display.chars().count() > COMPACT_THRESHOLD
}

/// Whether the copy action is offered for the current state.
pub fn can_copy(builder: &ExpressionBuilder) -> bool {
    builder.state().just_produced_result && is_copyable(builder.display())
}

/// Render the whole panel as terminal text.
pub fn render_panel(builder: &ExpressionBuilder, presentation: &PresentationState) -> String {
    let palette = presentation.theme.palette();
    let width = presentation.layout.panel_width();
    let rule = "─".repeat(width);

    let mut lines = vec![rule.color(palette.muted).to_string()];

    let preview = truncate_left(&builder.preview(), width);
    lines.push(align_right(&preview, width).color(palette.preview_text).to_string());

    let display = truncate_left(builder.display(), width);
    let display_line = align_right(&display, width);
    lines.push(if builder.display() == ERROR_SENTINEL {
        display_line.color(palette.error_text).to_string()
    } else if is_compact(builder.display()) {
        display_line.color(palette.display_text).to_string()
    } else {
        display_line.color(palette.display_text).bold().to_string()
    });

    let memory_flag = if builder.state().memory != 0.0 { "M" } else { " " };
    let copy_hint = if can_copy(builder) { "[copy]" } else { "" };
    let gap = width.saturating_sub(memory_flag.len() + copy_hint.len());
    lines.push(
        format!("{memory_flag}{}{copy_hint}", " ".repeat(gap))
            .color(palette.muted)
            .to_string(),
    );

    if presentation.show_history {
        lines.push(rule.color(palette.muted).to_string());
        lines.extend(render_history(builder.history(), &palette, width));
    }

    lines.push(rule.color(palette.muted).to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InputEvent;

    fn builder(script: &str) -> ExpressionBuilder {
        let mut builder = ExpressionBuilder::default();
        for event in InputEvent::parse_script(script).unwrap() {
            builder.apply(event);
        }
        builder
    }

    #[test]
    fn test_compact_threshold() {
        assert!(!is_compact("123456789012"));
        assert!(is_compact("1234567890123"));
    }

    #[test]
    fn test_panel_shows_preview_and_display() {
        let panel = render_panel(&builder("1 2 × 3"), &PresentationState::default());
        assert!(panel.contains("12 × 3"));
        assert!(panel.contains("3"));
        assert!(!panel.contains("[copy]"));
    }

    #[test]
    fn test_copy_offered_only_for_results() {
        assert!(can_copy(&builder("2 + 2 =")));
        assert!(!can_copy(&builder("2 + 2")));
        assert!(!can_copy(&builder("1 ÷ 0 =")));
        let panel = render_panel(&builder("2 + 2 ="), &PresentationState::default());
        assert!(panel.contains("[copy]"));
    }

    #[test]
    fn test_history_panel_only_when_open() {
        let calc = builder("2 + 2 =");
        let mut presentation = PresentationState::default();
        assert!(!render_panel(&calc, &presentation).contains("History"));
        presentation.toggle_history();
        let panel = render_panel(&calc, &presentation);
        assert!(panel.contains("History"));
        assert!(panel.contains("2 + 2"));
    }

    #[test]
    fn test_memory_indicator() {
        let panel = render_panel(&builder("5 M+"), &PresentationState::default());
        assert!(panel.lines().any(|line| line.contains('M')));
    }
}
