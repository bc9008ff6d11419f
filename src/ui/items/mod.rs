mod history;

pub use history::render_history_entry;

use crate::engine::History;
use crate::ui::align_right;
use crate::ui::theme::Palette;
use colored::Colorize;

/// Render the history panel, newest entry first.
pub fn render_history(history: &History, palette: &Palette, width: usize) -> Vec<String> {
    let mut lines = vec![align_right("History", width).color(palette.muted).to_string()];

    if history.is_empty() {
        lines.push(
            align_right("No history yet", width)
                .color(palette.muted)
                .to_string(),
        );
        return lines;
    }

    for (row, entry) in history.iter().enumerate() {
        lines.extend(render_history_entry(entry, row, palette, width));
    }
    lines
}
