//! History item rendering.
//!
//! Each entry renders as two right-aligned rows: the equation as muted text
//! and the result with an "= " prefix in the accent color.

use crate::items::HistoryEntry;
use crate::ui::align_right;
use crate::ui::theme::Palette;
use colored::Colorize;

/// Render one history entry. `row` is shown as the recall index.
pub fn render_history_entry(
    entry: &HistoryEntry,
    row: usize,
    palette: &Palette,
    width: usize,
) -> Vec<String> {
    let equation = align_right(&format!("[{row}] {}", entry.equation), width);
    let result = align_right(&format!("= {}", entry.result), width);

    vec![
        equation.color(palette.muted).to_string(),
        result.color(palette.accent).bold().to_string(),
    ]
}
