mod display;
pub mod items;
pub mod presentation;
pub mod theme;

pub use display::{can_copy, is_compact, render_panel};
pub use presentation::{Layout, PresentationState};
pub use theme::{Palette, Theme};

/// Pad `text` on the left so it ends at column `width`.
pub(crate) fn align_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(width.saturating_sub(len)))
}

/// Keep the tail of `text` that fits in `width` columns, marking the cut
/// with an ellipsis.
pub(crate) fn truncate_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width || width == 0 {
        return text.to_string();
    }
    let tail: String = text.chars().skip(len - width + 1).collect();
    format!("…{tail}")
}
