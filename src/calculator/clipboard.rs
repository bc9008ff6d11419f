//! Clipboard functionality for copying calculator results.

use super::evaluation::ERROR_SENTINEL;
use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Nothing to copy")]
    NothingToCopy,

    #[error("Failed to access clipboard: {0}")]
    Access(#[source] arboard::Error),

    #[error("Failed to copy to clipboard: {0}")]
    Write(#[source] arboard::Error),
}

/// Check whether a display value may be copied.
///
/// The error sentinel and empty displays are never copied.
pub fn is_copyable(display: &str) -> bool {
    !display.is_empty() && display != ERROR_SENTINEL
}

/// Copy a display value to the system clipboard verbatim.
pub fn copy_to_clipboard(display: &str) -> Result<(), ClipboardError> {
    if !is_copyable(display) {
        return Err(ClipboardError::NothingToCopy);
    }

    let mut clipboard = Clipboard::new().map_err(ClipboardError::Access)?;
    clipboard
        .set_text(display.to_string())
        .map_err(ClipboardError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_sentinel_is_not_copyable() {
        assert!(!is_copyable(ERROR_SENTINEL));
        assert!(!is_copyable(""));
        assert!(is_copyable("42"));
    }

    #[test]
    fn test_copy_refuses_error_without_touching_clipboard() {
        assert!(matches!(
            copy_to_clipboard(ERROR_SENTINEL),
            Err(ClipboardError::NothingToCopy)
        ));
    }
}
