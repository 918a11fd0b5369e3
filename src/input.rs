//! Input text extraction.
//!
//! Shift plans arrive either as plain text files or as photos of the
//! printed plan. Images go through the external OCR step and are treated
//! exactly like typed text afterwards; any cleanup beyond the parser's own
//! sanitization is deliberately absent.

use crate::ocr;
use anyhow::{Context, Result};
use std::path::Path;

/// Extract shift-plan text from a file, dispatching on its extension.
pub fn read_input(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "text" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        "png" | "jpg" | "jpeg" => ocr::extract_text(path),
        _ => {
            // Unknown extension: try it as text before giving up.
            std::fs::read_to_string(path)
                .with_context(|| format!("Unsupported file type: {}", path.display()))
        }
    }
}
