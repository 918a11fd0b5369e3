//! OCR via the external `tesseract` binary.
//!
//! Tesseract is a black box that turns an image into raw text; whatever
//! comes back is handed to the parser unchanged.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Page segmentation modes to try, in order. 6 ("a single uniform block
/// of text") fits most photographed plans; the others pick up skewed or
/// sparse layouts.
const PSM_MODES: &[&str] = &["6", "3", "4", "11"];

/// Run tesseract over an image and return the recognized text.
pub fn extract_text(path: &Path) -> Result<String> {
    let tesseract = which::which("tesseract").context(
        "Tesseract OCR not found in PATH.\n\
         Install it first, e.g.:\n  \
         Debian/Ubuntu: sudo apt-get install tesseract-ocr\n  \
         macOS: brew install tesseract",
    )?;

    for psm in PSM_MODES {
        if let Ok(text) = run_tesseract(&tesseract, path, Some("eng"), psm) {
            if !text.trim().is_empty() {
                return Ok(text);
            }
        }
    }

    // Last resort: let tesseract pick its default language data.
    let text = run_tesseract(&tesseract, path, None, "6")?;
    if !text.trim().is_empty() {
        return Ok(text);
    }

    anyhow::bail!("No text could be detected in {}", path.display())
}

fn run_tesseract(binary: &Path, image: &Path, lang: Option<&str>, psm: &str) -> Result<String> {
    let mut command = Command::new(binary);
    command
        .arg(image)
        .arg("stdout")
        .args(["--oem", "3", "--psm", psm])
        .stderr(std::process::Stdio::inherit());
    if let Some(lang) = lang {
        command.args(["-l", lang]);
    }

    let output = command
        .output()
        .with_context(|| format!("Failed to run tesseract on {}", image.display()))?;

    if !output.status.success() {
        anyhow::bail!(
            "tesseract exited with {} for {}",
            output.status,
            image.display()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
