//! Text patch engine: first-occurrence replacement of old text in one file.

use std::path::Path;

use crate::error::Error;
use crate::types::{Patched, display_name};

/// First line whose raw text contains the needle.
struct LineMatch {
    /// One-based line number.
    number: u32,
    /// The line, trimmed.
    text: String,
}

/// Replace the first occurrence of `old_text` in `file_path` with `new_text`.
///
/// The reported line is the first line that contains `old_text` on its own.
/// It is informational only: text that spans a line break is still replaced,
/// just without a line number. The file is rewritten in place (truncate and
/// write) and only when the content actually changed.
///
/// # Errors
///
/// Returns `Error::InvalidRequest` if `old_text` is empty,
/// `Error::FileNotFound` if nothing exists at `file_path`,
/// `Error::TextNotFound` if the content does not contain `old_text`,
/// or `Error::Io` if reading or writing fails. Nothing is retried.
pub fn patch(file_path: &Path, old_text: &str, new_text: &str) -> Result<Patched, Error> {
    let name = display_name(file_path);
    if old_text.is_empty() {
        return Err(Error::invalid("old text is empty"));
    }
    if !file_path.exists() {
        tracing::debug!(file = %file_path.display(), "file not found");
        return Err(Error::FileNotFound { name });
    }

    let content = std::fs::read_to_string(file_path)
        .map_err(|source| return Error::Io { name: name.clone(), source })?;

    let found = find_first_matching_line(&content, old_text);
    let updated = content.replacen(old_text, new_text, 1);

    if updated == content {
        tracing::debug!(file = %name, searched = %preview(old_text, 100), "text not found in file");
        return Err(Error::TextNotFound { name });
    }

    std::fs::write(file_path, updated)
        .map_err(|source| return Error::Io { name: name.clone(), source })?;

    let before = found.as_ref().map(|line| return preview(&line.text, 80));
    tracing::info!(
        file = %name,
        line = found.as_ref().map(|line| return line.number),
        before = before.as_deref(),
        "file updated"
    );

    return Ok(Patched {
        file_name: name,
        line_number: found.as_ref().map(|line| return line.number),
        line_text: found.map(|line| return line.text),
    });
}

/// Scan `\n`-separated lines top to bottom for the first one containing `needle`.
fn find_first_matching_line(content: &str, needle: &str) -> Option<LineMatch> {
    let (index, line) = content.split('\n').enumerate().find(|(_, line)| return line.contains(needle))?;
    let number = u32::try_from(index).ok()?.checked_add(1)?;
    return Some(LineMatch {
        number,
        text: line.trim().to_string(),
    });
}

/// At most `max` characters of `text`, for log lines.
pub(crate) fn preview(text: &str, max: usize) -> String {
    return text.chars().take(max).collect();
}
