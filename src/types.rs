/// Request and result values passed between the resolver, engine, and service.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// One confirmed text edit, built once per change by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// File tried before any resolver guess.
    pub explicit_file: Option<PathBuf>,
    /// Replacement text.
    pub new_text: String,
    /// Text as it was rendered before the edit.
    pub old_text: String,
    /// URL path of the page the edit happened on (`/`, `/about`, ...).
    pub page_url_path: String,
    /// Root of the project whose layout the resolver guesses at.
    pub project_root: Option<PathBuf>,
}

impl EditRequest {
    /// Check the invariants the orchestration relies on.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRequest` if neither a project root nor an explicit
    /// file is set, if `old_text` is empty, or if the edit changes nothing.
    pub fn validate(&self) -> Result<(), Error> {
        let has_root = self.project_root.as_deref().is_some_and(|p| return !is_blank_path(p));
        let has_file = self.explicit_file.as_deref().is_some_and(|p| return !is_blank_path(p));
        if !has_root && !has_file {
            return Err(Error::invalid("set a project root or an explicit file first"));
        }
        if self.old_text.is_empty() {
            return Err(Error::invalid("old text is empty"));
        }
        if self.old_text == self.new_text {
            return Err(Error::invalid("old and new text are identical"));
        }
        return Ok(());
    }
}

/// Body of `POST /update-text`: one patch against one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchRequest {
    /// File to patch.
    pub file_path: String,
    /// Replacement text.
    pub new_text: String,
    /// Text to look for.
    pub old_text: String,
}

impl PatchRequest {
    /// Reject bodies the engine cannot act on.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRequest` for an empty `filePath` or `oldText`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.file_path.trim().is_empty() {
            return Err(Error::invalid("filePath is empty"));
        }
        if self.old_text.is_empty() {
            return Err(Error::invalid("oldText is empty"));
        }
        return Ok(());
    }
}

/// A successful patch of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// Base name of the patched file.
    pub file_name: String,
    /// One-based line of the first line containing the old text, if any line did.
    pub line_number: Option<u32>,
    /// That line, trimmed, as it read before the patch.
    pub line_text: Option<String>,
}

/// A successful save: which candidate took the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    /// Candidate path that was patched.
    pub file: PathBuf,
    /// Base name of the patched file.
    pub file_name: String,
    /// One-based line number reported by the engine.
    pub line_number: Option<u32>,
}

/// Wire shape shared by the engine, the service, and `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchResult {
    /// Human-readable failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Base name of the file the result is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// One-based line number of the matched line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    /// Whether the file was written.
    pub success: bool,
}

impl PatchResult {
    /// A failed result carrying the error's message and kind.
    pub fn failed(error: &Error) -> Self {
        let file_name = match error {
            Error::FileNotFound { name } | Error::Io { name, .. } | Error::TextNotFound { name } => {
                Some(name.clone())
            },
            _ => None,
        };
        return Self {
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
            file_name,
            line_number: None,
            success: false,
        };
    }

    /// One-line summary for the person who made the edit.
    pub fn summary(&self) -> String {
        if !self.success {
            let reason = self.error.as_deref().unwrap_or("unknown error");
            return format!("Failed: {reason}");
        }
        let name = self.file_name.as_deref().unwrap_or("file");
        return self.line_number.map_or_else(
            || return format!("Saved to: {name}"),
            |line| return format!("Saved to: {name} (line {line})"),
        );
    }
}

impl From<&Patched> for PatchResult {
    fn from(patched: &Patched) -> Self {
        return Self {
            error: None,
            error_kind: None,
            file_name: Some(patched.file_name.clone()),
            line_number: patched.line_number,
            success: true,
        };
    }
}

impl From<&Saved> for PatchResult {
    fn from(saved: &Saved) -> Self {
        return Self {
            error: None,
            error_kind: None,
            file_name: Some(saved.file_name.clone()),
            line_number: saved.line_number,
            success: true,
        };
    }
}

impl From<&Result<Patched, Error>> for PatchResult {
    fn from(outcome: &Result<Patched, Error>) -> Self {
        return outcome.as_ref().map_or_else(Self::failed, Self::from);
    }
}

impl From<&Result<Saved, Error>> for PatchResult {
    fn from(outcome: &Result<Saved, Error>) -> Self {
        return outcome.as_ref().map_or_else(Self::failed, Self::from);
    }
}

/// Last path component, splitting on both `/` and `\`.
///
/// Hints typed as Windows paths still display as a bare file name.
pub fn display_name(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(&*raw);
    return name.to_string();
}

/// A path that is empty or only whitespace, as left by an unset settings field.
fn is_blank_path(path: &Path) -> bool {
    return path.as_os_str().to_string_lossy().trim().is_empty();
}
