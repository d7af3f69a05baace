//! Side-table of last-known text per editable element, keyed by a stable element id.

use std::collections::HashMap;

use crate::config::Settings;
use crate::types::EditRequest;

/// Remembers what each editable element said before the user touched it.
#[derive(Debug, Default)]
pub struct TextTracker {
    /// Element id to its last-known trimmed text.
    originals: HashMap<String, String>,
}

impl TextTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        return Self::default();
    }

    /// Start tracking an element.
    ///
    /// Blank text is ignored, since there is nothing in the source to find for it.
    pub fn track(&mut self, element_id: &str, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.originals.insert(element_id.to_string(), trimmed.to_string());
    }

    /// Text the element should be rolled back to after a failed save.
    pub fn original(&self, element_id: &str) -> Option<&str> {
        return self.originals.get(element_id).map(String::as_str);
    }

    /// Build the request for an element whose text changed.
    ///
    /// `None` when the element is untracked, edit mode is off, or the text is unchanged.
    pub fn edit(&self, element_id: &str, new_text: &str, settings: &Settings, page_url_path: &str) -> Option<EditRequest> {
        if !settings.edit_mode {
            return None;
        }
        let old_text = self.original(element_id)?;
        let new_text = new_text.trim();
        if old_text == new_text {
            return None;
        }
        return Some(EditRequest {
            explicit_file: settings.explicit_file.clone(),
            new_text: new_text.to_string(),
            old_text: old_text.to_string(),
            page_url_path: page_url_path.to_string(),
            project_root: settings.project_root.clone(),
        });
    }

    /// Record the saved text so the next edit of this element starts from it.
    pub fn commit(&mut self, element_id: &str, saved_text: &str) {
        if let Some(entry) = self.originals.get_mut(element_id) {
            saved_text.trim().clone_into(entry);
        }
    }

    /// Forget everything; used when edit mode is switched off.
    pub fn clear(&mut self) {
        self.originals.clear();
    }

    /// Number of tracked elements.
    pub fn len(&self) -> usize {
        return self.originals.len();
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        return self.originals.is_empty();
    }
}
