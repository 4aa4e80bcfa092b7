//! Sanitization pipeline.
//!
//! Every read path hands out the redacted projection of a document:
//! first-level items ranked by `sort` (descending, stable), with
//! `description`, every item `name` and every second-level `value` cleared.
//! Identity fields (`id`, `title`, `sort`, `code`) survive untouched.

use crate::Document;

/// Return an independent, sanitized copy of `document`.
///
/// The input is left untouched. Applying the transform to its own output
/// yields an equal document.
pub fn sanitize_and_sort(document: &Document) -> Document {
    deep_copy(document).into_sanitized()
}

/// Return a fully independent copy of `document`.
///
/// `Document` owns all of its data, so a clone shares no storage with the
/// original.
pub fn deep_copy(document: &Document) -> Document {
    document.clone()
}

impl Document {
    /// Sanitize in place, consuming the document.
    ///
    /// Used where the caller already owns a private copy, e.g. a page fetched
    /// from storage.
    pub fn into_sanitized(mut self) -> Self {
        // sort_by is stable: equal keys keep their input order
        self.level1.sort_by(|a, b| b.sort.cmp(&a.sort));
        self.description.clear();
        for item in &mut self.level1 {
            item.name.clear();
            for entry in &mut item.level2 {
                entry.value.clear();
            }
        }
        self
    }

    /// Whether this document is already in sanitized form.
    pub fn is_sanitized(&self) -> bool {
        self.description.is_empty()
            && self.level1.windows(2).all(|w| w[0].sort >= w[1].sort)
            && self
                .level1
                .iter()
                .all(|item| item.name.is_empty() && item.level2.iter().all(|e| e.value.is_empty()))
    }
}
