//! In-memory subject cache
//!
//! Provides a `SubjectCache` that memoizes subject details by ID for the
//! lifetime of the process. Subjects do not change upstream, so entries never
//! expire and are never evicted.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::data::{Subject, SubjectId};

/// Thread-safe map from subject ID to subject details
///
/// A single lock guards the whole map. Requests only hold it for a lookup or an
/// insert, never across an upstream call.
#[derive(Debug, Default)]
pub struct SubjectCache {
    entries: RwLock<HashMap<SubjectId, Subject>>,
}

impl SubjectCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a subject by ID
    ///
    /// # Returns
    /// * `Some(Subject)` - a copy of the cached subject
    /// * `None` - if the subject has not been fetched yet
    pub fn get(&self, id: SubjectId) -> Option<Subject> {
        self.entries.read().get(&id).cloned()
    }

    /// Stores a subject under `id`, replacing any previous entry
    pub fn set(&self, id: SubjectId, subject: Subject) {
        self.entries.write().insert(id, subject);
    }

    /// Whether a subject is cached under `id`
    pub fn contains(&self, id: SubjectId) -> bool {
        self.entries.read().contains_key(&id)
    }

    /// Number of cached subjects
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
