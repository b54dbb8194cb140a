//! Critical subject aggregation
//!
//! Combines the review statistics and subject endpoints into a single answer:
//! find the user's critical items, serve the ones already known from the
//! subject cache, and fetch only the rest from WaniKani in one batch.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::SubjectCache;
use crate::data::{Subject, SubjectId, WaniKaniClient, WaniKaniError};

/// Result of splitting subject IDs against the cache
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Subjects found in the cache, in input order
    pub cached: Vec<Subject>,
    /// IDs with no cache entry, in input order, duplicates kept
    pub uncached: Vec<SubjectId>,
}

/// Splits `ids` into cached subjects and IDs still to be fetched
///
/// Every input ID lands on exactly one side, so
/// `cached.len() + uncached.len() == ids.len()`.
pub fn partition(ids: &[SubjectId], cache: &SubjectCache) -> Partition {
    let mut partition = Partition::default();
    for &id in ids {
        match cache.get(id) {
            Some(subject) => partition.cached.push(subject),
            None => partition.uncached.push(id),
        }
    }
    partition
}

/// Orchestrates the critical-subjects flow for one request at a time
///
/// Cloning is cheap: the HTTP client and the cache are shared.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: WaniKaniClient,
    cache: Arc<SubjectCache>,
}

impl Aggregator {
    /// Creates an aggregator over a shared client and cache
    pub fn new(client: WaniKaniClient, cache: Arc<SubjectCache>) -> Self {
        Self { client, cache }
    }

    /// The subject cache this aggregator reads and fills
    pub fn cache(&self) -> &Arc<SubjectCache> {
        &self.cache
    }

    /// Fetches the critical subjects of the user owning `token`
    ///
    /// # Returns
    /// * `Ok(Vec<Subject>)` - cached subjects first, then freshly fetched ones
    /// * `Err(WaniKaniError)` - if either upstream call fails; the cache is left untouched
    pub async fn critical_subjects(&self, token: &str) -> Result<Vec<Subject>, WaniKaniError> {
        let ids = self
            .client
            .fetch_critical_subject_ids(token)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to fetch review statistics"))?;

        let Partition {
            mut cached,
            uncached,
        } = partition(&ids, &self.cache);

        debug!(
            critical = ids.len(),
            hits = cached.len(),
            misses = uncached.len(),
            "Partitioned critical subjects against cache"
        );

        if uncached.is_empty() {
            return Ok(cached);
        }

        let fetched = self
            .client
            .fetch_subjects(token, &uncached)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to fetch subjects"))?;

        for subject in &fetched {
            self.cache.set(subject.id, subject.clone());
        }
        debug!(
            fetched = fetched.len(),
            cached_total = self.cache.len(),
            "Cached fetched subjects"
        );

        cached.extend(fetched);
        Ok(cached)
    }
}
