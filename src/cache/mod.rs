//! Cache module for subject details
//!
//! This module provides an in-process cache of WaniKani subjects keyed by
//! subject ID. Subject content does not change upstream, so entries have no
//! TTL and are kept until the process exits.

mod subject_cache;

pub use subject_cache::SubjectCache;
