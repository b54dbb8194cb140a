//! Core data models for the WaniKani proxy
//!
//! This module contains the types exchanged with the WaniKani API: review
//! statistics used to pick critical items, and the subject records served back
//! to callers.

pub mod wanikani;

pub use wanikani::{WaniKaniClient, WaniKaniError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a WaniKani subject (radical, kanji or vocabulary)
pub type SubjectId = u64;

/// Review statistics for the items below the critical threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatistics {
    /// Number of matching statistics reported by the API
    #[serde(default)]
    pub total_count: u64,
    /// Statistic resources in the order the API returned them
    #[serde(default)]
    pub data: Vec<ReviewStatisticResource>,
}

impl ReviewStatistics {
    /// Subject IDs in API order. Duplicates are kept.
    pub fn subject_ids(&self) -> Vec<SubjectId> {
        self.data.iter().map(|entry| entry.data.subject_id).collect()
    }
}

/// Resource wrapper around a single review statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatisticResource {
    pub data: ReviewStatistic,
}

/// A single review statistic entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatistic {
    /// Subject this statistic refers to
    pub subject_id: SubjectId,
    /// "radical", "kanji" or "vocabulary"
    pub subject_type: String,
    /// Share of correct answers, 0 to 100
    pub percentage_correct: u8,
}

/// Collection envelope returned by the subjects endpoint, and the payload
/// served to callers of `/criticalSubjects`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subjects {
    #[serde(default)]
    pub data: Vec<Subject>,
}

/// A subject resource as returned by the WaniKani API
///
/// Subjects are immutable for the lifetime of the process, which is what
/// allows them to be cached without expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier
    pub id: SubjectId,
    /// Resource kind ("radical", "kanji", "vocabulary", ...)
    pub object: String,
    /// Canonical API URL of the resource
    pub url: String,
    /// Subject attributes
    pub data: SubjectData,
}

/// Attributes of a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectData {
    /// When the subject was created
    pub created_at: DateTime<Utc>,
    /// Level the subject belongs to
    pub level: u32,
    pub slug: String,
    /// Set when the subject has been retired from the curriculum
    #[serde(default)]
    pub hidden_at: Option<DateTime<Utc>>,
    /// Page on wanikani.com describing the subject
    pub document_url: String,
    /// Radicals without a unicode glyph have no characters
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub auxiliary_meanings: Vec<AuxiliaryMeaning>,
    /// Readings (absent for radicals)
    #[serde(default)]
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub component_subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub amalgamation_subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub visually_similar_subject_ids: Vec<SubjectId>,
    pub meaning_mnemonic: String,
    #[serde(default)]
    pub meaning_hint: Option<String>,
    #[serde(default)]
    pub reading_mnemonic: Option<String>,
    #[serde(default)]
    pub reading_hint: Option<String>,
}

/// A meaning of a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    pub meaning: String,
    /// Whether this is the meaning shown first
    pub primary: bool,
    /// Whether answering with this meaning counts as correct
    pub accepted_answer: bool,
}

/// Kind of an auxiliary meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuxiliaryMeaningKind {
    /// Additional accepted answer
    Whitelist,
    /// Answer that is explicitly rejected
    Blacklist,
}

/// An auxiliary meaning that is not shown but affects answer checking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryMeaning {
    pub meaning: String,
    #[serde(rename = "type")]
    pub kind: AuxiliaryMeaningKind,
}

/// A reading of a kanji or vocabulary subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Reading type for kanji ("onyomi", "kunyomi", "nanori"), absent for vocabulary
    #[serde(rename = "type", default)]
    pub reading_type: Option<String>,
    pub primary: bool,
    pub reading: String,
    pub accepted_answer: bool,
}
