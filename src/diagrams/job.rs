//! Diagram jobs and id allocation.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifecycle of a [`DiagramJob`]. Jobs are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

/// A deferred compilation of one diagram fence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramJob {
    pub id: String,
    /// Fence tag, lowercased.
    pub language: String,
    /// Normalized fence body handed to the compiler.
    pub raw_source: String,
    /// Id of the placeholder element the result replaces.
    pub target_element_id: String,
    pub status: JobStatus,
}

impl DiagramJob {
    /// A pending job targeting `<language>-<id>`.
    pub fn new(id: String, language: &str, raw_source: String) -> Self {
        let language = language.to_ascii_lowercase();
        let target_element_id = format!("{language}-{id}");
        Self {
            id,
            language,
            raw_source,
            target_element_id,
            status: JobStatus::Pending,
        }
    }
}

/// Source of unique ids for diagram jobs.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs in simple (32 hex digit) form. Unique across passes and
/// processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Monotonic counter ids. Unique for the generator's lifetime only; useful
/// when output must be reproducible.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{n:08x}")
    }
}
