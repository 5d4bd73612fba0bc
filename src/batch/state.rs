use std::collections::BTreeMap;
use std::fmt;

use super::category::Category;
use crate::pipeline::ValidationResult;

/// Handle for one batch run, issued by [`crate::BatchRunner::run_batch`].
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Completed,
}

/// Final accounting for a completed batch.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Percentage of domains that can receive email.
    pub success_rate: f64,
    pub processing_time_secs: f64,
    /// Domains per second over the whole run.
    pub average_rate: f64,
    pub categories: BTreeMap<Category, usize>,
}

/// Progress snapshot of a batch run. The orchestrator is the sole writer;
/// callers only ever observe clones. Status transitions Running → Completed
/// exactly once and Completed is terminal.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct JobState {
    pub status: JobStatus,
    pub total: usize,
    pub completed: usize,
    /// Completions per second so far; 0 until the first unit finishes.
    pub processing_rate: f64,
    /// Estimated seconds remaining; 0 when the rate is still 0.
    pub eta_seconds: f64,
    /// Empty while running; deduplicated input order once completed.
    pub results: Vec<ValidationResult>,
    pub summary: Option<JobSummary>,
}

impl JobState {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            status: JobStatus::Running,
            total,
            completed: 0,
            processing_rate: 0.0,
            eta_seconds: 0.0,
            results: Vec::new(),
            summary: None,
        }
    }
}
