//! Concurrent batch orchestration: dedup, bounded fan-out, live progress,
//! ordered results and a categorized summary.
//!
//! [`BatchRunner::run_batch`] returns a [`JobId`] immediately; a supervisor
//! task drives the workers and is the only writer of the job's [`JobState`],
//! which callers poll through [`BatchRunner::get_state`] snapshots.

mod category;
mod error;
mod state;

pub use category::{Category, categorize};
pub use error::BatchError;
pub use state::{JobId, JobState, JobStatus, JobSummary};

use std::collections::{BTreeMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::pipeline::{DomainValidator, ValidationResult};

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for [`BatchRunner`].
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Whole-batch input cap, checked before dispatch.
    pub max_domains: usize,
    /// Upper bound for the caller-supplied worker count.
    pub max_workers: usize,
    /// Deadline for one domain's whole pipeline run.
    pub unit_timeout_ms: u64,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_domains: 2_000,
            max_workers: 200,
            unit_timeout_ms: 25_000,
        }
    }
}

impl BatchOptions {
    pub fn unit_timeout(&self) -> Duration {
        Duration::from_millis(self.unit_timeout_ms)
    }
}

pub struct BatchRunner {
    validator: Arc<DomainValidator>,
    jobs: DashMap<u64, Arc<RwLock<JobState>>>,
    next_id: AtomicU64,
    options: BatchOptions,
}

impl BatchRunner {
    pub fn new(validator: Arc<DomainValidator>, options: BatchOptions) -> Self {
        Self {
            validator,
            jobs: DashMap::new(),
            next_id: AtomicU64::new(1),
            options,
        }
    }

    /// Starts validating `domains` on a pool of `worker_count` workers and
    /// returns the job handle without waiting for completion.
    ///
    /// Input is deduplicated in first-seen order (comparison on the trimmed,
    /// lowercased form; the first occurrence's spelling is kept) and blank
    /// lines are dropped. Must be called from within a tokio runtime.
    pub fn run_batch(
        &self,
        domains: Vec<String>,
        worker_count: usize,
    ) -> Result<JobId, BatchError> {
        if domains.len() > self.options.max_domains {
            return Err(BatchError::TooManyDomains {
                count: domains.len(),
                max: self.options.max_domains,
            });
        }
        let unique = dedup_preserving_order(&domains);
        if unique.is_empty() {
            return Err(BatchError::EmptyInput);
        }

        let workers = worker_count.clamp(1, self.options.max_workers);
        let id = JobId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let state = Arc::new(RwLock::new(JobState::new(unique.len())));
        self.jobs.insert(id.0, state.clone());

        info!(%id, total = unique.len(), workers, "batch started");
        tokio::spawn(run_job(
            self.validator.clone(),
            state,
            unique,
            workers,
            self.options.unit_timeout(),
        ));
        Ok(id)
    }

    /// Snapshot of the job's current state, or `None` for an unknown id.
    pub fn get_state(&self, id: JobId) -> Option<JobState> {
        self.jobs.get(&id.0).map(|state| {
            state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        })
    }
}

pub(crate) fn dedup_preserving_order(domains: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for domain in domains {
        let cleaned = domain.trim().to_lowercase();
        if cleaned.is_empty() {
            continue;
        }
        if seen.insert(cleaned) {
            unique.push(domain.trim().to_string());
        }
    }
    unique
}

async fn run_job(
    validator: Arc<DomainValidator>,
    state: Arc<RwLock<JobState>>,
    domains: Vec<String>,
    workers: usize,
    unit_timeout: Duration,
) {
    let total = domains.len();
    let started = Instant::now();
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();

    for (idx, domain) in domains.iter().cloned().enumerate() {
        let validator = validator.clone();
        let semaphore = semaphore.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let unit = AssertUnwindSafe(validator.validate(&domain)).catch_unwind();
            let result = match timeout(unit_timeout, unit).await {
                Ok(Ok(result)) => result,
                Ok(Err(panic)) => ValidationResult::failed(&domain, processing_error(&panic)),
                Err(_) => ValidationResult::failed(&domain, "Processing timeout"),
            };
            (idx, result)
        });
    }

    let mut slots: Vec<Option<ValidationResult>> = vec![None; total];
    let mut completed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, result)) => slots[idx] = Some(result),
            // Panics are caught inside the unit; a join error here means the
            // task was cancelled. Its slot is back-filled below.
            Err(err) => warn!(%err, "validation unit failed to join"),
        }
        completed += 1;

        let elapsed = started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            completed as f64 / elapsed
        } else {
            0.0
        };
        let eta = if rate > 0.0 {
            (total - completed) as f64 / rate
        } else {
            0.0
        };

        let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
        guard.completed = completed;
        guard.processing_rate = rate;
        guard.eta_seconds = eta;
    }

    // No unit is ever silently dropped.
    let results: Vec<ValidationResult> = slots
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.unwrap_or_else(|| ValidationResult::failed(&domains[idx], "Not processed"))
        })
        .collect();

    let valid = results.iter().filter(|r| r.is_valid).count();
    let invalid = total - valid;
    let mut categories: BTreeMap<Category, usize> = BTreeMap::new();
    for result in &results {
        *categories.entry(categorize(result)).or_insert(0) += 1;
    }

    let elapsed = started.elapsed().as_secs_f64();
    let summary = JobSummary {
        total,
        valid,
        invalid,
        success_rate: if total > 0 {
            valid as f64 * 100.0 / total as f64
        } else {
            0.0
        },
        processing_time_secs: elapsed,
        average_rate: if elapsed > 0.0 {
            total as f64 / elapsed
        } else {
            0.0
        },
        categories,
    };

    let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
    guard.completed = total;
    guard.results = results;
    guard.summary = Some(summary);
    guard.status = JobStatus::Completed;
    drop(guard);

    info!(total, valid, invalid, elapsed_secs = elapsed, "batch completed");
}

fn processing_error(panic: &(dyn std::any::Any + Send)) -> String {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "validation unit panicked".to_string());
    let truncated: String = message.chars().take(30).collect();
    format!("Processing error: {truncated}")
}
