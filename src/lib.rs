#![forbid(unsafe_code)]
//! domaincheck_lib: does this domain plausibly receive email?
//!
//! The engine is a four-stage probe (syntax → DNS existence → MX discovery →
//! mail-server reachability) plus a concurrent batch orchestrator with live
//! progress tracking. Two call surfaces: [`DomainValidator::validate`] for a
//! single domain and [`BatchRunner::run_batch`] / [`BatchRunner::get_state`]
//! for bulk runs.

pub mod batch;
pub mod pipeline;
pub mod probe;
pub mod resolver;
pub mod validator;

pub use batch::{
    BatchError, BatchOptions, BatchRunner, Category, JobId, JobState, JobStatus, JobSummary,
    categorize,
};
pub use pipeline::{DomainValidator, ValidationDetails, ValidationOptions, ValidationResult};
pub use probe::{ProbeOutcome, Prober, TcpProber};
pub use resolver::{
    CacheKey, MultiResolver, MxRecord, RecordKind, RecordResolver, RecordSet, ResolverCache,
};
pub use validator::{is_valid_syntax, normalize_domain};
