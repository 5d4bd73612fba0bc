use thiserror::Error;

/// Whole-batch input errors, surfaced before any work is dispatched.
/// Individual domain failures never become a batch error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no domains to validate")]
    EmptyInput,
    #[error("too many domains: {count} (max {max})")]
    TooManyDomains { count: usize, max: usize },
}
