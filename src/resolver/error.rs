use thiserror::Error;

/// Failure of a single resolver attempt. The fallback chain logs these and
/// moves on; they never cross the engine boundary.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("DNS lookup failed: {source}")]
    Resolve {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("{0}")]
    Backend(String),
}

impl LookupError {
    pub(crate) fn resolve(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Resolve { source }
    }
}
