use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use super::cache::ResolverCache;
use super::config::{ResolverSetup, default_chain};
use super::error::LookupError;
use super::types::{CacheKey, MxRecord, RecordKind, RecordSet};

/// One link of the fallback chain. Production links wrap a
/// [`trust_dns_resolver::TokioAsyncResolver`]; tests substitute stubs.
#[async_trait]
pub(crate) trait DnsBackend: Send + Sync {
    fn label(&self) -> &'static str;
    async fn query(&self, domain: &str, kind: RecordKind) -> Result<RecordSet, LookupError>;
}

#[async_trait]
impl DnsBackend for ResolverSetup {
    fn label(&self) -> &'static str {
        self.label
    }

    async fn query(&self, domain: &str, kind: RecordKind) -> Result<RecordSet, LookupError> {
        match kind {
            RecordKind::Address => {
                let lookup = self
                    .resolver
                    .ipv4_lookup(domain)
                    .await
                    .map_err(LookupError::resolve)?;
                Ok(RecordSet::Addresses(
                    lookup.iter().map(|a| a.to_string()).collect(),
                ))
            }
            RecordKind::MailExchanger => {
                let lookup = self
                    .resolver
                    .mx_lookup(domain)
                    .await
                    .map_err(LookupError::resolve)?;
                Ok(RecordSet::MailExchangers(
                    lookup
                        .iter()
                        .map(|mx| {
                            MxRecord::new(
                                mx.preference(),
                                normalize_exchange(mx.exchange().to_utf8()),
                            )
                        })
                        .collect(),
                ))
            }
        }
    }
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

/// Resolver that retries across an ordered list of configurations until one
/// yields a non-empty answer, consulting a shared [`ResolverCache`] first.
pub struct MultiResolver {
    cache: Arc<ResolverCache>,
    chain: Vec<Box<dyn DnsBackend>>,
    attempt_lifetime: Duration,
}

impl MultiResolver {
    /// `attempt_timeout` bounds a single query against one resolver;
    /// `attempt_lifetime` caps the whole attempt (all retries included).
    pub fn new(
        cache: Arc<ResolverCache>,
        attempt_timeout: Duration,
        attempt_lifetime: Duration,
    ) -> Self {
        let chain = default_chain(attempt_timeout)
            .into_iter()
            .map(|setup| Box::new(setup) as Box<dyn DnsBackend>)
            .collect();
        Self {
            cache,
            chain,
            attempt_lifetime,
        }
    }

    pub(crate) fn with_chain(
        cache: Arc<ResolverCache>,
        chain: Vec<Box<dyn DnsBackend>>,
        attempt_lifetime: Duration,
    ) -> Self {
        Self {
            cache,
            chain,
            attempt_lifetime,
        }
    }

    /// Resolve `kind` records for `domain`.
    ///
    /// Every failure mode (timeout, NXDOMAIN, malformed response, chain
    /// exhaustion) collapses to an empty set. The result, empty or not, is
    /// written to the cache once per key; later calls are served from it.
    pub async fn resolve(&self, domain: &str, kind: RecordKind) -> RecordSet {
        let key = CacheKey::new(domain, kind);
        if let Some(hit) = self.cache.lookup(&key) {
            debug!(domain, kind = kind.as_str(), "resolver cache hit");
            return hit;
        }

        let set = resolve_chain(&self.chain, domain, kind, self.attempt_lifetime).await;
        self.cache.store(key, set.clone());
        set
    }
}

pub(crate) async fn resolve_chain(
    chain: &[Box<dyn DnsBackend>],
    domain: &str,
    kind: RecordKind,
    attempt_lifetime: Duration,
) -> RecordSet {
    for backend in chain {
        match timeout(attempt_lifetime, backend.query(domain, kind)).await {
            Ok(Ok(set)) if !set.is_empty() => {
                debug!(
                    domain,
                    kind = kind.as_str(),
                    resolver = backend.label(),
                    records = set.len(),
                    "lookup succeeded"
                );
                return set;
            }
            Ok(Ok(_)) => {
                debug!(
                    domain,
                    kind = kind.as_str(),
                    resolver = backend.label(),
                    "empty answer, trying next resolver"
                );
            }
            Ok(Err(err)) => {
                debug!(
                    domain,
                    kind = kind.as_str(),
                    resolver = backend.label(),
                    %err,
                    "lookup failed, trying next resolver"
                );
            }
            Err(_) => {
                debug!(
                    domain,
                    kind = kind.as_str(),
                    resolver = backend.label(),
                    "lookup exceeded its lifetime, trying next resolver"
                );
            }
        }
    }
    RecordSet::empty(kind)
}
