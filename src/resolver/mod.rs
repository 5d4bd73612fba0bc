//! Multi-server DNS resolution with a shared per-run cache.
//!
//! [`MultiResolver::resolve`] walks an ordered chain of resolver
//! configurations (system first, then well-known public resolvers) until one
//! returns a non-empty answer. Failures are swallowed into an empty record
//! set; the consumer cannot tell "no records" from "every resolver failed",
//! matching the probe semantics this crate exposes.

mod cache;
mod config;
mod error;
mod multi;
mod types;

pub use cache::ResolverCache;
pub use error::LookupError;
pub use multi::MultiResolver;
pub use types::{CacheKey, MxRecord, RecordKind, RecordSet};

use async_trait::async_trait;

/// Record lookups as the validation pipeline consumes them.
#[async_trait]
pub trait RecordResolver: Send + Sync {
    /// Address (A) records as opaque IP strings; empty when none resolve.
    async fn lookup_addresses(&self, domain: &str) -> Vec<String>;
    /// Mail-exchanger (MX) records; empty when none resolve.
    async fn lookup_mail_exchangers(&self, domain: &str) -> Vec<MxRecord>;
}

#[async_trait]
impl RecordResolver for MultiResolver {
    async fn lookup_addresses(&self, domain: &str) -> Vec<String> {
        match self.resolve(domain, RecordKind::Address).await {
            RecordSet::Addresses(addresses) => addresses,
            RecordSet::MailExchangers(_) => Vec::new(),
        }
    }

    async fn lookup_mail_exchangers(&self, domain: &str) -> Vec<MxRecord> {
        match self.resolve(domain, RecordKind::MailExchanger).await {
            RecordSet::MailExchangers(records) => records,
            RecordSet::Addresses(_) => Vec::new(),
        }
    }
}
