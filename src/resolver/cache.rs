use dashmap::DashMap;

use super::types::{CacheKey, RecordSet};

/// Shared, process-lifetime DNS cache keyed by (domain, record kind).
///
/// Append-only and never evicted: an entry's presence is the hit signal, and
/// an empty [`RecordSet`] is a legitimate cached value. The cache is an
/// optimization for batches where domains (or MX targets) recur; a miss just
/// means "ask the resolver".
#[derive(Debug, Default)]
pub struct ResolverCache {
    entries: DashMap<CacheKey, RecordSet>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &CacheKey) -> Option<RecordSet> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Stores `set` under `key`; the first store wins, later ones are no-ops.
    pub fn store(&self, key: CacheKey, set: RecordSet) {
        self.entries.entry(key).or_insert(set);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::types::RecordKind;

    fn key(domain: &str) -> CacheKey {
        CacheKey::new(domain, RecordKind::Address)
    }

    #[test]
    fn miss_then_hit() {
        let cache = ResolverCache::new();
        assert!(cache.lookup(&key("example.com")).is_none());

        let set = RecordSet::Addresses(vec!["93.184.216.34".into()]);
        cache.store(key("example.com"), set.clone());
        assert_eq!(cache.lookup(&key("example.com")), Some(set));
    }

    #[test]
    fn empty_set_is_a_hit_not_a_miss() {
        let cache = ResolverCache::new();
        cache.store(key("nomx.example"), RecordSet::empty(RecordKind::Address));
        let hit = cache.lookup(&key("nomx.example")).expect("cached empty set");
        assert!(hit.is_empty());
    }

    #[test]
    fn first_store_wins() {
        let cache = ResolverCache::new();
        let first = RecordSet::Addresses(vec!["1.2.3.4".into()]);
        cache.store(key("example.com"), first.clone());
        cache.store(
            key("example.com"),
            RecordSet::Addresses(vec!["5.6.7.8".into()]),
        );
        assert_eq!(cache.lookup(&key("example.com")), Some(first));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_distinguish_record_kinds() {
        let cache = ResolverCache::new();
        cache.store(
            CacheKey::new("example.com", RecordKind::Address),
            RecordSet::Addresses(vec!["1.2.3.4".into()]),
        );
        assert!(
            cache
                .lookup(&CacheKey::new("example.com", RecordKind::MailExchanger))
                .is_none()
        );
    }
}
