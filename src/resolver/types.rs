/// Record kinds the engine queries; existence checks use `Address`, mail
/// routing uses `MailExchanger`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Address,
    MailExchanger,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Address => "A",
            Self::MailExchanger => "MX",
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub priority: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(priority: u16, exchange: impl Into<String>) -> Self {
        Self {
            priority,
            exchange: exchange.into(),
        }
    }
}

/// Resolved records for one (domain, kind) query. An empty set is a real
/// outcome ("looked up, found nothing"), distinct from a cache miss.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSet {
    Addresses(Vec<String>),
    MailExchangers(Vec<MxRecord>),
}

impl RecordSet {
    pub fn empty(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Address => Self::Addresses(Vec::new()),
            RecordKind::MailExchanger => Self::MailExchangers(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Addresses(addresses) => addresses.is_empty(),
            Self::MailExchangers(records) => records.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Addresses(addresses) => addresses.len(),
            Self::MailExchangers(records) => records.len(),
        }
    }
}

/// Cache key: normalized domain plus the record kind that was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: String,
    pub kind: RecordKind,
}

impl CacheKey {
    pub fn new(domain: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            domain: domain.into(),
            kind,
        }
    }
}
