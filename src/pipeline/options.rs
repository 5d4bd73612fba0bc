use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for [`crate::DomainValidator`].
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Single query against one resolver configuration.
    pub dns_attempt_timeout_ms: u64,
    /// Cap on one resolver attempt, retries included.
    pub dns_attempt_lifetime_ms: u64,
    /// Both A and MX lookups together.
    pub dns_stage_timeout_ms: u64,
    pub probe_timeout_ms: u64,
    pub smtp_port: u16,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            dns_attempt_timeout_ms: 3_000,
            dns_attempt_lifetime_ms: 10_000,
            dns_stage_timeout_ms: 10_000,
            probe_timeout_ms: 3_000,
            smtp_port: 25,
        }
    }
}

impl ValidationOptions {
    pub fn dns_attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_attempt_timeout_ms)
    }

    pub fn dns_attempt_lifetime(&self) -> Duration {
        Duration::from_millis(self.dns_attempt_lifetime_ms)
    }

    pub fn dns_stage_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_stage_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
