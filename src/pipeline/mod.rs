//! Four-stage decision procedure for one domain: syntax → DNS existence →
//! MX discovery → mail-server reachability. Stages short-circuit on the
//! first failure; the result always carries the diagnostics gathered so far.

mod options;
mod types;

pub use options::ValidationOptions;
pub use types::{ValidationDetails, ValidationResult};

use std::sync::Arc;

use tokio::time::timeout;
use tracing::debug;

use crate::probe::{Prober, TcpProber};
use crate::resolver::{MultiResolver, MxRecord, RecordResolver, ResolverCache};
use crate::validator::{is_valid_syntax, normalize_domain};

pub struct DomainValidator {
    resolver: Arc<dyn RecordResolver>,
    prober: Arc<dyn Prober>,
    options: ValidationOptions,
}

impl DomainValidator {
    /// Validator wired to the real multi-server resolver (fresh cache) and a
    /// TCP prober.
    pub fn new(options: ValidationOptions) -> Self {
        let cache = Arc::new(ResolverCache::new());
        let resolver = MultiResolver::new(
            cache,
            options.dns_attempt_timeout(),
            options.dns_attempt_lifetime(),
        );
        let prober = TcpProber::new(options.probe_timeout());
        Self::with_parts(Arc::new(resolver), Arc::new(prober), options)
    }

    pub fn with_parts(
        resolver: Arc<dyn RecordResolver>,
        prober: Arc<dyn Prober>,
        options: ValidationOptions,
    ) -> Self {
        Self {
            resolver,
            prober,
            options,
        }
    }

    /// Decide whether `raw` names a domain that can plausibly receive email.
    ///
    /// Never returns an error: every failure mode becomes an invalid verdict
    /// with a display-ready reason string.
    pub async fn validate(&self, raw: &str) -> ValidationResult {
        let domain = normalize_domain(raw);
        let mut details = ValidationDetails::default();

        if domain.is_empty() {
            return ValidationResult::rejected(domain, "Empty domain", details);
        }

        if !is_valid_syntax(&domain) {
            return ValidationResult::rejected(domain, "Invalid domain syntax", details);
        }
        details.syntax = true;

        // A and MX lookups run concurrently under one stage deadline.
        let lookups = async {
            tokio::join!(
                self.resolver.lookup_addresses(&domain),
                self.resolver.lookup_mail_exchangers(&domain),
            )
        };
        let (addresses, mx_records) = match timeout(self.options.dns_stage_timeout(), lookups).await
        {
            Ok(pair) => pair,
            Err(_) => {
                debug!(domain, "DNS stage exceeded its deadline");
                return ValidationResult::rejected(domain, "DNS lookup timeout", details);
            }
        };

        details.a_record = !addresses.is_empty();
        details.mx_records = mx_records
            .iter()
            .map(|mx| format!("{}: {}", mx.priority, mx.exchange))
            .collect();

        if addresses.is_empty() {
            return ValidationResult::rejected(domain, "Domain does not exist", details);
        }
        if mx_records.is_empty() {
            return ValidationResult::rejected(domain, "No mail servers configured", details);
        }

        let primary = lowest_priority(&mx_records);
        let outcome = self
            .prober
            .probe(&primary.exchange, self.options.smtp_port)
            .await;
        details.smtp_connection = outcome.reachable;
        details.smtp_test = Some(outcome.reason.clone());

        if outcome.reachable {
            ValidationResult {
                domain,
                is_valid: true,
                reason: format!("Can receive emails - {}", outcome.reason),
                details,
            }
        } else {
            let reason = format!("Mail server not accessible - {}", outcome.reason);
            ValidationResult::rejected(domain, reason, details)
        }
    }
}

/// Lowest preference value wins; ties keep the first record in list order.
fn lowest_priority(records: &[MxRecord]) -> &MxRecord {
    let mut primary = &records[0];
    for record in &records[1..] {
        if record.priority < primary.priority {
            primary = record;
        }
    }
    primary
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::probe::ProbeOutcome;

    #[derive(Default)]
    struct StubResolver {
        addresses: Vec<String>,
        mx_records: Vec<MxRecord>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl RecordResolver for StubResolver {
        async fn lookup_addresses(&self, _domain: &str) -> Vec<String> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.addresses.clone()
        }

        async fn lookup_mail_exchangers(&self, _domain: &str) -> Vec<MxRecord> {
            self.mx_records.clone()
        }
    }

    #[derive(Default)]
    struct StubProber {
        reachable: bool,
        probed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Prober for StubProber {
        async fn probe(&self, host: &str, _port: u16) -> ProbeOutcome {
            self.probed
                .lock()
                .expect("probed hosts lock")
                .push(host.to_string());
            if self.reachable {
                ProbeOutcome {
                    reachable: true,
                    reason: "SMTP port accessible".into(),
                }
            } else {
                ProbeOutcome {
                    reachable: false,
                    reason: "SMTP port not accessible".into(),
                }
            }
        }
    }

    fn validator_with(
        resolver: StubResolver,
        prober: Arc<StubProber>,
        options: ValidationOptions,
    ) -> DomainValidator {
        DomainValidator::with_parts(Arc::new(resolver), prober, options)
    }

    fn online_stub(mx_records: Vec<MxRecord>) -> StubResolver {
        StubResolver {
            addresses: vec!["93.184.216.34".into()],
            mx_records,
            delay: None,
        }
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let validator = validator_with(
            StubResolver::default(),
            Arc::new(StubProber::default()),
            ValidationOptions::default(),
        );
        let result = validator.validate("   ").await;
        assert!(!result.is_valid);
        assert_eq!(result.reason, "Empty domain");
    }

    #[tokio::test]
    async fn bad_syntax_is_rejected_before_dns() {
        let validator = validator_with(
            StubResolver::default(),
            Arc::new(StubProber::default()),
            ValidationOptions::default(),
        );
        let result = validator.validate("-bad.com").await;
        assert!(!result.is_valid);
        assert_eq!(result.reason, "Invalid domain syntax");
        assert!(!result.details.syntax);
    }

    #[tokio::test]
    async fn missing_a_record_means_domain_does_not_exist() {
        let validator = validator_with(
            StubResolver::default(),
            Arc::new(StubProber::default()),
            ValidationOptions::default(),
        );
        let result = validator.validate("ghost.example").await;
        assert!(!result.is_valid);
        assert_eq!(result.reason, "Domain does not exist");
        assert!(result.details.syntax);
        assert!(!result.details.a_record);
    }

    #[tokio::test]
    async fn address_without_mx_means_no_mail_servers() {
        let validator = validator_with(
            online_stub(Vec::new()),
            Arc::new(StubProber::default()),
            ValidationOptions::default(),
        );
        let result = validator.validate("webonly.example").await;
        assert!(!result.is_valid);
        assert_eq!(result.reason, "No mail servers configured");
        assert!(result.details.a_record);
    }

    #[tokio::test]
    async fn probes_the_lowest_priority_exchanger() {
        let prober = Arc::new(StubProber {
            reachable: true,
            ..Default::default()
        });
        let validator = validator_with(
            online_stub(vec![MxRecord::new(20, "b.mx"), MxRecord::new(10, "a.mx")]),
            prober.clone(),
            ValidationOptions::default(),
        );

        let result = validator.validate("example.com").await;
        assert!(result.is_valid);
        assert_eq!(result.reason, "Can receive emails - SMTP port accessible");
        assert_eq!(
            *prober.probed.lock().expect("probed hosts lock"),
            vec!["a.mx".to_string()]
        );
        assert_eq!(
            result.details.mx_records,
            vec!["20: b.mx".to_string(), "10: a.mx".to_string()]
        );
        assert!(result.details.smtp_connection);
    }

    #[tokio::test]
    async fn priority_ties_keep_first_listed_exchanger() {
        let prober = Arc::new(StubProber {
            reachable: true,
            ..Default::default()
        });
        let validator = validator_with(
            online_stub(vec![MxRecord::new(10, "first.mx"), MxRecord::new(10, "second.mx")]),
            prober.clone(),
            ValidationOptions::default(),
        );

        validator.validate("example.com").await;
        assert_eq!(
            *prober.probed.lock().expect("probed hosts lock"),
            vec!["first.mx".to_string()]
        );
    }

    #[tokio::test]
    async fn unreachable_mail_server_is_invalid_with_detail() {
        let validator = validator_with(
            online_stub(vec![MxRecord::new(10, "mx.example.com")]),
            Arc::new(StubProber::default()),
            ValidationOptions::default(),
        );
        let result = validator.validate("example.com").await;
        assert!(!result.is_valid);
        assert_eq!(
            result.reason,
            "Mail server not accessible - SMTP port not accessible"
        );
        assert_eq!(
            result.details.smtp_test.as_deref(),
            Some("SMTP port not accessible")
        );
    }

    #[tokio::test]
    async fn slow_dns_stage_times_out() {
        let options = ValidationOptions {
            dns_stage_timeout_ms: 20,
            ..Default::default()
        };
        let resolver = StubResolver {
            delay: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let validator = validator_with(resolver, Arc::new(StubProber::default()), options);

        let result = validator.validate("slow.example").await;
        assert!(!result.is_valid);
        assert_eq!(result.reason, "DNS lookup timeout");
    }

    #[tokio::test]
    async fn normalizes_before_validating() {
        let validator = validator_with(
            online_stub(vec![MxRecord::new(10, "mx.example.com")]),
            Arc::new(StubProber {
                reachable: true,
                ..Default::default()
            }),
            ValidationOptions::default(),
        );
        let result = validator.validate("https://www.Example.com/contact").await;
        assert_eq!(result.domain, "example.com");
        assert!(result.is_valid);
    }
}
