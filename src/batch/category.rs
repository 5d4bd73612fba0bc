use std::fmt;

use crate::pipeline::ValidationResult;

/// Closed set of failure/success buckets derived from a result's reason.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[cfg_attr(feature = "with-serde", serde(rename = "No mail servers configured"))]
    NoMailServers,
    #[cfg_attr(feature = "with-serde", serde(rename = "Domain doesn't exist"))]
    DomainDoesNotExist,
    #[cfg_attr(feature = "with-serde", serde(rename = "Mail server offline/blocked"))]
    MailServerOffline,
    #[cfg_attr(feature = "with-serde", serde(rename = "Invalid domain format"))]
    InvalidFormat,
    #[cfg_attr(feature = "with-serde", serde(rename = "Timeout errors"))]
    Timeout,
    #[cfg_attr(feature = "with-serde", serde(rename = "Can receive emails"))]
    CanReceiveEmails,
    #[cfg_attr(feature = "with-serde", serde(rename = "Other issues"))]
    Other,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::NoMailServers => "No mail servers configured",
            Self::DomainDoesNotExist => "Domain doesn't exist",
            Self::MailServerOffline => "Mail server offline/blocked",
            Self::InvalidFormat => "Invalid domain format",
            Self::Timeout => "Timeout errors",
            Self::CanReceiveEmails => "Can receive emails",
            Self::Other => "Other issues",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a result to exactly one [`Category`]. Ordered substring rules on the
/// lowercased reason; first match wins, so the mapping is deterministic and
/// total.
pub fn categorize(result: &ValidationResult) -> Category {
    let reason = result.reason.to_lowercase();
    if reason.contains("no mail servers") || reason.contains("no mx") {
        Category::NoMailServers
    } else if reason.contains("does not exist") {
        Category::DomainDoesNotExist
    } else if reason.contains("not accessible") || reason.contains("not responding") {
        Category::MailServerOffline
    } else if reason.contains("invalid domain syntax") {
        Category::InvalidFormat
    } else if reason.contains("timeout") {
        Category::Timeout
    } else if result.is_valid {
        Category::CanReceiveEmails
    } else {
        Category::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(is_valid: bool, reason: &str) -> ValidationResult {
        ValidationResult {
            domain: "example.com".into(),
            is_valid,
            reason: reason.into(),
            details: Default::default(),
        }
    }

    #[test]
    fn reasons_map_to_expected_categories() {
        let cases = [
            (false, "No mail servers configured", Category::NoMailServers),
            (false, "Domain does not exist", Category::DomainDoesNotExist),
            (
                false,
                "Mail server not accessible - Connection timeout",
                Category::MailServerOffline,
            ),
            (false, "Invalid domain syntax", Category::InvalidFormat),
            (false, "DNS lookup timeout", Category::Timeout),
            (false, "Processing timeout", Category::Timeout),
            (
                true,
                "Can receive emails - SMTP port accessible",
                Category::CanReceiveEmails,
            ),
            (false, "Not processed", Category::Other),
            (false, "Empty domain", Category::Other),
        ];
        for (is_valid, reason, expected) in cases {
            assert_eq!(categorize(&result(is_valid, reason)), expected, "{reason}");
        }
    }

    #[test]
    fn probe_detail_does_not_shadow_offline_bucket() {
        // "not accessible" outranks the embedded "timeout" substring.
        let r = result(false, "Mail server not accessible - Connection timeout");
        assert_eq!(categorize(&r), Category::MailServerOffline);
    }
}
