/// Diagnostic detail carried by every [`ValidationResult`], whatever the
/// verdict. Fixed shape rather than an open map so each field has a type.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationDetails {
    pub syntax: bool,
    pub a_record: bool,
    /// Human-readable `"priority: host"` strings, resolver order.
    pub mx_records: Vec<String>,
    pub smtp_connection: bool,
    pub smtp_test: Option<String>,
}

/// Verdict for one input domain: valid/invalid, the terminating stage's
/// reason, and structured diagnostics. Immutable once produced.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub domain: String,
    pub is_valid: bool,
    pub reason: String,
    pub details: ValidationDetails,
}

impl ValidationResult {
    pub(crate) fn rejected(
        domain: impl Into<String>,
        reason: impl Into<String>,
        details: ValidationDetails,
    ) -> Self {
        Self {
            domain: domain.into(),
            is_valid: false,
            reason: reason.into(),
            details,
        }
    }

    /// Result for a unit that never produced a verdict (timeout, panic).
    pub(crate) fn failed(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::rejected(domain, reason, ValidationDetails::default())
    }
}
