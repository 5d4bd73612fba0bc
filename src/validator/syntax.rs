const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Vérifie la syntaxe d'un nom de domaine (forme `label(.label)*`).
///
/// Labels are 1–63 ASCII alphanumeric/hyphen characters with no leading or
/// trailing hyphen; the whole string is capped at 253 characters.
pub fn is_valid_syntax(domain: &str) -> bool {
    let domain = domain.trim();
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    domain.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_common_domains() {
        assert!(is_valid_syntax("example.com"));
        assert!(is_valid_syntax("sub.example.co.uk"));
        assert!(is_valid_syntax("xn--exmple-cua.com"));
        assert!(is_valid_syntax("a-b.example.com"));
    }

    #[test]
    fn rejects_edge_hyphens() {
        assert!(!is_valid_syntax("-bad.com"));
        assert!(!is_valid_syntax("bad-.com"));
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(!is_valid_syntax(""));
        assert!(!is_valid_syntax("   "));
        let long = format!("{}.com", "a".repeat(250));
        assert_eq!(long.len(), 254);
        assert!(!is_valid_syntax(&long));
    }

    #[test]
    fn rejects_long_label() {
        let label = "a".repeat(64);
        assert!(!is_valid_syntax(&format!("{label}.com")));
    }

    #[test]
    fn rejects_empty_labels() {
        assert!(!is_valid_syntax(".example.com"));
        assert!(!is_valid_syntax("example..com"));
        assert!(!is_valid_syntax("example.com."));
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(!is_valid_syntax("exa_mple.com"));
        assert!(!is_valid_syntax("exämple.com"));
    }

    proptest! {
        #[test]
        fn never_panics(input in "\\PC*") {
            let _ = is_valid_syntax(&input);
        }

        #[test]
        fn accepted_implies_bounds(input in "[a-z0-9]{1,20}(\\.[a-z0-9]{1,20}){0,5}") {
            prop_assert!(is_valid_syntax(&input));
            prop_assert!(input.trim().len() <= 253);
        }
    }
}
