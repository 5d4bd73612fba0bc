/// Normalise une entrée utilisateur en nom de domaine nu.
///
/// Trims whitespace, lowercases, strips `http://`/`https://` and a leading
/// `www.`, drops everything after the first `/`, then converts to ASCII via
/// IDNA. A failed IDNA conversion returns the stripped string unchanged and
/// lets the syntax check reject it.
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim().to_lowercase();

    for scheme in ["http://", "https://"] {
        if let Some(rest) = domain.strip_prefix(scheme) {
            domain = rest.to_string();
            break;
        }
    }
    if let Some(rest) = domain.strip_prefix("www.") {
        domain = rest.to_string();
    }
    if let Some((host, _path)) = domain.split_once('/') {
        domain = host.to_string();
    }

    match idna::domain_to_ascii(&domain) {
        Ok(ascii) => ascii,
        Err(_) => domain,
    }
}
