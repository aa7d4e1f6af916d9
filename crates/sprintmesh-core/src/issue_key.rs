use regex::Regex;

/// Turn a raw issue reference into a canonical `NAMESPACE-123` key.
///
/// - `proj-123` style keys come back with the namespace uppercased.
/// - Bare numbers are prefixed with the (uppercased) project namespace.
/// - Anything else is returned trimmed and otherwise untouched; the remote
///   system is the one that rejects it.
pub fn normalize_issue_key(namespace: &str, raw: &str) -> String {
    let raw = raw.trim();
    let re = Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)-(\d+)$").expect("regex");
    if let Some(caps) = re.captures(raw) {
        return format!("{}-{}", caps[1].to_uppercase(), &caps[2]);
    }

    let namespace = namespace.trim();
    if is_numeric(raw) && !namespace.is_empty() {
        return format!("{}-{}", namespace.to_uppercase(), raw);
    }
    raw.to_string()
}

/// Browse link for a project (or issue) key on the given server.
pub fn browse_url(server: &str, key: &str) -> String {
    format!("{}/browse/{}", server.trim().trim_end_matches('/'), key.trim())
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
