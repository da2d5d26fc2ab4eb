use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// Expand `${VAR_NAME}` references; unknown variables are left as written
pub(crate) fn expand_with(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    env_var_pattern()
        .replace_all(value, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resolve a leading `~/` against the home directory
pub fn expand_home(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(value)
}

/// Accept only absolute http(s) URLs and drop trailing slashes
pub fn normalize_base_url(value: &str) -> Result<String, String> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!(
            "base URL must start with http:// or https://, got {:?}",
            value
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_known_and_unknown_vars() {
        let lookup = |name: &str| (name == "HOST").then(|| "chat.local".to_string());
        assert_eq!(
            expand_with("http://${HOST}:${PORT}", lookup),
            "http://chat.local:${PORT}"
        );
    }

    #[test]
    fn test_normalize_base_url_trims_slashes() {
        assert_eq!(
            normalize_base_url("http://localhost:5000//").unwrap(),
            "http://localhost:5000"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_missing_scheme() {
        assert!(normalize_base_url("localhost:5000").is_err());
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/var/lib/saarthi"), PathBuf::from("/var/lib/saarthi"));
    }
}
