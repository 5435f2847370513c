//! Application code generation
//!
//! Every application gets a human-readable code used for unauthenticated
//! status lookup, e.g. `ACMECORP-3F2A9B1C`.

use uuid::Uuid;

/// Prefix used when the company name sanitizes down to nothing.
const FALLBACK_PREFIX: &str = "APP";

/// Derive an application code.
///
/// A caller-provided code is used verbatim after trimming (the caller asserts
/// uniqueness). Otherwise the prefix is the company name stripped of
/// whitespace and non-alphanumerics, upper-cased, with `APP` as fallback; the
/// suffix is the first segment of a v4 UUID, upper-cased.
pub fn generate_application_code(
    provided_code: Option<&str>,
    company_name: Option<&str>,
) -> String {
    if let Some(code) = provided_code.map(str::trim).filter(|c| !c.is_empty()) {
        return code.to_string();
    }

    let prefix: String = company_name
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let prefix = if prefix.is_empty() {
        FALLBACK_PREFIX
    } else {
        prefix.as_str()
    };

    let id = Uuid::new_v4().simple().to_string();
    let suffix = id[..8].to_ascii_uppercase();

    format!("{}-{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_name_becomes_uppercase_prefix() {
        let code = generate_application_code(None, Some("Acme Corp"));
        assert!(code.starts_with("ACMECORP-"), "got {code}");
    }

    #[test]
    fn punctuation_and_whitespace_are_stripped() {
        let code = generate_application_code(None, Some("  United Brothers, Ltd. "));
        assert!(code.starts_with("UNITEDBROTHERSLTD-"), "got {code}");
    }

    #[test]
    fn suffix_is_eight_uppercase_hex_chars() {
        let code = generate_application_code(None, Some("Acme Corp"));
        let suffix = code.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn empty_company_name_falls_back() {
        for name in [None, Some(""), Some("   "), Some("!!!")] {
            let code = generate_application_code(None, name);
            assert!(code.starts_with("APP-"), "got {code}");
        }
    }

    #[test]
    fn provided_code_passes_through_verbatim() {
        let code = generate_application_code(Some("  LEGACY-001  "), Some("Acme Corp"));
        assert_eq!(code, "LEGACY-001");
    }

    #[test]
    fn blank_provided_code_is_ignored() {
        let code = generate_application_code(Some("   "), Some("Acme Corp"));
        assert!(code.starts_with("ACMECORP-"));
    }

    #[test]
    fn codes_are_unique_per_call() {
        let a = generate_application_code(None, Some("Acme Corp"));
        let b = generate_application_code(None, Some("Acme Corp"));
        assert_ne!(a, b);
    }
}
