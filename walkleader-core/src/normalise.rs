//! String and identifier canonicalisation shared by every matching stage.
//!
//! All functions accept either `&str` or `Option<&str>` and are total: an absent
//! value normalises to `""` (or `false`).

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Trim and lower-case.
pub fn normalise_text<'a>(v: impl Into<Option<&'a str>>) -> String {
    v.into().map(|s| s.trim().to_lowercase()).unwrap_or_default()
}

/// Lower-case, keep `[a-z0-9 ]`, collapse whitespace.
pub fn normalise_name<'a>(v: impl Into<Option<&'a str>>) -> String {
    let kept: String = normalise_text(v)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Digits only.
pub fn normalise_phone<'a>(v: impl Into<Option<&'a str>>) -> String {
    normalise_text(v).chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trim and lower-case; ids may legitimately contain punctuation.
pub fn normalise_id<'a>(v: impl Into<Option<&'a str>>) -> String {
    normalise_text(v)
}

/// Hyphenated lookup form: `" Al  M "` -> `"al-m"`, `"HF--52 al"` -> `"hf-52-al"`.
pub fn slug_for_lookup<'a>(v: impl Into<Option<&'a str>>) -> String {
    let mut out = String::new();
    let mut pending_hyphen = false;

    for c in normalise_text(v).chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
        // anything else is dropped without acting as a separator
    }

    out
}

/// Minimal `local@domain.tld` check. Only used to decide whether an email is usable.
pub fn valid_email<'a>(v: impl Into<Option<&'a str>>) -> bool {
    let email = normalise_text(v);
    !email.is_empty() && EMAIL_RE.is_match(&email)
}

/// Tokens of [`normalise_name`].
pub fn name_tokens<'a>(v: impl Into<Option<&'a str>>) -> Vec<String> {
    normalise_name(v)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Name-like tokens from an email's local part: `al.morgan99@x.org` -> `["al", "morgan"]`.
pub fn email_local_tokens<'a>(email: impl Into<Option<&'a str>>) -> Vec<String> {
    let email = normalise_text(email);
    let Some((local, _)) = email.split_once('@') else {
        return Vec::new();
    };

    local
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_text_handles_absent() {
        assert_eq!(normalise_text("  Alex "), "alex");
        assert_eq!(normalise_text(None), "");
        assert_eq!(normalise_text(Some("")), "");
    }

    #[test]
    fn test_normalise_name_strips_punctuation() {
        assert_eq!(normalise_name("  O'Brien,   Pat "), "obrien pat");
        assert_eq!(normalise_name("Anne-Marie\tSmith"), "annemariesmith");
        assert_eq!(normalise_name("Al  M."), "al m");
    }

    #[test]
    fn test_normalise_phone_digits_only() {
        assert_eq!(normalise_phone("+44 (0)7700 900-123"), "4407700900123");
        assert_eq!(normalise_phone(None), "");
    }

    #[test]
    fn test_normalise_id_keeps_punctuation() {
        assert_eq!(normalise_id(" HF-52/AL.M "), "hf-52/al.m");
    }

    #[test]
    fn test_slug_for_lookup() {
        assert_eq!(slug_for_lookup("Al M"), "al-m");
        assert_eq!(slug_for_lookup("  HF--52   al m "), "hf-52-al-m");
        assert_eq!(slug_for_lookup("-al- m-"), "al-m");
        assert_eq!(slug_for_lookup("O'Neil"), "oneil");
        assert_eq!(slug_for_lookup(None), "");
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email(" Alex@Example.com "));
        assert!(!valid_email("alex@example"));
        assert!(!valid_email("alex example@x.com"));
        assert!(!valid_email(None));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_email_local_tokens() {
        assert_eq!(email_local_tokens("Al.Morgan99@x.org"), vec!["al", "morgan"]);
        assert_eq!(email_local_tokens("alex@example.com"), vec!["alex"]);
        assert!(email_local_tokens("not-an-email").is_empty());
    }
}
