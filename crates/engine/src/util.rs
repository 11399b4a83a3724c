//! Internal helpers for field validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! the rules so constructors and updates enforce the same invariants.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Trim and NFC-normalize a required display value (donor name, campaign title).
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let normalized: String = value.trim().nfc().collect();
    if normalized.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(normalized)
}

/// Trim optional free text; blank input collapses to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.nfc().collect())
}

/// Trim and lowercase an email, requiring an `@` with a non-empty local part
/// before it and a non-empty domain after it.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = value.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(EngineError::Validation(
            "provide a valid email address".to_string(),
        ));
    }
    Ok(email)
}

/// Case-folded form of a text value, stored beside it and compared by search.
///
/// SQLite's `LOWER` only folds ASCII, so folding happens here for both the
/// stored key and the search needle.
pub(crate) fn search_key(value: &str) -> String {
    value.trim().nfc().collect::<String>().to_lowercase()
}

/// Fold `needle` with [`search_key`] and escape `%`, `_` and `\` so it is
/// matched literally inside `LIKE`.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in search_key(needle).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(
            normalize_required_text("  Jane Doe  ", "donor name").unwrap(),
            "Jane Doe"
        );
        assert_eq!(
            normalize_required_text("   ", "donor name"),
            Err(EngineError::Validation(
                "donor name must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn required_text_is_nfc() {
        // "e" + combining acute accent composes into a single code point.
        let composed = normalize_required_text("Rene\u{301}", "donor name").unwrap();
        assert_eq!(composed, "Ren\u{e9}");
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(normalize_optional_text(None), None);
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(
            normalize_optional_text(Some(" Annual gala ")),
            Some("Annual gala".to_string())
        );
    }

    #[test]
    fn email_is_lowercased() {
        assert_eq!(
            normalize_email(" Jane@Example.COM ").unwrap(),
            "jane@example.com"
        );
    }

    #[test]
    fn email_requires_at() {
        for raw in ["", "jane", "@example.com", "jane@"] {
            assert!(normalize_email(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn email_may_hold_several_ats() {
        assert_eq!(normalize_email("A@b@C").unwrap(), "a@b@c");
    }

    #[test]
    fn search_key_folds_non_ascii() {
        assert_eq!(search_key(" \u{c9}mile Zola "), "\u{e9}mile zola");
        // Decomposed input folds to the same key as composed input.
        assert_eq!(search_key("E\u{301}t\u{e9}"), search_key("\u{c9}t\u{e9}"));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" Ada "), "%ada%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("\u{c9}T\u{c9}"), "%\u{e9}t\u{e9}%");
    }
}
