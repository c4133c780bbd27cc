//! Field normalization and shape checks shared by the factories.

/// Canonical form of an email address: trimmed and lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Loose email shape check: `local@domain.tld` with no whitespace and a
/// single `@`. Not an RFC 5322 validator.
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // A dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Returns true if `text` has between `min` and `max` characters, inclusive.
pub(crate) fn char_len_within(text: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&text.chars().count())
}
