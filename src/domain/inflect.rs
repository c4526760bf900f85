//! Singular/plural heuristic for field and endpoint names.
//!
//! Cardinality is decided by pluralizing a name and comparing it to itself:
//! if pluralizing changes the name, the name was singular. Names that already
//! look plural pass through `pluralize` unchanged.

/// Pluralize an English-ish identifier.
///
/// This covers the regular inflections (`category` → `categories`,
/// `box` → `boxes`, `user` → `users`) and leaves already-plural forms alone.
/// Irregular nouns are not handled; schema authors picking `people` as a
/// field name get a collection either way.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    // Already-plural endings pass through unchanged.
    if lower.ends_with("ies")
        || lower.ends_with("ses")
        || lower.ends_with("xes")
        || lower.ends_with("zes")
        || lower.ends_with("ches")
        || lower.ends_with("shes")
    {
        return word.to_string();
    }
    if lower.ends_with('s') && !lower.ends_with("ss") {
        return word.to_string();
    }

    if lower.ends_with("ss")
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }

    if lower.ends_with('y') {
        let stem_end = word.len() - 1;
        let penultimate = lower.as_bytes().get(stem_end.wrapping_sub(1)).copied();
        let vowel = matches!(penultimate, Some(b'a' | b'e' | b'i' | b'o' | b'u'));
        if !vowel {
            return format!("{}ies", &word[..stem_end]);
        }
    }

    format!("{word}s")
}

/// A name is singular when pluralizing it produces a different string.
pub fn is_singular(name: &str) -> bool {
    pluralize(name) != name
}
