//! First-letter case conversion for identifiers.
//!
//! Both functions work on `char` boundaries, so a multi-byte leading
//! character is converted as a whole.

/// Uppercase the first character, leaving the rest untouched.
pub fn upper_initial(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character, leaving the rest untouched.
pub fn lower_initial(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
