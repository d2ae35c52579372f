//! Word splitting for text embedders.

/// Split text into lower-cased alphanumeric words.
///
/// Whitespace and punctuation both separate words and are dropped. Unicode
/// letters and digits are kept, so "Über-API v2" yields `["über", "api", "v2"]`.
pub fn words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
