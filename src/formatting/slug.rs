// src/formatting/slug.rs
//! URL slugs for heading anchors and export file names.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_SLUG_RUN: Regex = Regex::new(r"[^a-z0-9]+").expect("slug separator regex is valid");
}

/// Lowercases `text`, collapses every run of characters outside `[a-z0-9]`
/// into one hyphen and trims hyphens from both ends.
///
/// Used for heading anchors and export slugs. Text with no ASCII
/// alphanumerics yields an empty slug.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_collapses_to_single_hyphen() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust -- the  Book  "), "rust-the-book");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("?!…"), "");
    }

    #[test]
    fn test_non_ascii_letters_become_separators() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("2024 Roadmap"), "2024-roadmap");
    }
}
