// src/output/paths.rs
//! Pure path calculations for export artifacts. No I/O happens here.

use crate::formatting::Frontmatter;
use std::path::{Path, PathBuf};

const MAX_FILE_NAME_LENGTH: usize = 100;

/// Where an artifact with `extension` lands inside `dir`.
pub fn artifact_path(dir: &Path, frontmatter: &Frontmatter, extension: &str) -> PathBuf {
    dir.join(sanitize_filename(&frontmatter.file_name(extension)))
}

/// Makes a string safe to use as a single path component.
pub fn sanitize_filename(name: &str) -> String {
    let mut safe_name: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    safe_name = safe_name.trim().trim_matches('.').to_string();

    if safe_name.len() > MAX_FILE_NAME_LENGTH {
        let mut end = MAX_FILE_NAME_LENGTH;
        while !safe_name.is_char_boundary(end) {
            end -= 1;
        }
        safe_name.truncate(end);
    }

    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }

    safe_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn frontmatter(slug: &str) -> Frontmatter {
        Frontmatter {
            title: "T".to_string(),
            description: "D".to_string(),
            slug: slug.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello/World"), "Hello_World");
        assert_eq!(sanitize_filename("Test:File*Name"), "Test_File_Name");
        assert_eq!(sanitize_filename("   spaces   "), "spaces");
        assert_eq!(sanitize_filename("...dots..."), "dots");
        assert_eq!(sanitize_filename(""), "unnamed");
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(80);
        let safe = sanitize_filename(&long);
        assert!(safe.len() <= MAX_FILE_NAME_LENGTH);
        assert!(safe.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_artifact_path() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            artifact_path(dir, &frontmatter("launch-plan"), "html"),
            PathBuf::from("/tmp/out/launch-plan.html")
        );
        assert_eq!(
            artifact_path(dir, &frontmatter(""), "md"),
            PathBuf::from("/tmp/out/export.md")
        );
    }
}
