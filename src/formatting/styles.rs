// src/formatting/styles.rs

/// Stylesheet shipped at the top of every exported page.
const PAGE_STYLESHEET: &str = r#"<style>
  .indent { margin-left: 1.5em; }
  .toggle { margin: 1em 0; border: 1px solid #e0e0e0; border-radius: 4px; }
  .toggle summary { padding: 0.75em 1em; cursor: pointer; font-weight: 500; }
  .toggle summary:hover { background: #f5f5f5; }
  .toggle-content { padding: 0.5em 1em 1em; border-top: 1px solid #e0e0e0; }
  .callout { display: flex; gap: 0.75em; padding: 1em; margin: 1em 0; border-radius: 4px; background: #f7f6f3; }
  .callout-icon { font-size: 1.2em; }
  .callout-content { flex: 1; }
{callout_colors}
  .image-container { margin: 1.5em 0; text-align: center; }
  .image-container img { max-width: 100%; height: auto; border-radius: 4px; }
  .image-container figcaption, .audio-container figcaption, .video-container figcaption { margin-top: 0.5em; font-size: 0.9em; color: #666; }
  .video-container, .audio-container { margin: 1.5em 0; }
  .video-container iframe, .video-container video { width: 100%; aspect-ratio: 16/9; border-radius: 4px; }
  .audio-container audio { width: 100%; }
  .table-container { overflow-x: auto; margin: 1.5em 0; }
  .table-container table { width: 100%; border-collapse: collapse; }
  .table-container th, .table-container td { padding: 0.5em 1em; border: 1px solid #e0e0e0; text-align: left; }
  .table-container th { background: #f5f5f5; font-weight: 600; }
  .columns { display: flex; gap: 1.5em; margin: 1em 0; }
  .column { flex: 1; min-width: 0; }
  .todo-item { display: flex; align-items: flex-start; gap: 0.5em; margin: 0.5em 0; }
  .todo-item input { margin-top: 0.25em; }
  blockquote { margin: 1em 0; padding-left: 1em; border-left: 3px solid #e0e0e0; color: #555; }
  pre { background: #f5f5f5; padding: 1em; border-radius: 4px; overflow-x: auto; }
  code { font-family: 'SF Mono', Monaco, 'Andale Mono', monospace; font-size: 0.9em; }
  p code { background: #f0f0f0; padding: 0.2em 0.4em; border-radius: 3px; }
  .code-caption { margin-top: 0.5em; font-size: 0.85em; color: #666; }
  .embed-container, .bookmark { margin: 1em 0; }
  .bookmark { display: block; padding: 1em; border: 1px solid #e0e0e0; border-radius: 4px; text-decoration: none; color: inherit; }
  .bookmark:hover { background: #f5f5f5; }
  .child-page, .child-database { padding: 0.5em; margin: 0.5em 0; background: #f7f6f3; border-radius: 4px; }
  .file-attachment { margin: 1em 0; }
  .file-caption { margin: 0.25em 0 0; font-size: 0.85em; color: #666; }
  .link-preview { margin: 1em 0; }
  .equation { font-family: 'Times New Roman', serif; font-size: 1.1em; margin: 1em 0; }
  hr { border: none; border-top: 1px solid #e0e0e0; margin: 2em 0; }
  @media (max-width: 768px) { .columns { flex-direction: column; } }
</style>"#;

/// Callout background classes, `(color name, hex)`.
const CALLOUT_BACKGROUNDS: [(&str, &str); 9] = [
    ("gray", "f1f1ef"),
    ("brown", "f4eeee"),
    ("orange", "fbecdd"),
    ("yellow", "fbf3db"),
    ("green", "edf3ec"),
    ("blue", "e7f3f8"),
    ("purple", "f4f0f7"),
    ("pink", "f9f0f3"),
    ("red", "fdebec"),
];

/// The `<style>` block prepended to every exported page.
pub fn page_stylesheet() -> String {
    let callout_colors = CALLOUT_BACKGROUNDS
        .iter()
        .map(|(name, hex)| format!("  .callout-{name}_background {{ background: #{hex}; }}"))
        .collect::<Vec<_>>()
        .join("\n");

    PAGE_STYLESHEET.replace("{callout_colors}", &callout_colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_covers_every_callout_background() {
        let css = page_stylesheet();
        assert!(css.starts_with("<style>"));
        assert!(css.ends_with("</style>"));
        assert!(css.contains(".callout-red_background { background: #fdebec; }"));
        assert_eq!(css.matches("_background {").count(), 9);
        assert!(!css.contains("{callout_colors}"));
    }
}
