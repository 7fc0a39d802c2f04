// src/metadata.rs
//! Page title and icon extraction.

use crate::constants::UNTITLED_PAGE;
use crate::formatting::plain_text;
use crate::model::{Icon, Page, PropertyValue};

/// Text of the first title property that has any text, or "Untitled".
///
/// Notion guarantees one title property per page, but its name varies
/// ("Name", "title", localized names), so properties are scanned in the
/// order the API returned them.
pub fn page_title(page: &Page) -> String {
    page.properties
        .values()
        .find_map(|value| match value {
            PropertyValue::Title(items)
                if items.first().is_some_and(|item| !item.plain_text.is_empty()) =>
            {
                Some(plain_text(items))
            }
            _ => None,
        })
        .unwrap_or_else(|| UNTITLED_PAGE.to_string())
}

/// The page's emoji icon, or an empty string for image icons and pages
/// without one.
pub fn page_icon(page: &Page) -> String {
    match &page.icon {
        Some(Icon::Emoji { emoji }) => emoji.clone(),
        Some(Icon::External { .. }) | Some(Icon::File { .. }) | None => String::new(),
    }
}
