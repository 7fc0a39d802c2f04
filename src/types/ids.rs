use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

lazy_static! {
    /// Shapes a shared Notion link can take, in the order they are tried.
    /// Each pattern is matched against the raw input first and then against
    /// the input with every hyphen removed.
    static ref PAGE_URL_PATTERNS: Vec<Regex> = [
        r"(?i)([a-f0-9]{32})(?:\?|$)",
        r"(?i)([a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12})",
        r"(?i)notion\.so/(?:[^/]+/)?(?:[^-]+-)?([a-f0-9]{32})",
        r"(?i)notion\.site/(?:[^/]+/)?(?:[^-]+-)?([a-f0-9]{32})",
        r"(?i)^([a-f0-9]{32})$",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect();
}

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;

impl<T> Id<T> {
    /// Parse a bare or hyphenated Notion ID
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_hex_id(input)?;
        Ok(Self::from_normalized(normalized))
    }

    /// Create an ID from an already normalized string (internal use)
    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the ID with dashes for API calls
    pub fn to_dashed(&self) -> String {
        hyphenate(&self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

fn normalize_hex_id(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().replace('-', "");

    if normalized.len() != 32 {
        return Err(ValidationError::InvalidId(format!(
            "Invalid ID length: expected 32 characters, got {}",
            normalized.len()
        )));
    }

    if !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidId(
            "ID must contain only hexadecimal characters".to_string(),
        ));
    }

    Ok(normalized.to_lowercase())
}

/// Ids that are not 32 hex digits (kept raw from odd API payloads) are
/// returned unchanged.
fn hyphenate(value: &str) -> String {
    if value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit()) {
        format!(
            "{}-{}-{}-{}-{}",
            &value[0..8],
            &value[8..12],
            &value[12..16],
            &value[16..20],
            &value[20..32]
        )
    } else {
        value.to_string()
    }
}

/// NotionId - the page identifier resolved from a user-supplied link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String); // Store the non-hyphenated version internally

impl NotionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hyphenated UUID format for API compatibility.
    pub fn to_hyphenated(&self) -> String {
        hyphenate(&self.0)
    }

    /// Resolves a page id from a bare id, a dashed UUID, or a shared
    /// `notion.so` / `notion.site` link with or without a title slug.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::EmptyField("notion_url"));
        }
        let stripped = raw.replace('-', "");

        for pattern in PAGE_URL_PATTERNS.iter() {
            let captured = pattern
                .captures(raw)
                .or_else(|| pattern.captures(&stripped))
                .and_then(|caps| caps.get(1));

            if let Some(id) = captured {
                let hex = id.as_str().replace('-', "").to_lowercase();
                log::debug!("Resolved page id {} via pattern {}", hex, pattern.as_str());
                return Ok(NotionId(hex));
            }
        }

        Err(ValidationError::InvalidNotionUrl(raw.to_string()))
    }

    /// A random id, handy for fixtures and synthetic trees.
    pub fn new_v4() -> Self {
        NotionId(Uuid::new_v4().as_simple().to_string())
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NotionId::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl<T> From<&NotionId> for Id<T> {
    fn from(id: &NotionId) -> Self {
        Id::from_normalized(id.0.clone())
    }
}

impl From<&BlockId> for NotionId {
    fn from(id: &BlockId) -> Self {
        NotionId(id.as_str().to_string())
    }
}

impl From<&PageId> for NotionId {
    fn from(id: &PageId) -> Self {
        NotionId(id.as_str().to_string())
    }
}

/// Owner of an export. Issued by the identity provider, opaque to us.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "550e8400e29b41d4a716446655440000";

    #[test]
    fn test_id_parsing() {
        let id = BlockId::parse(HEX).unwrap();
        assert_eq!(id.as_str(), HEX);

        let id = BlockId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.as_str(), HEX);
        assert_eq!(id.to_dashed(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(PageId::parse("too-short").is_err());
        assert!(PageId::parse("not-hex-chars-00000000000000000").is_err());
        assert!(PageId::parse("").is_err());
    }

    #[test]
    fn test_page_url_shapes() {
        let shapes = [
            HEX.to_string(),
            "550e8400-e29b-41d4-a716-446655440000".to_string(),
            format!("https://www.notion.so/My-Travel-Notes-{}", HEX),
            format!("https://www.notion.so/workspace/Notes-{}?pvs=4", HEX),
            format!("https://acme.notion.site/{}", HEX),
            "https://www.notion.so/550e8400-e29b-41d4-a716-446655440000".to_string(),
            format!("https://www.notion.so/{}", HEX.to_uppercase()),
        ];

        for shape in shapes {
            let id = NotionId::parse(&shape).unwrap_or_else(|e| panic!("{}: {}", shape, e));
            assert_eq!(id.as_str(), HEX, "shape {}", shape);
        }
    }

    #[test]
    fn test_unrecognized_urls_are_rejected() {
        assert!(matches!(
            NotionId::parse("https://example.com/some/page"),
            Err(ValidationError::InvalidNotionUrl(_))
        ));
        assert!(matches!(
            NotionId::parse("   "),
            Err(ValidationError::EmptyField(_))
        ));
    }

    #[test]
    fn test_hyphenated_form() {
        let id = NotionId::parse(HEX).unwrap();
        assert_eq!(id.to_hyphenated(), "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(PageId::from(&id).as_str(), HEX);
    }

    #[test]
    fn test_odd_ids_are_not_sliced() {
        // 32 bytes, but the multi-byte characters straddle the dash offsets.
        let odd = BlockId::from_normalized("ééééééééééééééééé".chars().take(16).collect());
        assert_eq!(odd.as_str().len(), 32);
        assert_eq!(odd.to_dashed(), odd.as_str());

        let short = PageId::from_normalized("abc".to_string());
        assert_eq!(short.to_dashed(), "abc");
    }

    #[test]
    fn test_deserialize_validates() {
        let id: BlockId =
            serde_json::from_str("\"550E8400-e29b-41d4-a716-446655440000\"").unwrap();
        assert_eq!(id.as_str(), HEX);
        assert!(serde_json::from_str::<BlockId>("\"ééé\"").is_err());
        assert!(serde_json::from_str::<PageId>("\"short\"").is_err());
    }
}
