use super::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Notion's color vocabulary for text annotations and block backgrounds.
///
/// Deserialization is lenient: anything Notion sends that is not in the
/// palette collapses to `Default`, which renders without a color wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    #[serde(rename = "gray_background")]
    GrayBackground,
    #[serde(rename = "brown_background")]
    BrownBackground,
    #[serde(rename = "orange_background")]
    OrangeBackground,
    #[serde(rename = "yellow_background")]
    YellowBackground,
    #[serde(rename = "green_background")]
    GreenBackground,
    #[serde(rename = "blue_background")]
    BlueBackground,
    #[serde(rename = "purple_background")]
    PurpleBackground,
    #[serde(rename = "pink_background")]
    PinkBackground,
    #[serde(rename = "red_background")]
    RedBackground,
}

impl std::str::FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Color::Default),
            "gray" => Ok(Color::Gray),
            "brown" => Ok(Color::Brown),
            "orange" => Ok(Color::Orange),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "purple" => Ok(Color::Purple),
            "pink" => Ok(Color::Pink),
            "red" => Ok(Color::Red),
            "gray_background" => Ok(Color::GrayBackground),
            "brown_background" => Ok(Color::BrownBackground),
            "orange_background" => Ok(Color::OrangeBackground),
            "yellow_background" => Ok(Color::YellowBackground),
            "green_background" => Ok(Color::GreenBackground),
            "blue_background" => Ok(Color::BlueBackground),
            "purple_background" => Ok(Color::PurpleBackground),
            "pink_background" => Ok(Color::PinkBackground),
            "red_background" => Ok(Color::RedBackground),
            _ => Err(ValidationError::InvalidColor(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|name| name.parse().ok())
            .unwrap_or(Color::Default))
    }
}

impl Color {
    /// Convert to the wire name Notion uses
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Red => "red",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
            Color::RedBackground => "red_background",
        }
    }

    /// Check if this is a background (highlight) color
    pub fn is_background(&self) -> bool {
        self.as_str().ends_with("_background")
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }

    /// Palette name without the `_background` suffix.
    pub fn base_name(&self) -> &'static str {
        let name = self.as_str();
        name.strip_suffix("_background").unwrap_or(name)
    }

    /// Hex fallback used next to the CSS custom property.
    pub fn hex(&self) -> &'static str {
        match self.base_name() {
            "gray" => "9b9b9b",
            "brown" => "8b4513",
            "orange" => "ff8c00",
            "yellow" => "ffd700",
            "green" => "228b22",
            "blue" => "1e90ff",
            "purple" => "9370db",
            "pink" => "ff69b4",
            "red" => "dc143c",
            _ => "000000",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
