use super::Color;
use serde::{Deserialize, Serialize};

/// The kind of rich text content.
///
/// Each variant carries its specific data: a mention without mention data
/// or an equation without an expression cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention { mention_type: String },
    Equation { expression: String },
}

/// One formatted run of text.
///
/// `plain_text` is what gets rendered for every variant; `href` is the
/// resolved link target Notion attaches to linked text and mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create an unannotated text item.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Create an inline equation item.
    pub fn equation(expression: &str) -> Self {
        Self {
            text_type: RichTextType::Equation {
                expression: expression.to_string(),
            },
            annotations: Annotations::default(),
            plain_text: expression.to_string(),
            href: None,
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Attach a link target to both the text payload and `href`.
    pub fn with_link(mut self, url: &str) -> Self {
        if let RichTextType::Text { link, .. } = &mut self.text_type {
            *link = Some(Link {
                url: url.to_string(),
            });
        }
        self.href = Some(url.to_string());
        self
    }

    /// Link target: explicit `href` first, then the text payload's link.
    pub fn link_target(&self) -> Option<&str> {
        self.href.as_deref().or(match &self.text_type {
            RichTextType::Text {
                link: Some(link), ..
            } => Some(link.url.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub color: Color,
}

impl Annotations {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }

    pub fn colored(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}
