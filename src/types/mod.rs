use thiserror::Error;

mod colors;
mod domain_types;
mod ids;
mod rich_text;

pub use colors::*;
pub use domain_types::*;
pub use ids::*;
pub use rich_text::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid Notion URL format: {0}")]
    InvalidNotionUrl(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
}
