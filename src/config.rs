// src/config.rs
//! Command-line input and the configuration resolved from it.

use crate::constants::{DEFAULT_ENRICHMENT_MODEL, DEFAULT_ENRICHMENT_URL, MAX_FETCH_CONCURRENCY};
use crate::error::AppError;
use crate::export::{FileExportStore, Plan};
use crate::output::{ArtifactFormat, DeliveryOptions};
use crate::types::{ApiKey, EnrichmentKey, UserId, ValidatedUrl, ValidationError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

pub const NOTION_API_KEY_VAR: &str = "NOTION_API_KEY";
pub const ENRICHMENT_KEY_VAR: &str = "NOTION2BLOG_ENRICHMENT_KEY";
pub const ENRICHMENT_URL_VAR: &str = "NOTION2BLOG_ENRICHMENT_URL";
pub const ENRICHMENT_MODEL_VAR: &str = "NOTION2BLOG_ENRICHMENT_MODEL";
pub const ACCESS_TOKEN_VAR: &str = "NOTION2BLOG_TOKEN";

const DEFAULT_USER: &str = "local";

/// Export shared Notion pages as styled HTML and Markdown blog posts.
#[derive(Parser, Debug)]
#[command(name = "notion2blog", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a Notion page and store the export
    Export(ExportArgs),
    /// List your stored exports, newest first
    List(ListArgs),
    /// Print or write a stored export
    Show(ShowArgs),
    /// Delete one of your stored exports
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Notion page URL or ID (e.g., "https://www.notion.so/...")
    pub notion_url: String,

    /// Who the export belongs to
    #[arg(long, default_value = DEFAULT_USER)]
    pub user: String,

    /// Subscription plan, which sets the monthly export quota
    #[arg(long, value_enum, default_value_t = Plan::Free)]
    pub plan: Plan,

    /// Directory holding stored exports
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Write `{slug}.html` / `{slug}.md` into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Which artifacts to deliver
    #[arg(long, value_enum, default_value_t = ArtifactFormat::Html)]
    pub format: ArtifactFormat,

    /// Wrap the HTML into a standalone document
    #[arg(long, default_value_t = false)]
    pub document: bool,

    /// Copy the export to the clipboard
    #[arg(short = 'b', long, default_value_t = false)]
    pub clipboard: bool,

    /// Print the export to stdout for piping
    #[arg(short, long, default_value_t = false)]
    pub pipe: bool,

    /// Skip SEO enrichment and derive metadata from the title
    #[arg(long, default_value_t = false)]
    pub no_enrich: bool,

    /// Number of concurrent block requests (default: auto)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Access token, checked against NOTION2BLOG_TOKEN when that is set
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value = DEFAULT_USER)]
    pub user: String,

    #[arg(long)]
    pub store_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    pub id: Uuid,

    #[arg(long, default_value = DEFAULT_USER)]
    pub user: String,

    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ArtifactFormat::Html)]
    pub format: ArtifactFormat,

    #[arg(long, default_value_t = false)]
    pub document: bool,

    /// Write files here instead of printing
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'b', long, default_value_t = false)]
    pub clipboard: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    pub id: Uuid,

    #[arg(long, default_value = DEFAULT_USER)]
    pub user: String,

    #[arg(long)]
    pub store_dir: Option<PathBuf>,
}

/// Chat-completions endpoint used for SEO suggestions.
#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    pub key: EnrichmentKey,
    pub endpoint: ValidatedUrl,
    pub model: String,
}

/// Everything an `export` run needs, validated.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub notion_url: String,
    pub api_key: ApiKey,
    pub user_id: UserId,
    pub plan: Plan,
    pub store_dir: PathBuf,
    pub delivery: DeliveryOptions,
    /// `None` disables enrichment.
    pub enrichment: Option<EnrichmentSettings>,
    pub concurrency: Option<usize>,
    /// Token callers must present, from the environment.
    pub required_token: Option<String>,
    /// Token this caller presented.
    pub credentials: Option<String>,
}

impl ExportConfig {
    /// Resolves CLI input against the process environment.
    pub fn resolve(args: ExportArgs) -> Result<Self, AppError> {
        Self::resolve_with(args, |name| std::env::var(name).ok())
    }

    /// Resolves CLI input against `env`, a variable lookup.
    pub fn resolve_with(
        args: ExportArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let non_blank = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(NOTION_API_KEY_VAR).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                NOTION_API_KEY_VAR
            ))
        })?;
        let api_key = ApiKey::new(api_key)?;

        if let Some(concurrency) = args.concurrency {
            if concurrency == 0 || concurrency > MAX_FETCH_CONCURRENCY {
                return Err(ValidationError::OutOfBounds {
                    value: u32::try_from(concurrency).unwrap_or(u32::MAX),
                    min: 1,
                    max: MAX_FETCH_CONCURRENCY as u32,
                }
                .into());
            }
        }

        let enrichment = if args.no_enrich {
            None
        } else {
            match non_blank(ENRICHMENT_KEY_VAR) {
                Some(key) => Some(EnrichmentSettings {
                    key: EnrichmentKey::new(key)?,
                    endpoint: ValidatedUrl::parse(
                        &non_blank(ENRICHMENT_URL_VAR)
                            .unwrap_or_else(|| DEFAULT_ENRICHMENT_URL.to_string()),
                    )?,
                    model: non_blank(ENRICHMENT_MODEL_VAR)
                        .unwrap_or_else(|| DEFAULT_ENRICHMENT_MODEL.to_string()),
                }),
                None => {
                    log::info!("{} not set, SEO metadata will be derived", ENRICHMENT_KEY_VAR);
                    None
                }
            }
        };

        Ok(ExportConfig {
            notion_url: args.notion_url,
            api_key,
            user_id: UserId::new(args.user)?,
            plan: args.plan,
            store_dir: args.store_dir.unwrap_or_else(FileExportStore::default_dir),
            delivery: DeliveryOptions {
                output_dir: args.output_dir,
                format: args.format,
                standalone_document: args.document,
                clipboard: args.clipboard,
                pipe: args.pipe,
            },
            enrichment,
            concurrency: args.concurrency,
            required_token: non_blank(ACCESS_TOKEN_VAR),
            credentials: args.token,
        })
    }
}

impl ShowArgs {
    /// Prints to stdout unless a file or clipboard destination was asked for.
    pub fn delivery_options(&self) -> DeliveryOptions {
        DeliveryOptions {
            output_dir: self.output_dir.clone(),
            format: self.format,
            standalone_document: self.document,
            clipboard: self.clipboard,
            pipe: self.output_dir.is_none() && !self.clipboard,
        }
    }
}

/// The store directory argument, or the default location.
pub fn store_dir_or_default(store_dir: Option<PathBuf>) -> PathBuf {
    store_dir.unwrap_or_else(FileExportStore::default_dir)
}
