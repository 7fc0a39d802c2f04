// src/output/plan.rs
//! Turns a stored export and delivery options into a [`DeliveryPlan`].

use super::paths::artifact_path;
use super::types::{DeliveryOptions, DeliveryPlan, DeliveryTarget};
use crate::error::AppError;
use crate::export::Export;
use crate::formatting::render_html_document;

/// Plans every delivery the options ask for.
///
/// Clipboard and stdout receive a single artifact: Markdown when only
/// Markdown was requested, HTML otherwise.
pub fn plan_delivery(export: &Export, options: &DeliveryOptions) -> Result<DeliveryPlan, AppError> {
    let html = if options.standalone_document {
        render_html_document(&export.frontmatter, &export.html_content)?
    } else {
        export.html_content.clone()
    };

    let markdown = if options.format.includes_markdown() {
        match &export.markdown_content {
            Some(markdown) => Some(markdown.clone()),
            None => {
                log::warn!("Export {} has no Markdown content", export.id);
                None
            }
        }
    } else {
        None
    };

    let mut plan = DeliveryPlan::new();

    if let Some(dir) = &options.output_dir {
        if options.format.includes_html() {
            plan = plan.with_target(DeliveryTarget::WriteFile {
                path: artifact_path(dir, &export.frontmatter, "html"),
                content: html.clone(),
            });
        }
        if let Some(markdown) = &markdown {
            plan = plan.with_target(DeliveryTarget::WriteFile {
                path: artifact_path(dir, &export.frontmatter, "md"),
                content: markdown.clone(),
            });
        }
    }

    let primary = if options.format.includes_html() {
        Some(html)
    } else {
        markdown
    };

    if let Some(content) = primary {
        if options.clipboard {
            plan = plan.with_target(DeliveryTarget::CopyToClipboard {
                content: content.clone(),
            });
        }
        if options.pipe {
            plan = plan.with_target(DeliveryTarget::PrintToStdout { content });
        }
    }

    log::debug!("Planned {} deliveries for export {}", plan.targets.len(), export.id);
    Ok(plan)
}
