// src/output/types.rs
//! Delivery plans and their reports.

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// Which artifacts of an export to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ArtifactFormat {
    #[default]
    Html,
    Markdown,
    Both,
}

impl ArtifactFormat {
    pub fn includes_html(&self) -> bool {
        matches!(self, ArtifactFormat::Html | ArtifactFormat::Both)
    }

    pub fn includes_markdown(&self) -> bool {
        matches!(self, ArtifactFormat::Markdown | ArtifactFormat::Both)
    }
}

/// Where and how an export should be delivered.
#[derive(Debug, Clone, Default)]
pub struct DeliveryOptions {
    /// Directory for `{slug}.html` / `{slug}.md`. No files when `None`.
    pub output_dir: Option<PathBuf>,
    pub format: ArtifactFormat,
    /// Wrap the HTML into a standalone document.
    pub standalone_document: bool,
    pub clipboard: bool,
    pub pipe: bool,
}

/// The ordered list of deliveries for one export.
#[derive(Debug, Clone, Default)]
pub struct DeliveryPlan {
    pub targets: Vec<DeliveryTarget>,
}

impl DeliveryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: DeliveryTarget) -> Self {
        self.targets.push(target);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    CopyToClipboard { content: String },
    PrintToStdout { content: String },
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTarget::WriteFile { path, .. } => write!(f, "file {}", path.display()),
            DeliveryTarget::CopyToClipboard { .. } => f.write_str("clipboard"),
            DeliveryTarget::PrintToStdout { .. } => f.write_str("stdout"),
        }
    }
}

/// Outcome of executing a [`DeliveryPlan`]. Failures of one target do not
/// stop the others.
#[derive(Debug, Clone, Default)]
pub struct DeliveryReport {
    pub completed: Vec<CompletedDelivery>,
    pub failed: Vec<FailedDelivery>,
    pub stats: DeliveryStats,
}

impl DeliveryReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, delivery: CompletedDelivery) -> Self {
        self.stats.completed += 1;
        self.stats.bytes_written += delivery.bytes_written;
        self.completed.push(delivery);
        self
    }

    pub fn with_failed(mut self, delivery: FailedDelivery) -> Self {
        self.stats.failed += 1;
        self.failed.push(delivery);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Human-readable failure lines, `"{target}: {error}"`.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("{}: {}", f.target, f.error))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct CompletedDelivery {
    pub target: DeliveryTarget,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct FailedDelivery {
    pub target: DeliveryTarget,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryStats {
    pub completed: usize,
    pub failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accumulates() {
        let report = DeliveryReport::new()
            .with_completed(CompletedDelivery {
                target: DeliveryTarget::PrintToStdout {
                    content: "abc".to_string(),
                },
                bytes_written: 3,
                duration_ms: 0,
            })
            .with_failed(FailedDelivery {
                target: DeliveryTarget::CopyToClipboard {
                    content: "abc".to_string(),
                },
                error: "no display".to_string(),
            });

        assert!(!report.is_success());
        assert_eq!(report.stats.bytes_written, 3);
        assert_eq!(report.failure_messages(), vec!["clipboard: no display"]);
    }

    #[test]
    fn test_format_selection() {
        assert!(ArtifactFormat::Both.includes_html());
        assert!(ArtifactFormat::Both.includes_markdown());
        assert!(!ArtifactFormat::Html.includes_markdown());
        assert!(!ArtifactFormat::Markdown.includes_html());
    }
}
