// src/output/writer.rs
//! Executes delivery plans. The only place in the crate that writes
//! artifacts to disk, the clipboard, or stdout.

use super::clipboard::copy_to_clipboard;
use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Runs every target in order and reports each outcome.
pub fn deliver(plan: DeliveryPlan) -> DeliveryReport {
    let mut report = DeliveryReport::new();
    let start_time = Instant::now();

    log::info!("Executing delivery plan with {} targets", plan.targets.len());

    for target in plan.targets {
        let started = Instant::now();
        match execute(&target) {
            Ok(bytes_written) => {
                report = report.with_completed(CompletedDelivery {
                    target,
                    bytes_written,
                    duration_ms: started.elapsed().as_millis() as u64,
                });
            }
            Err(e) => {
                log::error!("Delivery to {} failed: {}", target, e);
                report = report.with_failed(FailedDelivery {
                    target,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;
    log::info!(
        "Delivery complete: {} succeeded, {} failed in {}ms",
        report.stats.completed,
        report.stats.failed,
        report.stats.total_duration_ms
    );

    report
}

/// Like [`deliver`], but any failed target turns into
/// [`AppError::DeliveryFailed`].
pub fn deliver_all(plan: DeliveryPlan) -> Result<DeliveryReport, AppError> {
    let report = deliver(plan);
    if report.is_success() {
        Ok(report)
    } else {
        Err(AppError::DeliveryFailed {
            failures: report.failure_messages(),
        })
    }
}

fn execute(target: &DeliveryTarget) -> Result<usize, AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::CopyToClipboard { content } => {
            copy_to_clipboard(content)?;
            Ok(content.len())
        }
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    log::info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("notion2blog-out-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_writes_files_and_creates_directories() {
        let dir = temp_dir();
        let path = dir.join("nested").join("page.html");
        let plan = DeliveryPlan::new().with_target(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "<p>hi</p>\n".to_string(),
        });

        let report = deliver_all(plan).unwrap();
        assert_eq!(report.stats.completed, 1);
        assert_eq!(report.stats.bytes_written, 10);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>hi</p>\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failure_does_not_stop_other_targets() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let good = dir.join("good.md");

        let plan = DeliveryPlan::new()
            .with_target(DeliveryTarget::WriteFile {
                path: blocker.join("page.html"),
                content: "x".to_string(),
            })
            .with_target(DeliveryTarget::WriteFile {
                path: good.clone(),
                content: "# ok\n".to_string(),
            });

        let report = deliver(plan);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.completed, 1);
        assert!(good.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
