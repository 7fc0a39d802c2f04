// src/output/clipboard.rs
//! Clipboard delivery: `arboard` first, then the platform's clipboard
//! command.

use crate::error::AppError;
use std::io::Write;
use std::process::{Command, Stdio};

pub fn copy_to_clipboard(content: &str) -> Result<(), AppError> {
    log::debug!("Copying {} bytes to clipboard", content.len());

    match try_arboard(content) {
        Ok(()) => {
            log::info!("Export copied to clipboard");
            return Ok(());
        }
        Err(e) => log::debug!("arboard failed: {}, trying platform command", e),
    }

    let result = copy_with_platform_command(content);
    match &result {
        Ok(()) => log::info!("Export copied to clipboard using platform command"),
        Err(e) => log::error!("Failed to copy to clipboard: {}", e),
    }
    result
}

fn try_arboard(content: &str) -> Result<(), AppError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(content)?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_with_platform_command(content: &str) -> Result<(), AppError> {
    let is_wayland = std::env::var("WAYLAND_DISPLAY").is_ok()
        || std::env::var("XDG_SESSION_TYPE").is_ok_and(|s| s == "wayland");

    if is_wayland {
        pipe_into("wl-copy", &[], content)
    } else {
        pipe_into("xclip", &["-selection", "clipboard"], content)
    }
}

#[cfg(target_os = "macos")]
fn copy_with_platform_command(content: &str) -> Result<(), AppError> {
    pipe_into("pbcopy", &[], content)
}

#[cfg(target_os = "windows")]
fn copy_with_platform_command(content: &str) -> Result<(), AppError> {
    pipe_into("clip", &[], content)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn copy_with_platform_command(_content: &str) -> Result<(), AppError> {
    Err(AppError::Clipboard(
        "Clipboard not supported on this platform".to_string(),
    ))
}

/// Spawns `program`, writes `content` to its stdin and waits for it.
#[cfg_attr(
    not(any(target_os = "linux", target_os = "macos", target_os = "windows")),
    allow(dead_code)
)]
fn pipe_into(program: &str, args: &[&str], content: &str) -> Result<(), AppError> {
    log::debug!("Attempting to copy with {}", program);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| AppError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(AppError::Clipboard(format!(
            "{} failed: {}",
            program,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}
