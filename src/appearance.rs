//! Optional desktop appearance toggle.
//!
//! With `darkmode_switch = true`, every run tells macOS whether it should be
//! dark right now: dark mode through System Events, Night Shift through a
//! user-provided Shortcut named "nightshift". Both are best effort; a failure is
//! logged and never affects the status line or the exit code.

use std::process::{Command, Stdio};

pub trait AppearanceSwitch {
    fn set_dark(&self, dark: bool);
}

/// Drives macOS appearance through `osascript` and `shortcuts`.
pub struct MacosAppearance;

impl MacosAppearance {
    pub fn commands(dark: bool) -> Vec<Vec<String>> {
        vec![
            vec![
                "osascript".to_string(),
                "-e".to_string(),
                format!(
                    "tell app \"System Events\" to tell appearance preferences to set dark mode to {dark}"
                ),
            ],
            vec![
                "shortcuts".to_string(),
                "run".to_string(),
                format!("nightshift {dark}"),
            ],
        ]
    }
}

impl AppearanceSwitch for MacosAppearance {
    fn set_dark(&self, dark: bool) {
        log_block_start!("Setting dark mode to {dark}");
        for argv in Self::commands(dark) {
            let Some((program, args)) = argv.split_first() else {
                continue;
            };
            // Stdout carries the status line, so the children must not write to it
            let result = Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output();
            match result {
                Ok(output) if output.status.success() => log_decorated!("{program} succeeded"),
                Ok(output) => {
                    log_warning!("{program} exited with {}", output.status);
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    if !stderr.trim().is_empty() {
                        log_indented!("{}", stderr.trim());
                    }
                }
                Err(e) => log_warning!("Could not run {program}: {e}"),
            }
        }
    }
}
