//! Colored console echo through the build system's echo command

use super::{ProgressEvent, ProgressHandler};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::warn;

/// Announces each generation as `<echo> -E cmake_echo_color --switch=<COLOR>
/// --blue --bold <message>`.
#[derive(Debug, Clone)]
pub struct EchoHandler {
    executable: PathBuf,
    color: String,
    verbose: bool,
}

impl EchoHandler {
    pub fn new(executable: PathBuf, color: impl Into<String>, verbose: bool) -> Self {
        Self {
            executable,
            color: color.into(),
            verbose,
        }
    }

    pub fn message(&self, event: &ProgressEvent) -> Option<String> {
        match event {
            ProgressEvent::Generating {
                companion,
                output,
                input,
            } => Some(if self.verbose {
                format!("Generating {} from {}", output.display(), input.display())
            } else {
                format!("Generating {}", companion)
            }),
            _ => None,
        }
    }

    pub fn arguments(&self, message: &str) -> Vec<String> {
        vec![
            "-E".to_string(),
            "cmake_echo_color".to_string(),
            format!("--switch={}", self.color),
            "--blue".to_string(),
            "--bold".to_string(),
            message.to_string(),
        ]
    }
}

impl ProgressHandler for EchoHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        let Some(message) = self.message(event) else {
            return;
        };
        let status = Command::new(&self.executable)
            .args(self.arguments(&message))
            .stdin(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(echo = %self.executable.display(), %status, "Echo command failed"),
            Err(err) => warn!(echo = %self.executable.display(), error = %err, "Echo command failed to start"),
        }
    }
}
