use super::GeneratorSettings;
use crate::error::GenerationError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Produces one companion file from one input.
#[async_trait]
pub trait GeneratorRunner: Send + Sync {
    async fn generate(
        &self,
        settings: &GeneratorSettings,
        input: &Path,
        output: &Path,
    ) -> Result<(), GenerationError>;
}

/// Runs the external generator executable as a child process. Its output
/// streams are forwarded to ours.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner {
    verbose: bool,
}

impl ProcessRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

#[async_trait]
impl GeneratorRunner for ProcessRunner {
    async fn generate(
        &self,
        settings: &GeneratorSettings,
        input: &Path,
        output: &Path,
    ) -> Result<(), GenerationError> {
        if self.verbose {
            println!("{}", settings.command_line(output, input));
        }

        let mut child = Command::new(settings.executable())
            .args(settings.arguments(output, input))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| GenerationError::FailedToStart {
                output: output.to_path_buf(),
                source,
            })?;

        let status = child.wait().await.map_err(|source| GenerationError::Wait {
            output: output.to_path_buf(),
            source,
        })?;

        debug!(output = %output.display(), %status, "Generator finished");
        if status.success() {
            Ok(())
        } else {
            Err(GenerationError::ExitStatus {
                output: output.to_path_buf(),
                status,
            })
        }
    }
}
