use crate::aggregate::WriteDecision;
use crate::error::AutomocError;
use crate::pipeline::context::RunContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use anyhow::Result;
use async_trait::async_trait;
use filetime::FileTime;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Moves the manifest's timestamp past the freshly written output so the
/// build system invokes automoc again on its next pass.
pub struct RetriggerPhase;

#[async_trait]
impl WorkflowPhase for RetriggerPhase {
    fn name(&self) -> &'static str {
        "RetriggerPhase"
    }

    async fn execute(&self, context: &mut RunContext) -> Result<()> {
        if !context.paths.touch || context.write != Some(WriteDecision::Write) {
            return Ok(());
        }
        touch(&context.paths.manifest_file(), context.config.touch_delay).await?;
        Ok(())
    }
}

/// Sets the modification time of `path` to now, after waiting `delay` so the
/// new time is strictly later than anything written just before.
pub async fn touch(path: &Path, delay: Duration) -> Result<(), AutomocError> {
    tokio::time::sleep(delay).await;
    filetime::set_file_mtime(path, FileTime::now()).map_err(|source| AutomocError::Touch {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(manifest = %path.display(), "Manifest timestamp updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::pipeline::context::test_support::{context, RecordingRunner};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn age(path: &Path) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(1_000_000, 0)).unwrap();
    }

    fn mtime(path: &Path) -> FileTime {
        FileTime::from_last_modification_time(&fs::metadata(path).unwrap())
    }

    fn temp_context(temp: &TempDir, touch: bool, write: WriteDecision) -> RunContext {
        let mut ctx = context(
            Arc::new(MockFileSystem::new()),
            Arc::new(RecordingRunner::default()),
            "SOURCES:\n\n",
        );
        ctx.paths.output_file = temp.path().join("x_automoc.cpp");
        ctx.paths.touch = touch;
        ctx.config.touch_delay = Duration::from_millis(10);
        ctx.write = Some(write);
        ctx
    }

    #[tokio::test]
    async fn test_touches_after_write() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("x_automoc.cpp.files");
        fs::write(&manifest, "SOURCES:\n\n").unwrap();
        age(&manifest);

        let mut ctx = temp_context(&temp, true, WriteDecision::Write);
        RetriggerPhase.execute(&mut ctx).await.unwrap();

        assert!(mtime(&manifest) > FileTime::from_unix_time(1_000_000, 0));
    }

    #[tokio::test]
    async fn test_no_touch_without_flag_or_write() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("x_automoc.cpp.files");
        fs::write(&manifest, "SOURCES:\n\n").unwrap();
        age(&manifest);

        let mut without_flag = temp_context(&temp, false, WriteDecision::Write);
        RetriggerPhase.execute(&mut without_flag).await.unwrap();
        let mut unchanged = temp_context(&temp, true, WriteDecision::Unchanged);
        RetriggerPhase.execute(&mut unchanged).await.unwrap();

        assert_eq!(mtime(&manifest), FileTime::from_unix_time(1_000_000, 0));
    }

    #[tokio::test]
    async fn test_touch_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let mut ctx = temp_context(&temp, true, WriteDecision::Write);

        let err = RetriggerPhase.execute(&mut ctx).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AutomocError>(),
            Some(AutomocError::Touch { .. })
        ));
    }
}
