use crate::classify::Classifier;
use crate::pipeline::context::RunContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::ProgressEvent;
use anyhow::Result;
use async_trait::async_trait;

pub struct ClassifyPhase;

#[async_trait]
impl WorkflowPhase for ClassifyPhase {
    fn name(&self) -> &'static str {
        "ClassifyPhase"
    }

    async fn execute(&self, context: &mut RunContext) -> Result<()> {
        let classifier = Classifier::new(context.file_system.as_ref(), context.extensions.clone());
        let progress = &context.progress;
        let companions = classifier.classify(context.manifest.sources(), |path| {
            progress.on_progress(&ProgressEvent::UnknownSuffix {
                path: path.to_path_buf(),
            })
        })?;

        context.emit(ProgressEvent::Classified {
            claimed: companions.claimed().count(),
            unclaimed: companions.unclaimed().count(),
        });
        context.companions = companions;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Companion;
    use crate::error::AutomocError;
    use crate::fs::MockFileSystem;
    use crate::pipeline::context::test_support::{context, RecordingRunner};
    use crate::progress::ProgressHandler;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct UnknownFiles(Mutex<Vec<PathBuf>>);

    impl ProgressHandler for UnknownFiles {
        fn on_progress(&self, event: &ProgressEvent) {
            if let ProgressEvent::UnknownSuffix { path } = event {
                self.0.lock().unwrap().push(path.clone());
            }
        }
    }

    #[tokio::test]
    async fn test_classifies_manifest_sources() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("src/a.cpp", "#include \"a.h\"\n");
        fs.add_file("src/a.h", "class A {\n  Q_OBJECT\n};\n");
        fs.add_file("src/b.cpp", "  Q_OBJECT\n#include \"b.moc\"\n");
        let mut ctx = context(
            fs,
            Arc::new(RecordingRunner::default()),
            "SOURCES:\n/mock/src/a.cpp;/mock/src/b.cpp;/mock/src/notes.txt\n",
        );

        ClassifyPhase.execute(&mut ctx).await.unwrap();

        assert_eq!(
            ctx.companions.get(Path::new("/mock/src/a.h")),
            Some(&Companion::Unclaimed("moc_a.cpp".to_string()))
        );
        assert_eq!(
            ctx.companions.get(Path::new("/mock/src/b.cpp")),
            Some(&Companion::Claimed("b.moc".to_string()))
        );
        assert_eq!(ctx.companions.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_suffix_is_reported() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("src/a.h", "class A {};\n");
        let unknown = Arc::new(UnknownFiles::default());
        let mut ctx = context(
            fs,
            Arc::new(RecordingRunner::default()),
            "SOURCES:\n/mock/src/notes.txt;/mock/src/a.h\n",
        );
        ctx.progress = Arc::clone(&unknown) as Arc<dyn ProgressHandler>;

        ClassifyPhase.execute(&mut ctx).await.unwrap();

        assert_eq!(
            *unknown.0.lock().unwrap(),
            vec![PathBuf::from("/mock/src/notes.txt")]
        );
        assert_eq!(ctx.companions.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_header_aborts() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("src/baz.cpp", "#include \"moc_baz.cpp\"\n");
        let mut ctx = context(
            fs,
            Arc::new(RecordingRunner::default()),
            "SOURCES:\n/mock/src/baz.cpp\n",
        );

        let err = ClassifyPhase.execute(&mut ctx).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AutomocError>(),
            Some(AutomocError::MissingHeader { .. })
        ));
    }
}
