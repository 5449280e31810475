//! Run-scoped state shared by the pipeline phases

use std::path::PathBuf;
use std::sync::Arc;

use crate::aggregate::WriteDecision;
use crate::classify::{CompanionMap, HeaderExtensions};
use crate::config::AutomocConfig;
use crate::fs::FileSystem;
use crate::generator::{GenerationOutcome, GeneratorRunner};
use crate::manifest::{manifest_path, Manifest};
use crate::progress::{ProgressEvent, ProgressHandler};

/// Paths handed over by the build system on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub output_file: PathBuf,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub generator: PathBuf,
    pub echo: PathBuf,
    /// Move the manifest's timestamp forward after a write
    pub touch: bool,
}

impl RunPaths {
    pub fn manifest_file(&self) -> PathBuf {
        manifest_path(&self.output_file)
    }

    /// Where a companion named `name` is generated.
    pub fn companion_output(&self, name: &str) -> PathBuf {
        self.build_dir.join(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// At least one generator invocation failed
    Failed,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Failed => 1,
        }
    }
}

pub struct RunContext {
    pub config: AutomocConfig,
    pub paths: RunPaths,
    pub file_system: Arc<dyn FileSystem>,
    pub runner: Arc<dyn GeneratorRunner>,
    pub progress: Arc<dyn ProgressHandler>,

    pub manifest: Manifest,

    /// Header suffixes for this host, decided once per run
    pub extensions: HeaderExtensions,

    pub companions: CompanionMap,

    /// Set when the output is missing or its recorded definitions differ
    pub generate_all: bool,

    pub outcomes: Vec<GenerationOutcome>,

    /// Latched by any generator failure
    pub failed: bool,

    pub write: Option<WriteDecision>,
}

impl RunContext {
    pub fn new(
        config: AutomocConfig,
        paths: RunPaths,
        file_system: Arc<dyn FileSystem>,
        runner: Arc<dyn GeneratorRunner>,
        progress: Arc<dyn ProgressHandler>,
        manifest: Manifest,
    ) -> Self {
        let extensions = HeaderExtensions::for_host(&paths.source_dir);
        Self::with_extensions(config, paths, file_system, runner, progress, manifest, extensions)
    }

    pub fn with_extensions(
        config: AutomocConfig,
        paths: RunPaths,
        file_system: Arc<dyn FileSystem>,
        runner: Arc<dyn GeneratorRunner>,
        progress: Arc<dyn ProgressHandler>,
        manifest: Manifest,
        extensions: HeaderExtensions,
    ) -> Self {
        Self {
            config,
            paths,
            file_system,
            runner,
            progress,
            manifest,
            extensions,
            companions: CompanionMap::new(),
            generate_all: false,
            outcomes: Vec::new(),
            failed: false,
            write: None,
        }
    }

    pub fn emit(&self, event: ProgressEvent) {
        self.progress.on_progress(&event);
    }

    /// Whether a generator ran for any companion the aggregator includes.
    pub fn unclaimed_regenerated(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| !outcome.request.claimed && outcome.generated())
    }

    pub fn generated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.generated()).count()
    }

    pub fn status(&self) -> RunStatus {
        if self.failed {
            RunStatus::Failed
        } else {
            RunStatus::Success
        }
    }
}
