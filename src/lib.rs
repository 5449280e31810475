//! automoc - build-time meta-object companion generator
//!
//! Given the manifest a build configuration step writes next to a target's
//! aggregating translation unit, automoc decides which sources and headers
//! need a generated companion, runs the external generator for the stale
//! ones, and writes a single translation unit including every companion no
//! source file includes on its own.
//!
//! # Example Usage
//!
//! ```ignore
//! use automoc::{run, AutomocConfig, LoggingHandler, ProcessRunner, RunPaths};
//! use std::sync::Arc;
//!
//! async fn generate(paths: RunPaths) -> anyhow::Result<()> {
//!     let config = AutomocConfig::default();
//!     let status = run(
//!         paths,
//!         config,
//!         Arc::new(ProcessRunner::new(false)),
//!         Arc::new(LoggingHandler),
//!     )
//!     .await?;
//!     std::process::exit(status.exit_code());
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`manifest`]: the `<output>.files` sidecar reader
//! - [`scanner`]: companion include and marker detection in file text
//! - [`classify`]: claimed/unclaimed companion classification
//! - [`generator`]: staleness checks and bounded generator invocation
//! - [`aggregate`]: aggregating translation unit construction and write policy
//! - [`pipeline`]: the phases of one run and their shared context

pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod generator;
pub mod manifest;
pub mod pipeline;
pub mod progress;
pub mod scanner;
pub mod util;

pub use classify::{Classifier, Companion, CompanionMap, HeaderExtensions};
pub use config::AutomocConfig;
pub use error::{AutomocError, GenerationError};
pub use generator::{GeneratorRunner, GeneratorSettings, ProcessRunner};
pub use manifest::Manifest;
pub use pipeline::{PipelineOrchestrator, RunContext, RunPaths, RunStatus};
pub use progress::{EchoHandler, LoggingHandler, MultiHandler, ProgressHandler};
pub use util::{init_logging, LoggingConfig};

use crate::fs::RealFileSystem;
use std::sync::Arc;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Performs one complete run against the real file system.
///
/// Fatal conditions (unreadable or malformed manifest, missing header for an
/// explicit companion include, output I/O) are returned as errors before
/// anything is written. Generator failures are reported through
/// [`RunStatus::Failed`].
pub async fn run(
    paths: RunPaths,
    config: AutomocConfig,
    runner: Arc<dyn GeneratorRunner>,
    progress: Arc<dyn ProgressHandler>,
) -> anyhow::Result<RunStatus> {
    let manifest = Manifest::read(&paths.manifest_file())?;
    let mut context = RunContext::new(
        config,
        paths,
        Arc::new(RealFileSystem::new()),
        runner,
        progress,
        manifest,
    );
    PipelineOrchestrator::new().execute(&mut context).await
}
