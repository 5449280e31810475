//! Progress handler trait and events

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Events emitted while a run progresses
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started for an aggregator output
    Started { output: PathBuf },

    PhaseStarted { phase: String },

    PhaseComplete { phase: String, duration: Duration },

    /// Classification finished
    Classified { claimed: usize, unclaimed: usize },

    /// A generator invocation is about to start
    Generating {
        companion: String,
        output: PathBuf,
        input: PathBuf,
    },

    GenerationFailed { output: PathBuf, error: String },

    /// A file in the manifest was neither a source nor a header
    UnknownSuffix { path: PathBuf },

    AggregateWritten { output: PathBuf },

    /// The aggregator was left untouched
    AggregateUnchanged { output: PathBuf },

    /// Run completed without fatal errors
    Completed {
        generated: usize,
        failed: bool,
        total_time: Duration,
    },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Forwards every event to each handler in turn.
#[derive(Default, Clone)]
pub struct MultiHandler {
    handlers: Vec<Arc<dyn ProgressHandler>>,
}

impl MultiHandler {
    pub fn new(handlers: Vec<Arc<dyn ProgressHandler>>) -> Self {
        Self { handlers }
    }

    pub fn push(&mut self, handler: Arc<dyn ProgressHandler>) {
        self.handlers.push(handler);
    }
}

impl ProgressHandler for MultiHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        for handler in &self.handlers {
            handler.on_progress(event);
        }
    }
}
