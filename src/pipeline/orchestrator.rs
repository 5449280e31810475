use super::context::{RunContext, RunStatus};
use super::phase_trait::WorkflowPhase;
use super::phases::{
    aggregate::AggregatePhase, classify::ClassifyPhase, generate::GeneratePhase,
    retrigger::RetriggerPhase,
};
use crate::progress::ProgressEvent;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, info};

pub struct PipelineOrchestrator {
    phases: Vec<Box<dyn WorkflowPhase>>,
}

impl Default for PipelineOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineOrchestrator {
    pub fn new() -> Self {
        Self::with_phases(vec![
            Box::new(ClassifyPhase),
            Box::new(GeneratePhase),
            Box::new(AggregatePhase),
            Box::new(RetriggerPhase),
        ])
    }

    pub fn with_phases(phases: Vec<Box<dyn WorkflowPhase>>) -> Self {
        Self { phases }
    }

    pub fn phase_names(&self) -> Vec<&'static str> {
        self.phases.iter().map(|phase| phase.name()).collect()
    }

    /// Runs every phase in order. A phase error aborts the run; generator
    /// failures only show up in the returned status.
    pub async fn execute(&self, context: &mut RunContext) -> Result<RunStatus> {
        let start = Instant::now();
        info!(
            "Starting automoc for: {}",
            context.paths.output_file.display()
        );
        context.emit(ProgressEvent::Started {
            output: context.paths.output_file.clone(),
        });

        for phase in &self.phases {
            let phase_name = phase.name();
            context.emit(ProgressEvent::PhaseStarted {
                phase: phase_name.to_string(),
            });

            let phase_start = Instant::now();
            phase
                .execute(context)
                .await
                .with_context(|| format!("{} failed", phase_name))?;

            context.emit(ProgressEvent::PhaseComplete {
                phase: phase_name.to_string(),
                duration: phase_start.elapsed(),
            });
            debug!("Phase {} complete", phase_name);
        }

        context.emit(ProgressEvent::Completed {
            generated: context.generated_count(),
            failed: context.failed,
            total_time: start.elapsed(),
        });
        Ok(context.status())
    }
}
