use crate::aggregate::{build_aggregate, write_aggregate, WriteDecision};
use crate::pipeline::context::RunContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::ProgressEvent;
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

pub struct AggregatePhase;

#[async_trait]
impl WorkflowPhase for AggregatePhase {
    fn name(&self) -> &'static str {
        "AggregatePhase"
    }

    async fn execute(&self, context: &mut RunContext) -> Result<()> {
        let definitions = context.manifest.joined_definitions()?;
        let content = build_aggregate(&definitions, &context.companions);
        let output = context.paths.output_file.clone();

        let existing = if context.failed {
            None
        } else {
            context.file_system.read_to_string(&output).ok()
        };
        let decision = WriteDecision::decide(
            context.failed,
            context.unclaimed_regenerated(),
            &content,
            existing.as_deref(),
        );

        match decision {
            WriteDecision::Suppressed => {
                warn!(output = %output.display(), "Generator failed, keeping previous output");
            }
            WriteDecision::Unchanged => {
                context.emit(ProgressEvent::AggregateUnchanged { output });
            }
            WriteDecision::Write => {
                write_aggregate(&output, &content)?;
                context.emit(ProgressEvent::AggregateWritten { output });
            }
        }
        context.write = Some(decision);
        Ok(())
    }
}
