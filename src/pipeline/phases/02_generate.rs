use crate::aggregate::needs_generate_all;
use crate::generator::{needs_regeneration, GenerationPool, GenerationRequest, GeneratorSettings};
use crate::pipeline::context::RunContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::ProgressEvent;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct GeneratePhase;

#[async_trait]
impl WorkflowPhase for GeneratePhase {
    fn name(&self) -> &'static str {
        "GeneratePhase"
    }

    async fn execute(&self, context: &mut RunContext) -> Result<()> {
        let definitions = context.manifest.joined_definitions()?;
        context.generate_all = needs_generate_all(
            context.file_system.as_ref(),
            &context.paths.output_file,
            &definitions,
        );

        let requests = stale_requests(context);
        if requests.is_empty() {
            debug!("All companions are up to date");
            return Ok(());
        }

        let settings = GeneratorSettings::new(
            context.paths.generator.clone(),
            context.manifest.include_settings()?.flags().to_vec(),
            context.manifest.definitions()?.to_vec(),
        );

        let pool = GenerationPool::new(Arc::clone(&context.runner), settings, context.config.jobs)
            .with_progress(Arc::clone(&context.progress));
        let outcomes = pool.run(requests).await;

        for outcome in &outcomes {
            if let Err(err) = &outcome.result {
                context.failed = true;
                context.emit(ProgressEvent::GenerationFailed {
                    output: outcome.request.output.clone(),
                    error: err.to_string(),
                });
            }
        }
        context.outcomes = outcomes;
        Ok(())
    }
}

/// Claimed companions first, then unclaimed ones, each in key order.
fn stale_requests(context: &RunContext) -> Vec<GenerationRequest> {
    let fs = context.file_system.as_ref();
    let claimed = context.companions.claimed().map(|entry| (entry, true));
    let unclaimed = context.companions.unclaimed().map(|entry| (entry, false));

    claimed
        .chain(unclaimed)
        .filter_map(|((input, name), claimed)| {
            let output = context.paths.companion_output(name);
            needs_regeneration(fs, context.generate_all, input, &output).then(|| {
                GenerationRequest {
                    input: input.to_path_buf(),
                    output,
                    companion: name.to_string(),
                    claimed,
                }
            })
        })
        .collect()
}
