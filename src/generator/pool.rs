use super::{GeneratorRunner, GeneratorSettings};
use crate::error::GenerationError;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// One stale companion to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub companion: String,
    pub claimed: bool,
}

#[derive(Debug)]
pub struct GenerationOutcome {
    pub request: GenerationRequest,
    pub result: Result<(), GenerationError>,
}

impl GenerationOutcome {
    /// Whether a generator process ran for this request, successfully or not.
    pub fn generated(&self) -> bool {
        !matches!(self.result, Err(GenerationError::FailedToStart { .. }))
    }

    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs generator invocations with at most `jobs` in flight, and returns once
/// every one of them has finished.
pub struct GenerationPool {
    runner: Arc<dyn GeneratorRunner>,
    settings: Arc<GeneratorSettings>,
    progress: Arc<dyn ProgressHandler>,
    jobs: usize,
}

impl GenerationPool {
    pub fn new(runner: Arc<dyn GeneratorRunner>, settings: GeneratorSettings, jobs: usize) -> Self {
        Self {
            runner,
            settings: Arc::new(settings),
            progress: Arc::new(NoOpHandler),
            jobs: jobs.max(1),
        }
    }

    /// Receives a `Generating` event right before each invocation starts.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    /// Outcomes are returned in request order, whatever order the processes
    /// finish in.
    ///
    /// Requests sharing an output path run one after another in request
    /// order, so the last of them decides the file's content.
    pub async fn run(&self, requests: Vec<GenerationRequest>) -> Vec<GenerationOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let mut tasks = JoinSet::new();

        for group in group_by_output(&requests) {
            let runner = Arc::clone(&self.runner);
            let settings = Arc::clone(&self.settings);
            let progress = Arc::clone(&self.progress);
            let semaphore = Arc::clone(&semaphore);
            let group: Vec<(usize, GenerationRequest)> = group
                .into_iter()
                .map(|index| (index, requests[index].clone()))
                .collect();
            tasks.spawn(async move {
                let mut results = Vec::with_capacity(group.len());
                for (index, request) in group {
                    let result = match Arc::clone(&semaphore).acquire_owned().await {
                        Ok(_permit) => {
                            generate_one(runner.as_ref(), &settings, &progress, &request).await
                        }
                        Err(err) => Err(GenerationError::Aborted {
                            output: request.output.clone(),
                            message: err.to_string(),
                        }),
                    };
                    if let Err(err) = &result {
                        error!("{}", err);
                        remove_partial_output(&request.output);
                    }
                    results.push((index, result));
                }
                results
            });
        }

        let mut results: Vec<Option<Result<(), GenerationError>>> =
            requests.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(finished) => {
                    for (index, result) in finished {
                        results[index] = Some(result);
                    }
                }
                Err(err) => error!(error = %err, "Generator task did not complete"),
            }
        }

        requests
            .into_iter()
            .zip(results)
            .map(|(request, result)| {
                let result = result.unwrap_or_else(|| {
                    let err = GenerationError::Aborted {
                        output: request.output.clone(),
                        message: "task panicked or was cancelled".to_string(),
                    };
                    error!("{}", err);
                    remove_partial_output(&request.output);
                    Err(err)
                });
                GenerationOutcome { request, result }
            })
            .collect()
    }
}

/// Request indices grouped by output path, groups in order of first
/// appearance.
fn group_by_output(requests: &[GenerationRequest]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut by_output: HashMap<&Path, usize> = HashMap::new();
    for (index, request) in requests.iter().enumerate() {
        match by_output.get(request.output.as_path()) {
            Some(&group) => {
                warn!(
                    output = %request.output.display(),
                    input = %request.input.display(),
                    "Several inputs generate the same companion; the last one wins"
                );
                groups[group].push(index);
            }
            None => {
                by_output.insert(request.output.as_path(), groups.len());
                groups.push(vec![index]);
            }
        }
    }
    groups
}

async fn generate_one(
    runner: &dyn GeneratorRunner,
    settings: &GeneratorSettings,
    progress: &Arc<dyn ProgressHandler>,
    request: &GenerationRequest,
) -> Result<(), GenerationError> {
    if let Some(parent) = request.output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| GenerationError::FailedToStart {
                output: request.output.clone(),
                source,
            })?;
    }

    // Handlers may run external commands; keep them off the async workers.
    let event = ProgressEvent::Generating {
        companion: request.companion.clone(),
        output: request.output.clone(),
        input: request.input.clone(),
    };
    let handler = Arc::clone(progress);
    if let Err(err) = tokio::task::spawn_blocking(move || handler.on_progress(&event)).await {
        warn!(error = %err, "Progress handler did not complete");
    }

    debug!(
        input = %request.input.display(),
        output = %request.output.display(),
        "Running generator"
    );
    runner.generate(settings, &request.input, &request.output).await
}

fn remove_partial_output(output: &Path) {
    match std::fs::remove_file(output) {
        Ok(()) => debug!(output = %output.display(), "Removed partial output"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => error!(output = %output.display(), error = %err, "Could not remove partial output"),
    }
}
