//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { output } => {
                info!(output = %output.display(), "Starting automoc");
            }
            ProgressEvent::PhaseStarted { phase } => {
                debug!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                debug!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::Classified { claimed, unclaimed } => {
                info!(claimed, unclaimed, "Companions classified");
            }
            ProgressEvent::Generating {
                companion,
                output,
                input,
            } => {
                info!(
                    companion = %companion,
                    output = %output.display(),
                    input = %input.display(),
                    "Generating"
                );
            }
            ProgressEvent::GenerationFailed { output, error } => {
                warn!(output = %output.display(), error = %error, "Generation failed");
            }
            ProgressEvent::UnknownSuffix { path } => {
                debug!(file = %path.display(), "Ignoring file with unknown suffix");
            }
            ProgressEvent::AggregateWritten { output } => {
                info!(output = %output.display(), "Aggregator written");
            }
            ProgressEvent::AggregateUnchanged { output } => {
                debug!(output = %output.display(), "Aggregator unchanged");
            }
            ProgressEvent::Completed {
                generated,
                failed,
                total_time,
            } => {
                if *failed {
                    warn!(
                        generated,
                        total_time_ms = total_time.as_millis(),
                        "Run finished with generator failures"
                    );
                } else {
                    info!(
                        generated,
                        total_time_ms = total_time.as_millis(),
                        "Run complete"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::Started {
                output: PathBuf::from("/b/x_automoc.cpp"),
            },
            ProgressEvent::PhaseStarted {
                phase: "ClassifyPhase".to_string(),
            },
            ProgressEvent::PhaseComplete {
                phase: "ClassifyPhase".to_string(),
                duration: Duration::from_millis(3),
            },
            ProgressEvent::Classified {
                claimed: 1,
                unclaimed: 0,
            },
            ProgressEvent::Generating {
                companion: "moc_a.cpp".to_string(),
                output: PathBuf::from("/b/moc_a.cpp"),
                input: PathBuf::from("/s/a.h"),
            },
            ProgressEvent::GenerationFailed {
                output: PathBuf::from("/b/moc_a.cpp"),
                error: "exit status: 1".to_string(),
            },
            ProgressEvent::UnknownSuffix {
                path: PathBuf::from("/s/form.ui"),
            },
            ProgressEvent::AggregateWritten {
                output: PathBuf::from("/b/x_automoc.cpp"),
            },
            ProgressEvent::AggregateUnchanged {
                output: PathBuf::from("/b/x_automoc.cpp"),
            },
            ProgressEvent::Completed {
                generated: 1,
                failed: true,
                total_time: Duration::from_secs(1),
            },
            ProgressEvent::Completed {
                generated: 0,
                failed: false,
                total_time: Duration::from_secs(1),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
