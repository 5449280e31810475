//! Staleness & invocation controller
//!
//! Decides which companions are out of date, then produces them with the
//! external generator through a bounded pool of concurrent invocations.

mod pool;
mod runner;
mod settings;
mod staleness;

pub use pool::{GenerationOutcome, GenerationPool, GenerationRequest};
pub use runner::{GeneratorRunner, ProcessRunner};
pub use settings::GeneratorSettings;
pub use staleness::needs_regeneration;
