//! Aggregator writer
//!
//! The aggregator is the one translation unit that includes every unclaimed
//! companion. Its second line records the definition flags it was generated
//! with; the next run compares against that line to decide whether every
//! companion has to be regenerated.

use crate::classify::CompanionMap;
use crate::error::{AutomocError, Result};
use crate::fs::FileSystem;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const HEADER_LINE: &str = "/* This file is autogenerated, do not edit";

/// Emitted instead of includes so the translation unit is never empty.
pub const PLACEHOLDER: &str = "enum some_compilers { need_more_than_nothing };";

/// Builds the aggregator text. Includes follow key order.
pub fn build_aggregate(definitions: &str, companions: &CompanionMap) -> String {
    let mut text = format!("{}\n{}\n*/\n", HEADER_LINE, definitions);
    let mut unclaimed = companions.unclaimed().peekable();
    if unclaimed.peek().is_none() {
        text.push_str(PLACEHOLDER);
        text.push('\n');
    }
    for (_, name) in unclaimed {
        text.push_str(&format!("#include \"{}\"\n", name));
    }
    text
}

/// The definitions recorded by the previous run, i.e. the output's second line.
pub fn previous_definitions(fs: &dyn FileSystem, output: &Path) -> Option<String> {
    let text = fs.read_to_string(output).ok()?;
    text.lines().nth(1).map(str::to_string)
}

/// Everything must be regenerated when there is no previous output, or when
/// it was produced with other definitions.
pub fn needs_generate_all(fs: &dyn FileSystem, output: &Path, definitions: &str) -> bool {
    if !fs.exists(output) {
        debug!(output = %output.display(), "No previous output");
        return true;
    }
    let previous = previous_definitions(fs, output);
    let changed = previous.as_deref() != Some(definitions);
    if changed {
        debug!(?previous, current = definitions, "Definitions changed");
    }
    changed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// A generation failed; the previous output is left in place.
    Suppressed,
    /// Nothing changed; the output is not touched.
    Unchanged,
    Write,
}

impl WriteDecision {
    pub fn decide(
        failed: bool,
        unclaimed_regenerated: bool,
        content: &str,
        existing: Option<&str>,
    ) -> Self {
        if failed {
            WriteDecision::Suppressed
        } else if !unclaimed_regenerated && existing == Some(content) {
            WriteDecision::Unchanged
        } else {
            WriteDecision::Write
        }
    }
}

/// Replaces the output with `content`.
pub fn write_aggregate(output: &Path, content: &str) -> Result<()> {
    fs::write(output, content).map_err(|source| AutomocError::OutputWrite {
        path: output.to_path_buf(),
        source,
    })
}
