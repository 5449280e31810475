use std::collections::BTreeSet;
use std::path::Path;

const FRAMEWORK_HEADERS_SUFFIX: &str = ".framework/Headers";

/// Include flags handed to the generator, in final order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeSettings {
    flags: Vec<String>,
}

impl IncludeSettings {
    /// Builds `-I` flags for every include path, moves project directories to
    /// the front when `project_dirs` is set, and appends one `-F <dir>` pair per
    /// distinct framework root.
    pub fn new(include_paths: Vec<String>, project_dirs: Option<(String, String)>) -> Self {
        let mut framework_roots = BTreeSet::new();
        let mut include_flags = Vec::with_capacity(include_paths.len());

        for path in &include_paths {
            include_flags.push(format!("-I{}", path));
            if path.ends_with(FRAMEWORK_HEADERS_SUFFIX) {
                if let Some(root) = Path::new(path).parent().and_then(Path::parent) {
                    framework_roots.insert(root.to_string_lossy().into_owned());
                }
            }
        }

        if let Some((binary_dir, source_dir)) = project_dirs {
            include_flags = prioritize(
                include_flags,
                &[format!("-I{}", binary_dir), format!("-I{}", source_dir)],
            );
        }

        let mut flags = include_flags;
        for root in framework_roots {
            flags.push("-F".to_string());
            flags.push(root);
        }

        Self { flags }
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }
}

/// Stable partition: flags starting with the first prefix, then the second,
/// then everything else in original order.
fn prioritize(flags: Vec<String>, prefixes: &[String]) -> Vec<String> {
    let mut remaining = flags;
    let mut sorted = Vec::with_capacity(remaining.len());
    for prefix in prefixes {
        let (matching, rest): (Vec<String>, Vec<String>) = remaining
            .into_iter()
            .partition(|flag| flag.starts_with(prefix.as_str()));
        sorted.extend(matching);
        remaining = rest;
    }
    sorted.extend(remaining);
    sorted
}
