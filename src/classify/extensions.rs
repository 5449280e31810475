use std::path::Path;
use tracing::debug;

/// Suffixes of files compiled directly. Matched case-sensitively.
pub const SOURCE_EXTENSIONS: &[&str] = &[".cpp", ".cc", ".mm", ".cxx", ".C"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    CompilableSource,
    Header,
    Other,
}

/// Header suffixes recognized for this run, in lookup priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderExtensions {
    extensions: Vec<&'static str>,
    case_insensitive: bool,
}

impl HeaderExtensions {
    pub fn new(extensions: Vec<&'static str>, case_insensitive: bool) -> Self {
        Self {
            extensions,
            case_insensitive,
        }
    }

    /// `.h .hpp .hxx .H`, compared case-sensitively.
    pub fn case_sensitive() -> Self {
        Self::new(vec![".h", ".hpp", ".hxx", ".H"], false)
    }

    /// `.h .hpp .hxx`, compared case-insensitively.
    pub fn case_insensitive() -> Self {
        Self::new(vec![".h", ".hpp", ".hxx"], true)
    }

    /// Extension policy of the host. On macOS the source root is probed once
    /// to decide whether `.H` is distinct from `.h`.
    pub fn for_host(source_dir: &Path) -> Self {
        if cfg!(windows) {
            Self::case_insensitive()
        } else if cfg!(target_os = "macos") {
            if is_case_sensitive(source_dir) {
                Self::case_sensitive()
            } else {
                Self::case_insensitive()
            }
        } else {
            Self::case_sensitive()
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.iter().copied()
    }

    /// Brace list used in diagnostics, e.g. `{.h,.hpp,.hxx,.H}`.
    pub fn brace_list(&self) -> String {
        format!("{{{}}}", self.extensions.join(","))
    }

    pub fn is_header(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        if self.case_insensitive {
            let lower = name.to_lowercase();
            self.extensions
                .iter()
                .any(|ext| lower.ends_with(&ext.to_lowercase()))
        } else {
            self.extensions.iter().any(|ext| name.ends_with(ext))
        }
    }

    pub fn categorize(&self, path: &Path) -> SourceCategory {
        let name = path.to_string_lossy();
        if SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            SourceCategory::CompilableSource
        } else if self.is_header(path) {
            SourceCategory::Header
        } else {
            SourceCategory::Other
        }
    }
}

/// Probes whether the filesystem holding `dir` distinguishes letter case, by
/// looking the directory up again under a case-flipped name. Undecidable
/// names (no letters, no final component) report case-insensitive.
pub fn is_case_sensitive(dir: &Path) -> bool {
    let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let flipped: String = name
        .chars()
        .map(|c| {
            if c.is_lowercase() {
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c.to_lowercase().next().unwrap_or(c)
            }
        })
        .collect();
    if flipped == name {
        return false;
    }

    let sensitive = match (dir.metadata(), dir.with_file_name(&flipped).metadata()) {
        (Ok(original), Ok(other)) => !same_file(&original, &other),
        (Ok(_), Err(_)) => true,
        (Err(_), _) => false,
    };
    debug!(dir = %dir.display(), sensitive, "Case sensitivity probe");
    sensitive
}

#[cfg(unix)]
fn same_file(a: &std::fs::Metadata, b: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_file(a: &std::fs::Metadata, b: &std::fs::Metadata) -> bool {
    a.len() == b.len() && a.modified().ok() == b.modified().ok()
}
