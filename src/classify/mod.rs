//! Classification engine
//!
//! Walks the manifest's file list once and decides, for every file, whether a
//! companion must be generated, under which name, and whether a source file
//! already includes it ([`Companion::Claimed`]) or the aggregator has to
//! ([`Companion::Unclaimed`]).
//!
//! Sources that include a companion claim it, either for themselves (a `.moc`
//! include in a source that declares the marker) or for the matching header.
//! Sources without any companion include only propose their public and
//! private headers, and only if those headers carry the marker. Headers listed
//! in the manifest directly are always proposed.

mod companions;
mod extensions;

pub use companions::{Companion, CompanionMap};
pub use extensions::{is_case_sensitive, HeaderExtensions, SourceCategory, SOURCE_EXTENSIONS};

use crate::error::{AutomocError, Result};
use crate::fs::FileSystem;
use crate::scanner::{find_companion_references, has_reflectable_marker, CompanionReference};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

const PRIVATE_HEADER_SUFFIX: &str = "_p";

/// Companion name for a header-derived request: `moc_<base>.cpp`.
pub fn companion_name_for(base_name: &str) -> String {
    format!("moc_{}.cpp", base_name)
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub struct Classifier<'a> {
    fs: &'a dyn FileSystem,
    extensions: HeaderExtensions,
}

impl<'a> Classifier<'a> {
    pub fn new(fs: &'a dyn FileSystem, extensions: HeaderExtensions) -> Self {
        Self { fs, extensions }
    }

    /// Classifies every file in `sources`, in order. `on_unknown` is called
    /// for each file that is neither a source nor a header.
    ///
    /// Fails only when a source explicitly includes a companion whose header
    /// cannot be found.
    pub fn classify(
        &self,
        sources: &[PathBuf],
        mut on_unknown: impl FnMut(&Path),
    ) -> Result<CompanionMap> {
        let mut map = CompanionMap::new();
        for path in sources {
            match self.extensions.categorize(path) {
                SourceCategory::CompilableSource => self.classify_source(path, &mut map)?,
                SourceCategory::Header => self.classify_header(path, &mut map),
                SourceCategory::Other => {
                    trace!(file = %path.display(), "ignoring file with unknown suffix");
                    on_unknown(path);
                }
            }
        }
        debug!(
            total = map.len(),
            unclaimed = map.unclaimed().count(),
            "Classification complete"
        );
        Ok(map)
    }

    fn classify_header(&self, path: &Path, map: &mut CompanionMap) {
        let name = companion_name_for(&stem_of(path));
        if map.propose(path.to_path_buf(), name) {
            trace!(header = %path.display(), "Listed header proposed");
        }
    }

    fn classify_source(&self, path: &Path, map: &mut CompanionMap) -> Result<()> {
        let text = self.fs.read_to_string(path).unwrap_or_else(|err| {
            debug!(file = %path.display(), error = %err, "Source could not be read");
            String::new()
        });
        if text.is_empty() {
            warn!("empty source file: {}", path.display());
            return Ok(());
        }

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut references = find_companion_references(&text).peekable();

        if references.peek().is_none() {
            let base_name = stem_of(path);
            self.propose_header(dir, &base_name, map);
            self.propose_header(dir, &format!("{}{}", base_name, PRIVATE_HEADER_SUFFIX), map);
            return Ok(());
        }

        let source_has_marker = has_reflectable_marker(&text);
        for reference in references {
            trace!(
                file = %path.display(),
                include = reference.name,
                offset = reference.offset,
                "Companion include found"
            );
            if reference.is_moc_style() || !source_has_marker {
                let header = self.locate_header(path, dir, &reference)?;
                map.claim(header, reference.name);
            } else {
                map.claim(path.to_path_buf(), reference.name);
            }
        }
        Ok(())
    }

    /// Proposes `<dir>/<base_name><ext>` for the first existing extension, if
    /// it is not yet known and declares the marker.
    fn propose_header(&self, dir: &Path, base_name: &str, map: &mut CompanionMap) {
        let Some(header) = self.find_header(dir, base_name) else {
            return;
        };
        if map.contains(&header) {
            return;
        }
        let text = self.fs.read_to_string(&header).unwrap_or_default();
        if has_reflectable_marker(&text) {
            debug!(header = %header.display(), "Header declares a reflectable type");
            map.propose(header, companion_name_for(base_name));
        }
    }

    fn find_header(&self, dir: &Path, base_name: &str) -> Option<PathBuf> {
        self.extensions
            .iter()
            .map(|ext| dir.join(format!("{}{}", base_name, ext)))
            .find(|candidate| self.fs.is_file(candidate))
    }

    /// Finds the header an explicit companion include is generated from: next
    /// to the source first, then in the include's own subdirectory.
    fn locate_header(
        &self,
        source: &Path,
        dir: &Path,
        reference: &CompanionReference<'_>,
    ) -> Result<PathBuf> {
        let base_name = reference.header_base_name();
        if let Some(header) = self.find_header(dir, base_name) {
            return Ok(header);
        }

        let mut candidates = vec![format!(
            "{}{}",
            dir.join(base_name).display(),
            self.extensions.brace_list()
        )];

        if let Some(subdirectory) = reference.subdirectory() {
            let nested = dir.join(subdirectory);
            if let Some(header) = self.find_header(&nested, base_name) {
                return Ok(header);
            }
            candidates.push(format!(
                "{}{}",
                nested.join(base_name).display(),
                self.extensions.brace_list()
            ));
        }

        Err(AutomocError::MissingHeader {
            source_file: source.to_path_buf(),
            include: reference.name.to_string(),
            candidates,
        })
    }
}
