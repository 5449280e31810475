//! Manifest reader
//!
//! The build configuration step writes a `<output>.files` sidecar next to the
//! aggregator output. It is a strict sequence of label lines, each followed by
//! exactly one data line:
//!
//! ```text
//! SOURCES:
//! /abs/a.cpp;/abs/a.h
//! MOC_COMPILE_DEFINITIONS:        (optional)
//! QT_GUI_LIB;FOO=1
//! MOC_DEFINITIONS:
//! -DQT_GUI_LIB -DFOO=1 -fPIC
//! MOC_INCLUDES:
//! /usr/include/qt;/abs/build
//! CMAKE_INCLUDE_DIRECTORIES_PROJECT_BEFORE:
//! ON
//! CMAKE_BINARY_DIR:               (only when ON)
//! /abs/build
//! CMAKE_SOURCE_DIR:               (only when ON)
//! /abs
//! ```
//!
//! Sections are consumed in order and only as far as the run needs them: the
//! source list always, the definitions whenever they are compared or written,
//! and the include paths only once a generator actually has to run. Any label
//! mismatch is an [`AutomocError::ManifestSyntax`].

mod includes;

pub use includes::IncludeSettings;

use crate::error::{AutomocError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SOURCES_LABEL: &str = "SOURCES:";
pub const COMPILE_DEFINITIONS_LABEL: &str = "MOC_COMPILE_DEFINITIONS:";
pub const DEFINITIONS_LABEL: &str = "MOC_DEFINITIONS:";
pub const INCLUDES_LABEL: &str = "MOC_INCLUDES:";
pub const PROJECT_BEFORE_LABEL: &str = "CMAKE_INCLUDE_DIRECTORIES_PROJECT_BEFORE:";
pub const BINARY_DIR_LABEL: &str = "CMAKE_BINARY_DIR:";
pub const SOURCE_DIR_LABEL: &str = "CMAKE_SOURCE_DIR:";

/// Suffix appended to the output file name to locate the manifest.
pub const MANIFEST_SUFFIX: &str = ".files";

/// Path of the manifest belonging to `output_file`.
pub fn manifest_path(output_file: &Path) -> PathBuf {
    let mut name = output_file.as_os_str().to_os_string();
    name.push(MANIFEST_SUFFIX);
    PathBuf::from(name)
}

/// Sequential cursor over the manifest's lines.
#[derive(Debug)]
struct LineCursor {
    path: PathBuf,
    lines: Vec<String>,
    next: usize,
}

impl LineCursor {
    fn new(path: PathBuf, text: &str) -> Self {
        Self {
            path,
            lines: text.lines().map(str::to_string).collect(),
            next: 0,
        }
    }

    fn current(&self) -> &str {
        self.lines.get(self.next).map(String::as_str).unwrap_or("")
    }

    fn peek_is(&self, label: &str) -> bool {
        self.current() == label
    }

    /// Consumes a label line, which must match verbatim.
    fn expect(&mut self, label: &str) -> Result<()> {
        if !self.peek_is(label) {
            return Err(AutomocError::ManifestSyntax {
                path: self.path.clone(),
                line: self.next + 1,
                expected: label.to_string(),
                found: self.current().to_string(),
            });
        }
        self.next += 1;
        Ok(())
    }

    /// Consumes a data line, trimmed. A missing line reads as empty.
    fn data(&mut self) -> String {
        let line = self.current().trim().to_string();
        self.next += 1;
        line
    }

    fn labelled(&mut self, label: &str) -> Result<String> {
        self.expect(label)?;
        Ok(self.data())
    }
}

/// The parsed build-configuration sidecar.
#[derive(Debug)]
pub struct Manifest {
    cursor: LineCursor,
    sources: Vec<PathBuf>,
    definitions: Option<Vec<String>>,
    includes: Option<IncludeSettings>,
}

impl Manifest {
    /// Opens the manifest and parses the source list.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| AutomocError::ManifestOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let mut cursor = LineCursor::new(path.to_path_buf(), text);
        let sources = split_list(&cursor.labelled(SOURCES_LABEL)?, ';')
            .map(PathBuf::from)
            .collect::<Vec<_>>();

        debug!(
            manifest = %path.display(),
            sources = sources.len(),
            "Manifest source list read"
        );

        Ok(Self {
            cursor,
            sources,
            definitions: None,
            includes: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.cursor.path
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Preprocessor definition flags for the generator, each starting with `-D`.
    ///
    /// A non-empty `MOC_COMPILE_DEFINITIONS` list wins; otherwise the `-D`
    /// tokens of `MOC_DEFINITIONS` are used.
    pub fn definitions(&mut self) -> Result<&[String]> {
        let definitions = match self.definitions.take() {
            Some(definitions) => definitions,
            None => self.read_definitions()?,
        };
        Ok(self.definitions.insert(definitions))
    }

    fn read_definitions(&mut self) -> Result<Vec<String>> {
        let compile_definitions = if self.cursor.peek_is(COMPILE_DEFINITIONS_LABEL) {
            self.cursor.labelled(COMPILE_DEFINITIONS_LABEL)?
        } else {
            String::new()
        };
        let raw_definitions = self.cursor.labelled(DEFINITIONS_LABEL)?;

        let from_compile: Vec<String> = split_list(&compile_definitions, ';')
            .map(|def| format!("-D{}", def))
            .collect();

        let definitions: Vec<String> = if !from_compile.is_empty() {
            from_compile
        } else {
            raw_definitions
                .split(' ')
                .filter(|token| token.starts_with("-D"))
                .map(str::to_string)
                .collect()
        };
        debug!(count = definitions.len(), "Manifest definitions read");
        Ok(definitions)
    }

    /// The definition flags as recorded in the aggregator's second line.
    pub fn joined_definitions(&mut self) -> Result<String> {
        Ok(self.definitions()?.join(" "))
    }

    /// Include flags for the generator. Reads the remaining manifest sections
    /// on first use.
    pub fn include_settings(&mut self) -> Result<&IncludeSettings> {
        let settings = match self.includes.take() {
            Some(settings) => settings,
            None => self.read_include_settings()?,
        };
        Ok(self.includes.insert(settings))
    }

    fn read_include_settings(&mut self) -> Result<IncludeSettings> {
        self.definitions()?;

        let include_paths: Vec<String> = split_list(&self.cursor.labelled(INCLUDES_LABEL)?, ';')
            .map(str::to_string)
            .collect();

        let project_before = self.cursor.labelled(PROJECT_BEFORE_LABEL)? == "ON";
        let project_dirs = if project_before {
            let binary_dir = self.cursor.labelled(BINARY_DIR_LABEL)?;
            let source_dir = self.cursor.labelled(SOURCE_DIR_LABEL)?;
            Some((binary_dir, source_dir))
        } else {
            None
        };

        debug!(
            include_paths = include_paths.len(),
            project_before, "Manifest include settings read"
        );
        Ok(IncludeSettings::new(include_paths, project_dirs))
    }
}

fn split_list(line: &str, separator: char) -> impl Iterator<Item = &str> {
    line.split(separator).filter(|item| !item.is_empty())
}
