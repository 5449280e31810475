use async_trait::async_trait;
use automoc::{AutomocConfig, GenerationError, GeneratorRunner, GeneratorSettings, RunPaths};
use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const MARKED_HEADER: &str = "#include <QObject>\nclass Widget : public QObject {\n    Q_OBJECT\n};\n";

/// A source tree and build directory in a temporary directory.
#[allow(dead_code)]
pub struct Project {
    pub temp: TempDir,
    pub src: PathBuf,
    pub build: PathBuf,
}

#[allow(dead_code)]
impl Project {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let src = temp.path().join("src");
        let build = temp.path().join("build");
        fs::create_dir_all(&src).expect("Failed to create src dir");
        fs::create_dir_all(&build).expect("Failed to create build dir");
        Self { temp, src, build }
    }

    /// Writes a source file and dates it far in the past.
    pub fn source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.src.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create source subdir");
        }
        fs::write(&path, content).expect("Failed to write source");
        set_old(&path);
        path
    }

    pub fn output(&self) -> PathBuf {
        self.build.join("x_automoc.cpp")
    }

    pub fn manifest(&self) -> PathBuf {
        self.build.join("x_automoc.cpp.files")
    }

    pub fn write_manifest(&self, sources: &[&str], definitions: &str) {
        let sources: Vec<String> = sources
            .iter()
            .map(|name| self.src.join(name).display().to_string())
            .collect();
        let text = format!(
            "SOURCES:\n{}\nMOC_COMPILE_DEFINITIONS:\n\nMOC_DEFINITIONS:\n{}\nMOC_INCLUDES:\n{}\nCMAKE_INCLUDE_DIRECTORIES_PROJECT_BEFORE:\nOFF\n",
            sources.join(";"),
            definitions,
            self.src.display()
        );
        fs::write(self.manifest(), text).expect("Failed to write manifest");
    }

    pub fn paths(&self) -> RunPaths {
        RunPaths {
            output_file: self.output(),
            source_dir: self.src.clone(),
            build_dir: self.build.clone(),
            generator: PathBuf::from("moc"),
            echo: PathBuf::from("cmake"),
            touch: false,
        }
    }

    pub fn config(&self) -> AutomocConfig {
        AutomocConfig {
            touch_delay: Duration::from_millis(20),
            ..AutomocConfig::defaults()
        }
    }

    pub fn read_output(&self) -> String {
        fs::read_to_string(self.output()).expect("Failed to read output")
    }
}

#[allow(dead_code)]
pub fn set_old(path: &Path) {
    filetime::set_file_mtime(path, FileTime::from_unix_time(1_000_000, 0))
        .expect("Failed to set mtime");
}

#[allow(dead_code)]
pub fn mtime(path: &Path) -> FileTime {
    FileTime::from_last_modification_time(&fs::metadata(path).expect("Failed to stat"))
}

/// In-process stand-in for the generator. Records every call, writes a small
/// companion file and fails for inputs whose file name is listed in `failing`.
#[derive(Default)]
pub struct FakeGenerator {
    pub calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    pub failing: Vec<String>,
}

#[allow(dead_code)]
impl FakeGenerator {
    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Companion paths generated so far, sorted; invocations run concurrently.
    pub fn outputs(&self) -> Vec<PathBuf> {
        let mut outputs: Vec<PathBuf> = self
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, output)| output.clone())
            .collect();
        outputs.sort();
        outputs
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GeneratorRunner for FakeGenerator {
    async fn generate(
        &self,
        settings: &GeneratorSettings,
        input: &Path,
        output: &Path,
    ) -> Result<(), GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), output.to_path_buf()));
        fs::write(output, settings.command_line(output, input)).expect("Failed to write companion");

        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&name) {
            return Err(GenerationError::Aborted {
                output: output.to_path_buf(),
                message: "fake generator failure".to_string(),
            });
        }
        Ok(())
    }
}
