use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Everything needed to build a generator command line. Discovered once per
/// run, and only when at least one companion is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    executable: PathBuf,
    include_flags: Vec<String>,
    definitions: Vec<String>,
    extra_flags: Vec<String>,
}

impl GeneratorSettings {
    pub fn new(executable: PathBuf, include_flags: Vec<String>, definitions: Vec<String>) -> Self {
        Self {
            executable,
            include_flags,
            definitions,
            extra_flags: platform_flags(),
        }
    }

    pub fn with_extra_flags(mut self, extra_flags: Vec<String>) -> Self {
        self.extra_flags = extra_flags;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// `[includes.., definitions.., extra.., -o, output, input]`
    pub fn arguments(&self, output: &Path, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self
            .include_flags
            .iter()
            .chain(&self.definitions)
            .chain(&self.extra_flags)
            .map(OsString::from)
            .collect();
        args.push(OsString::from("-o"));
        args.push(output.as_os_str().to_os_string());
        args.push(input.as_os_str().to_os_string());
        args
    }

    /// The command line as echoed in verbose mode.
    pub fn command_line(&self, output: &Path, input: &Path) -> String {
        let args: Vec<String> = self
            .arguments(output, input)
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        format!("{} {}", self.executable.display(), args.join(" "))
    }
}

fn platform_flags() -> Vec<String> {
    if cfg!(windows) {
        vec!["-DWIN32".to_string()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GeneratorSettings {
        GeneratorSettings::new(
            PathBuf::from("/usr/bin/moc"),
            vec!["-I/inc".to_string(), "-F".to_string(), "/fw".to_string()],
            vec!["-DFOO".to_string(), "-DBAR=1".to_string()],
        )
        .with_extra_flags(vec!["-DWIN32".to_string()])
    }

    #[test]
    fn test_argument_order() {
        let args = settings().arguments(Path::new("/b/moc_a.cpp"), Path::new("/s/a.h"));
        let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            vec!["-I/inc", "-F", "/fw", "-DFOO", "-DBAR=1", "-DWIN32", "-o", "/b/moc_a.cpp", "/s/a.h"]
        );
    }

    #[test]
    fn test_command_line() {
        let line = settings()
            .with_extra_flags(Vec::new())
            .command_line(Path::new("/b/a.moc"), Path::new("/s/a.cpp"));
        assert_eq!(
            line,
            "/usr/bin/moc -I/inc -F /fw -DFOO -DBAR=1 -o /b/a.moc /s/a.cpp"
        );
    }

    #[test]
    fn test_platform_flags() {
        let flags = platform_flags();
        if cfg!(windows) {
            assert_eq!(flags, vec!["-DWIN32".to_string()]);
        } else {
            assert!(flags.is_empty());
        }
    }
}
