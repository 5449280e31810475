use crate::fs::FileSystem;
use std::path::Path;
use tracing::trace;

/// Whether the companion at `output` has to be produced again from `input`.
///
/// True when `generate_all` is set, when the companion is missing, or when it
/// is not strictly newer than its input. An input without a readable
/// modification time never makes an existing companion stale.
pub fn needs_regeneration(
    fs: &dyn FileSystem,
    generate_all: bool,
    input: &Path,
    output: &Path,
) -> bool {
    if generate_all {
        return true;
    }
    let Some(output_modified) = fs.modified(output) else {
        trace!(output = %output.display(), "Companion missing");
        return true;
    };
    match fs.modified(input) {
        Some(input_modified) => output_modified <= input_modified,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use yare::parameterized;

    #[parameterized(
        output_newer = { 10, Some(20), false, false },
        output_older = { 20, Some(10), false, true },
        same_time = { 10, Some(10), false, true },
        output_missing = { 10, None, false, true },
        generate_all_overrides = { 10, Some(20), true, true },
    )]
    fn test_needs_regeneration(
        input_secs: u64,
        output_secs: Option<u64>,
        generate_all: bool,
        expected: bool,
    ) {
        let fs = MockFileSystem::new();
        fs.add_file_with_mtime("src/a.h", "Q_OBJECT\n", input_secs);
        if let Some(secs) = output_secs {
            fs.add_file_with_mtime("build/moc_a.cpp", "", secs);
        }

        assert_eq!(
            needs_regeneration(
                &fs,
                generate_all,
                &fs.root().join("src/a.h"),
                &fs.root().join("build/moc_a.cpp"),
            ),
            expected
        );
    }
}
