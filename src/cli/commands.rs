use crate::pipeline::RunPaths;
use clap::Parser;
use std::path::PathBuf;

/// Generates meta-object companions for a target and the translation unit
/// that includes them
#[derive(Parser, Debug, Clone)]
#[command(
    name = "automoc",
    about = "Generates meta-object companion files and the aggregating translation unit for a build target",
    version,
    long_about = "automoc reads <OUTPUT_FILE>.files written by the build configuration step, \
                  scans the listed sources and headers for meta-object declarations, runs the \
                  generator for every stale companion and writes <OUTPUT_FILE>, which includes \
                  the companions no source file includes itself.\n\n\
                  Environment:\n  \
                  VERBOSE                 print generator command lines and full paths\n  \
                  COLOR                   forwarded to the echo command as --switch=<COLOR>\n  \
                  AUTOMOC_LOG_LEVEL       trace, debug, info, warn (default) or error\n  \
                  AUTOMOC_JOBS            concurrent generator processes (default 4)"
)]
pub struct CliArgs {
    #[arg(value_name = "OUTPUT_FILE", help = "Aggregating translation unit to write")]
    pub output_file: PathBuf,

    #[arg(value_name = "SOURCE_DIR", help = "Top-level source directory of the target")]
    pub source_dir: PathBuf,

    #[arg(value_name = "BUILD_DIR", help = "Directory receiving the generated companions")]
    pub build_dir: PathBuf,

    #[arg(value_name = "GENERATOR", help = "Meta-object generator executable")]
    pub generator: PathBuf,

    #[arg(value_name = "ECHO", help = "Executable used for colored progress messages")]
    pub echo: PathBuf,

    #[arg(
        long,
        help = "Update the manifest's timestamp after writing so the next build pass runs again"
    )]
    pub touch: bool,
}

impl CliArgs {
    pub fn run_paths(&self) -> RunPaths {
        RunPaths {
            output_file: self.output_file.clone(),
            source_dir: self.source_dir.clone(),
            build_dir: self.build_dir.clone(),
            generator: self.generator.clone(),
            echo: self.echo.clone(),
            touch: self.touch,
        }
    }
}
