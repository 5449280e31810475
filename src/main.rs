use automoc::cli::CliArgs;
use automoc::progress::{EchoHandler, LoggingHandler, MultiHandler};
use automoc::util::logging::{init_logging, LoggingConfig};
use automoc::{run, AutomocConfig, ProcessRunner, VERSION};

use clap::Parser;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config = AutomocConfig::default();
    init_logging(LoggingConfig::from_config(&config));

    debug!("automoc v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    if let Err(e) = config.validate() {
        eprintln!("automoc: {}", e);
        std::process::exit(1);
    }

    let mut progress = MultiHandler::default();
    progress.push(Arc::new(LoggingHandler));
    progress.push(Arc::new(EchoHandler::new(
        args.echo.clone(),
        config.color.clone(),
        config.verbose,
    )));
    let runner = ProcessRunner::new(config.verbose);

    let exit_code = match run(args.run_paths(), config, Arc::new(runner), Arc::new(progress)).await {
        Ok(status) => status.exit_code(),
        Err(e) => {
            eprintln!("automoc: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}
