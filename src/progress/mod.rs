//! Progress reporting for automoc runs

mod echo;
mod handler;
mod logging;

pub use echo::EchoHandler;
pub use handler::{MultiHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;
