use clap::Parser as _;
use tracing::{Level, debug};

use vfsh::{
    application::{Application, ApplicationError},
    cli::Cli,
};

#[compio::main]
#[snafu::report]
async fn main() -> Result<(), ApplicationError> {
    let cli = Cli::parse();
    if let Some(level) = cli.log_level.to_tracing_level() {
        init_logging(level);
    }
    debug!("vfsh {} starting with {cli:?}", env!("CARGO_PKG_VERSION"));

    Application::run(cli).await
}

// Logs go to stderr so they never interleave with command output.
fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
