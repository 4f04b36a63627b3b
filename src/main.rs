use std::io::IsTerminal;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`debug`, `haul=trace`, ...).
const LOG_ENV: &str = "HAUL_LOG";

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let dispatcher = match haul::dispatcher() {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            error!("invalid command registry: {}", err);
            return ExitCode::FAILURE;
        }
    };
    dispatcher.run_os(std::env::args_os().skip(1)).await
}
