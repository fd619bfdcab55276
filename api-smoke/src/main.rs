use std::io;
use std::process::ExitCode;

use api_smoke::console::Console;
use api_smoke::runner::exit_status;
use api_smoke::{SmokeConfig, SmokeRunner};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let config = SmokeConfig::parse();

    #[cfg(feature = "tracing")]
    init_tracing(config.log_level.as_deref());

    let run = match config.client() {
        Ok(client) => {
            let runner = SmokeRunner::new(client, config);
            let mut console = Console::new(io::stdout().lock());
            runner.run(&mut console).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = &run {
        eprintln!("api-smoke: {}", e);
    }
    ExitCode::from(exit_status(&run))
}

/// Diagnostics go to stderr so stdout carries only the report.
#[cfg(feature = "tracing")]
fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = match log_level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
