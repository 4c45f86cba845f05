use std::{env, process::ExitCode, sync::Once, time::Instant};

use proclang::cli::{run, Command, USAGE};
use tracing::info;

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber, but only when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() -> ExitCode {
    init_tracing();

    let start = Instant::now();
    let args: Vec<String> = env::args().collect();
    let result = Command::from_args(&args).and_then(|command| run(&command));

    match result {
        Ok(()) => {
            info!(elapsed = ?start.elapsed(), "done");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {}", error);
            if error.is_usage() {
                eprintln!("{}", USAGE);
            }
            info!(elapsed = ?start.elapsed(), "failed");
            ExitCode::from(error.exit_code())
        }
    }
}
