use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "climatrack.log";
const DEFAULT_FILTER: &str = "climatrack=info";

/// `RUST_LOG` wins over the built-in `climatrack=info` default
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber: readable lines on stderr, JSON lines in
/// `<log_dir>/climatrack.log.<date>` rotated daily.
///
/// If `log_dir` cannot be created the file layer is skipped and only the
/// console receives events.
pub fn init_logging(log_dir: &str) {
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let file = match fs::create_dir_all(log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // flushing stops when the guard drops; keep it for the whole process
            std::mem::forget(guard);
            Some(fmt::layer().json().with_writer(writer))
        }
        Err(e) => {
            eprintln!("log directory {log_dir} unavailable ({e}), logging to console only");
            None
        }
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console)
        .with(file)
        .init();
}
