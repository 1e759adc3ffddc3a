use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "WAKTUMAIN_LOG";
const LOG_FILE: &str = "waktumain.log";

/// Routes `tracing` output to `<state_dir>/waktumain.log`; the dashboard owns
/// the terminal. Keep the returned guard alive until exit so buffered lines
/// are flushed.
///
/// The filter comes from `WAKTUMAIN_LOG`, then `RUST_LOG`, then `default_level`.
pub fn init_logging(state_dir: &Path, default_level: &str) -> Result<WorkerGuard, Box<dyn Error>> {
	fs::create_dir_all(state_dir)?;

	let appender = tracing_appender::rolling::never(state_dir, LOG_FILE);
	let (writer, guard) = tracing_appender::non_blocking(appender);

	let filter = match env::var(LOG_ENV) {
		Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
			eprintln!("warning: invalid {LOG_ENV} directive ({err}); using {default_level}");
			EnvFilter::new(default_level)
		}),
		Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(writer)
		.with_ansi(false)
		.with_target(false)
		.try_init()
		.map_err(|err| err as Box<dyn Error>)?;

	Ok(guard)
}
