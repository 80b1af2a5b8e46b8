//! Log setup for the command line. Output goes to stderr so stdout carries
//! only command results.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` enables info and `-vv` debug.
pub fn init_logging(verbose: u8) {
	let fallback = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr).with_target(verbose > 1))
		.try_init();
}
