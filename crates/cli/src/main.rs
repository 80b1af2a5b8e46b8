use bl_cli::cli::Cli;
use bl_cli::{commands, logging};
use clap::Parser;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli).await {
		error!(target = "bl.cli", error = %err, "command failed");
		std::process::exit(1);
	}
}
