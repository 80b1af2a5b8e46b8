//! Command dispatch and the shared command context.

mod credentials;
mod session;
mod status;

use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use bl::LockConfig;
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use crate::output::{OutputFormat, ResultBuilder, TextOutput, print_result};
use crate::record_store::{JsonRecordStore, default_store_path};

/// What every command runs against.
#[derive(Debug)]
pub struct CommandContext {
	pub store: JsonRecordStore,
	pub config: LockConfig,
}

impl CommandContext {
	pub fn from_cli(cli: &Cli) -> Result<Self> {
		let path = match &cli.store {
			Some(path) => path.clone(),
			None => default_store_path().ok_or(CliError::NoStorePath)?,
		};
		let config = match &cli.config {
			Some(path) => {
				let json = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.clone(), source })?;
				LockConfig::from_json_str(&json)?
			}
			None => LockConfig::default(),
		};
		debug!(target = "bl.cli", store = %path.display(), "command context ready");
		Ok(Self {
			store: JsonRecordStore::new(path),
			config,
		})
	}
}

pub async fn dispatch(cli: Cli) -> Result<()> {
	let name = cli.command.name();
	let format = cli.format;
	let ctx = match CommandContext::from_cli(&cli) {
		Ok(ctx) => ctx,
		Err(err) => return emit::<()>(name, format, Err(err)),
	};

	match cli.command {
		Commands::Status => emit(name, format, status::run(&ctx, now_ms()).await),
		Commands::Setup { password, confirm } => emit(name, format, credentials::setup(&ctx, &password, &confirm).await),
		Commands::ChangePassword {
			current,
			new_password,
			confirm,
		} => emit(name, format, credentials::change_password(&ctx, &current, &new_password, &confirm).await),
		Commands::Reset { recovery_code } => emit(name, format, credentials::reset(&ctx, &recovery_code).await),
		Commands::Session => emit(name, format, session::run(&ctx).await),
	}
}

/// Prints the outcome as an envelope and passes the error on.
fn emit<T: Serialize + TextOutput>(command: &str, format: OutputFormat, result: Result<T>) -> Result<()> {
	match result {
		Ok(data) => {
			print_result(&ResultBuilder::new(command).data(data).build(), format);
			Ok(())
		}
		Err(err) => {
			print_result(&ResultBuilder::<()>::new(command).error(err.code(), err.to_string()).build(), format);
			Err(err)
		}
	}
}

fn now_ms() -> u64 {
	SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default()
}
