//! Password setup, change and recovery reset.
//!
//! These mirror what the extension's settings page does: they only touch the
//! record and never windows, so a reset here leaves a locked browser locked
//! until it is unlocked there.

use bl::credentials as creds;
use tracing::info;

use super::CommandContext;
use crate::error::{CliError, Result};
use crate::output::{RecoveryCodeData, ResetData, TextOutput};

pub async fn setup(ctx: &CommandContext, password: &str, confirm: &str) -> Result<RecoveryCodeData> {
	if password != confirm {
		return Err(CliError::ConfirmationMismatch);
	}
	let code = creds::configure(&ctx.store, password, &mut rand::thread_rng()).await?;
	info!(target = "bl.cli", store = %ctx.store.path().display(), "password set");
	Ok(RecoveryCodeData {
		recovery_code: code.into_string(),
	})
}

pub async fn change_password(ctx: &CommandContext, current: &str, new_password: &str, confirm: &str) -> Result<RecoveryCodeData> {
	if new_password != confirm {
		return Err(CliError::ConfirmationMismatch);
	}
	let code = creds::change_secret(&ctx.store, current, new_password, &mut rand::thread_rng()).await?;
	info!(target = "bl.cli", store = %ctx.store.path().display(), "password changed");
	Ok(RecoveryCodeData {
		recovery_code: code.into_string(),
	})
}

pub async fn reset(ctx: &CommandContext, recovery_code: &str) -> Result<ResetData> {
	if !creds::reset_with_recovery_code(&ctx.store, recovery_code).await? {
		return Err(CliError::RecoveryRejected);
	}
	let state = creds::state(&ctx.store).await?;
	Ok(ResetData { cleared: true, state })
}

impl TextOutput for RecoveryCodeData {
	fn render_text(&self) -> String {
		format!("Recovery code: {}\nWrite it down; it is shown only once.", self.recovery_code)
	}
}

impl TextOutput for ResetData {
	fn render_text(&self) -> String {
		format!("Credentials cleared; state is now {}.", self.state)
	}
}
