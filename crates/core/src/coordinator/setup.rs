//! Password setup and the setup reminder.

use bl_protocol::{CreateWindow, RecordKey, RecordPatch, WindowId};
use tracing::{debug, info};

use super::LockCoordinator;
use crate::credentials;
use crate::error::Result;
use crate::host::{Clock, RecordStore, WindowManager};
use crate::recovery::RecoveryCode;

impl<W, S, C> LockCoordinator<W, S, C>
where
	W: WindowManager,
	S: RecordStore,
	C: Clock,
{
	/// First-time setup. Returns the recovery code, which is shown once.
	pub async fn configure(&self, secret: &str) -> Result<RecoveryCode> {
		credentials::configure(&self.store, secret, &mut rand::thread_rng()).await
	}

	/// Changes the password and issues a new recovery code.
	pub async fn change_secret(&self, current: &str, new_secret: &str) -> Result<RecoveryCode> {
		credentials::change_secret(&self.store, current, new_secret, &mut rand::thread_rng()).await
	}

	/// Clears the credentials with the recovery code, without touching windows.
	pub async fn reset_with_recovery_code(&self, code: &str) -> Result<bool> {
		credentials::reset_with_recovery_code(&self.store, code).await
	}

	/// Shows the setup prompt if no password is configured and the reminder is due.
	///
	/// A due reminder opens (or focuses) the setup surface and pushes the next
	/// reminder out by the configured interval. A reminder that is not yet due
	/// still focuses a setup surface that is already open. Returns `true` when
	/// the reminder fired.
	pub async fn remind_setup(&self) -> Result<bool> {
		let record = self.store.get(&[RecordKey::CredentialHash, RecordKey::NextReminderAt]).await?;
		if record.is_configured() {
			return Ok(false);
		}

		let now = self.clock.now_ms();
		let due = record.next_reminder_at.is_none_or(|at| now > at);
		if !due {
			if let Some(id) = self.find_setup_surface().await? {
				debug!(target = "bl.setup", window = %id, "reminder not due; focusing open setup surface");
				self.windows.focus_window(id).await?;
			}
			return Ok(false);
		}

		self.open_setup_surface().await?;
		let next = now.saturating_add(self.config.reminder_interval_ms);
		self.store.set(RecordPatch::new().next_reminder_at(next)).await?;
		info!(target = "bl.setup", next_reminder_at = next, "setup reminder shown");
		Ok(true)
	}

	/// Focuses the setup surface, opening it only if none is open.
	pub(super) async fn open_setup_surface(&self) -> Result<()> {
		if let Some(id) = self.find_setup_surface().await? {
			self.windows.focus_window(id).await?;
			return Ok(());
		}

		let size = self.config.setup_surface;
		let window = self
			.windows
			.create_window(CreateWindow::popup(self.config.setup_surface_url(), size.width, size.height))
			.await?;
		debug!(target = "bl.setup", window = %window.id, "setup surface opened");
		Ok(())
	}

	async fn find_setup_surface(&self) -> Result<Option<WindowId>> {
		let windows = self.windows.windows().await?;
		Ok(windows.iter().find(|w| w.has_tab(|url| self.config.is_setup_surface(url))).map(|w| w.id))
	}
}
