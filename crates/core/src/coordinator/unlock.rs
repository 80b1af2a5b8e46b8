//! Verification and session restore.

use std::collections::HashSet;

use bl_protocol::{CreateWindow, LockRecord, RecordKey, RecordPatch, WindowId};
use tracing::{debug, info, warn};

use super::LockCoordinator;
use crate::busy::BusyGuard;
use crate::credentials;
use crate::digest;
use crate::error::Result;
use crate::host::{Clock, RecordStore, WindowManager};
use crate::session::{self, TabClass};

impl<W, S, C> LockCoordinator<W, S, C>
where
	W: WindowManager,
	S: RecordStore,
	C: Clock,
{
	/// Unlocks with the password.
	///
	/// Returns `true` only when the password matched and the session was
	/// restored. A wrong password, a store or window failure, and a request
	/// arriving while another verification is in flight all return `false`.
	pub async fn verify_secret(&self, candidate: &str) -> bool {
		let Some(guard) = self.verifying.try_acquire(self.clock.now_ms()) else {
			debug!(target = "bl.unlock", "verification already in flight; ignoring");
			return false;
		};

		match self.unlock_with_secret(candidate, &guard).await {
			Ok(unlocked) => unlocked,
			Err(err) => {
				warn!(target = "bl.unlock", error = %err, "password verification failed");
				false
			}
		}
	}

	/// Unlocks with the one-time recovery code, then clears the credentials
	/// and opens the setup surface so a new password is chosen.
	pub async fn verify_recovery_code(&self, candidate: &str) -> bool {
		match self.unlock_with_recovery_code(candidate.trim()).await {
			Ok(unlocked) => unlocked,
			Err(err) => {
				warn!(target = "bl.unlock", error = %err, "recovery verification failed");
				false
			}
		}
	}

	async fn unlock_with_secret(&self, candidate: &str, guard: &BusyGuard<'_>) -> Result<bool> {
		let record = self
			.store
			.get(&[RecordKey::CredentialHash, RecordKey::SavedSession, RecordKey::WindowBounds])
			.await?;
		if !digest::matches(candidate, record.credential_hash.as_deref()) {
			info!(target = "bl.unlock", "password rejected");
			return Ok(false);
		}

		self.restore(record, Some(guard)).await?;
		info!(target = "bl.unlock", "unlocked with password");
		Ok(true)
	}

	async fn unlock_with_recovery_code(&self, candidate: &str) -> Result<bool> {
		let record = self
			.store
			.get(&[RecordKey::RecoveryHash, RecordKey::SavedSession, RecordKey::WindowBounds])
			.await?;
		if !digest::matches(candidate, record.recovery_hash.as_deref()) {
			info!(target = "bl.unlock", "recovery code rejected");
			return Ok(false);
		}

		self.restore(record, None).await?;
		credentials::clear(&self.store).await?;
		info!(target = "bl.unlock", "unlocked with recovery code; credentials cleared");
		self.open_setup_surface().await?;
		Ok(true)
	}

	/// Reopens the saved session in one new window and closes everything else.
	async fn restore(&self, record: LockRecord, guard: Option<&BusyGuard<'_>>) -> Result<()> {
		let urls = session::dedup_preserving_order(record.saved_session.unwrap_or_default());

		self.store.set(RecordPatch::new().locked(false).saved_session(&[])).await?;

		let previous = self.windows.windows().await?;
		let urls = if urls.is_empty() { vec![self.config.blank_page.clone()] } else { urls };
		let restored = self
			.windows
			.create_window(CreateWindow::normal(urls).with_bounds(record.window_bounds))
			.await?;
		if let Some(guard) = guard {
			guard.expire_at(self.clock.now_ms().saturating_add(self.config.busy_release_ms));
		}
		debug!(target = "bl.session", window = %restored.id, tabs = restored.tabs.len(), "session window created");

		self.close_windows_except(previous.iter().map(|w| w.id), restored.id).await;

		self.clock.sleep(self.config.settle_delay()).await;
		if let Err(err) = self.prune_duplicate_tabs(restored.id).await {
			warn!(target = "bl.session", window = %restored.id, error = %err, "duplicate tab cleanup failed");
		}
		Ok(())
	}

	/// Closes tabs in `window` whose address repeats an earlier tab's.
	///
	/// The window manager may restore its own copy of the previous session
	/// into the new window; those copies show up here as duplicates.
	async fn prune_duplicate_tabs(&self, window: WindowId) -> Result<usize> {
		let tabs = self.windows.tabs(window).await?;
		let mut seen = HashSet::new();
		let mut closed = 0;

		for tab in &tabs {
			let Some(url) = tab.resolved_url() else { continue };
			if session::classify(url, &self.config) != TabClass::External {
				continue;
			}
			if seen.insert(url) {
				continue;
			}
			match self.windows.close_tab(tab.id).await {
				Ok(()) => closed += 1,
				Err(err) => debug!(target = "bl.session", tab = %tab.id, error = %err, "tab already gone"),
			}
		}

		if closed > 0 {
			debug!(target = "bl.session", %window, closed, "pruned duplicate tabs");
		}
		Ok(closed)
	}
}
