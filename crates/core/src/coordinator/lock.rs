//! Engaging and re-affirming the lock.

use bl_protocol::{CreateWindow, RecordKey, RecordPatch, WindowId, WindowInfo};
use tracing::{debug, info};

use super::LockCoordinator;
use crate::error::Result;
use crate::host::{Clock, RecordStore, WindowManager};
use crate::session;
use crate::state::{LockOutcome, LockTrigger};

impl<W, S, C> LockCoordinator<W, S, C>
where
	W: WindowManager,
	S: RecordStore,
	C: Clock,
{
	/// Locks the browser, or keeps it locked.
	///
	/// Without a configured password nothing is locked and the setup reminder
	/// is checked instead. When already locked the saved session is left
	/// untouched and only the lock surface is brought back.
	///
	/// A request made while another is in flight returns
	/// [`LockOutcome::Coalesced`] at once; the in-flight request re-affirms
	/// on its behalf before it finishes.
	pub async fn engage_lock(&self, trigger: LockTrigger) -> Result<LockOutcome> {
		let Some(_locking) = self.locking.try_acquire(self.clock.now_ms()) else {
			debug!(target = "bl.lock", %trigger, "lock already in flight; queueing re-affirm");
			self.pending_reaffirm.set(Some(trigger));
			return Ok(LockOutcome::Coalesced);
		};
		self.pending_reaffirm.set(None);

		let outcome = self.engage_or_reaffirm(trigger).await;
		let replayed = self.replay_pending_reaffirm().await;
		let outcome = outcome?;
		replayed?;
		Ok(outcome)
	}

	async fn engage_or_reaffirm(&self, trigger: LockTrigger) -> Result<LockOutcome> {
		// Read only after taking the flag so a lock that just finished is seen.
		let record = self.store.get(&[RecordKey::CredentialHash, RecordKey::Locked]).await?;
		if !record.is_configured() {
			let reminded = self.remind_setup().await?;
			return Ok(LockOutcome::NotConfigured { reminded });
		}

		if record.is_locked() {
			self.reaffirm_lock(trigger).await?;
			return Ok(LockOutcome::Reaffirmed);
		}

		let windows = self.windows.windows().await?;
		let snapshot = session::capture(&windows, &self.config);
		let saved_tabs = snapshot.urls.len();

		self.store
			.set(RecordPatch::new().locked(true).saved_session(&snapshot.urls).window_bounds(snapshot.bounds))
			.await?;
		info!(target = "bl.lock", %trigger, saved_tabs, windows = windows.len(), "browser locked");

		self.open_lock_surface(windows.iter().map(|w| w.id)).await?;
		Ok(LockOutcome::Engaged { saved_tabs })
	}

	/// Re-affirms for requests coalesced while the flag was held.
	///
	/// Windows opened after the in-flight request listed them are only closed
	/// here. Runs until no request is left waiting.
	async fn replay_pending_reaffirm(&self) -> Result<()> {
		while let Some(trigger) = self.pending_reaffirm.take() {
			let record = self.store.get(&[RecordKey::CredentialHash, RecordKey::Locked]).await?;
			if record.is_configured() && record.is_locked() {
				debug!(target = "bl.lock", %trigger, "replaying coalesced lock request");
				self.reaffirm_lock(trigger).await?;
			}
		}
		Ok(())
	}

	/// Brings back the lock surface without touching the saved session.
	async fn reaffirm_lock(&self, trigger: LockTrigger) -> Result<()> {
		let windows = self.windows.windows().await?;
		let surface = windows.iter().find(|w| w.has_tab(|url| self.config.is_lock_surface(url))).map(|w| w.id);

		match surface {
			Some(id) => {
				debug!(target = "bl.lock", %trigger, window = %id, "lock surface present; focusing");
				self.windows.focus_window(id).await?;
				self.close_windows_except(windows.iter().map(|w| w.id), id).await;
			}
			None => {
				debug!(target = "bl.lock", %trigger, "lock surface missing; reopening");
				self.open_lock_surface(windows.iter().map(|w| w.id)).await?;
			}
		}
		Ok(())
	}

	/// Opens the lock surface, then closes `to_close` once it exists.
	async fn open_lock_surface<I>(&self, to_close: I) -> Result<WindowInfo>
	where
		I: IntoIterator<Item = WindowId>,
	{
		let size = self.config.lock_surface;
		let surface = self
			.windows
			.create_window(CreateWindow::popup(self.config.lock_surface_url(), size.width, size.height))
			.await?;
		self.close_windows_except(to_close, surface.id).await;
		Ok(surface)
	}
}
