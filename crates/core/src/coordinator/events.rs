//! Entry points for browser events and page messages.

use bl_protocol::{NavigationEvent, RecordKey, Request, Response};
use tracing::{debug, warn};

use super::LockCoordinator;
use crate::error::Result;
use crate::host::{Clock, RecordStore, WindowManager};
use crate::state::{LockOutcome, LockTrigger};

impl<W, S, C> LockCoordinator<W, S, C>
where
	W: WindowManager,
	S: RecordStore,
	C: Clock,
{
	/// Answers a message from the lock or setup page.
	///
	/// Authentication failures and internal errors produce the same answer.
	pub async fn handle(&self, request: Request) -> Response {
		debug!(target = "bl.message", kind = request.kind(), "message received");
		match request {
			Request::VerifySecret { password } => self.verify_secret(&password).await.into(),
			Request::VerifyRecoveryCode { recovery_code } => self.verify_recovery_code(&recovery_code).await.into(),
			Request::ManualLock => self.lock_from_event(LockTrigger::Manual).await.into(),
		}
	}

	/// Browser started.
	pub async fn on_startup(&self) -> bool {
		self.lock_from_event(LockTrigger::Startup).await
	}

	/// Extension installed or updated.
	pub async fn on_installed(&self) -> bool {
		self.lock_from_event(LockTrigger::Installed).await
	}

	/// Navigation guard: re-affirms the lock when a locked browser tries to
	/// load anything other than the extension's own pages.
	///
	/// Returns `true` when the lock was re-affirmed.
	pub async fn on_navigation(&self, event: &NavigationEvent) -> Result<bool> {
		if !event.is_top_level() || self.config.is_extension_page(&event.url) {
			return Ok(false);
		}
		let record = self.store.get(&[RecordKey::Locked]).await?;
		if !record.is_locked() {
			return Ok(false);
		}

		debug!(target = "bl.nav", url = %event.url, "navigation while locked");
		let outcome = self.engage_lock(LockTrigger::Navigation).await?;
		Ok(matches!(outcome, LockOutcome::Reaffirmed | LockOutcome::Coalesced))
	}

	async fn lock_from_event(&self, trigger: LockTrigger) -> bool {
		match self.engage_lock(trigger).await {
			Ok(outcome) => {
				debug!(target = "bl.lock", %trigger, ?outcome, "lock request handled");
				true
			}
			Err(err) => {
				warn!(target = "bl.lock", %trigger, error = %err, "lock request failed");
				false
			}
		}
	}
}
