//! The lock coordinator: every state transition of the browser lock.
//!
//! The coordinator owns no browser state of its own beyond two in-process
//! flags; everything durable lives in the [`RecordStore`]. Each transition is
//! a sequence of awaited host calls, and other events may run at any of those
//! suspension points. The ordering rules that keep that safe:
//!
//! - `locked=true` is written in the same request as the captured session.
//! - A replacement window is created before the windows it replaces are closed.
//! - An already-locked browser is never re-captured.
//! - A lock request that arrives while another is in flight is replayed as a
//!   re-affirm before the in-flight one releases its flag.

mod events;
mod lock;
mod setup;
mod unlock;

use std::cell::Cell;

use bl_protocol::{RecordKey, WindowId};
use tracing::debug;

use crate::busy::BusyFlag;
use crate::config::LockConfig;
use crate::error::Result;
use crate::host::{Clock, RecordStore, WindowManager};
use crate::state::{LockState, LockTrigger};

/// Drives the lock state machine against a window manager, store, and clock.
pub struct LockCoordinator<W, S, C> {
	windows: W,
	store: S,
	clock: C,
	config: LockConfig,
	/// Held while a password verification is in flight.
	verifying: BusyFlag,
	/// Held while an engage or re-affirm is in flight.
	locking: BusyFlag,
	/// Latest trigger that arrived while `locking` was held.
	pending_reaffirm: Cell<Option<LockTrigger>>,
}

impl<W, S, C> LockCoordinator<W, S, C>
where
	W: WindowManager,
	S: RecordStore,
	C: Clock,
{
	pub fn new(windows: W, store: S, clock: C, config: LockConfig) -> Self {
		Self {
			windows,
			store,
			clock,
			config,
			verifying: BusyFlag::new(),
			locking: BusyFlag::new(),
			pending_reaffirm: Cell::new(None),
		}
	}

	pub fn config(&self) -> &LockConfig {
		&self.config
	}

	/// Current lock state as persisted.
	pub async fn state(&self) -> Result<LockState> {
		let record = self.store.get(&[RecordKey::CredentialHash, RecordKey::Locked]).await?;
		Ok(LockState::of(&record))
	}

	/// Returns `true` while a password verification holds the busy flag.
	pub fn is_verifying(&self) -> bool {
		self.verifying.is_held(self.clock.now_ms())
	}

	/// Closes every listed window except `keep`. Failures are logged and ignored.
	async fn close_windows_except<I>(&self, ids: I, keep: WindowId)
	where
		I: IntoIterator<Item = WindowId>,
	{
		for id in ids.into_iter().filter(|id| *id != keep) {
			if let Err(err) = self.windows.close_window(id).await {
				debug!(target = "bl.lock", window = %id, error = %err, "window already gone");
			}
		}
	}
}
