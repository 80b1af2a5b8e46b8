//! Lock states, triggers, and transition outcomes.

use bl_protocol::LockRecord;
use serde::{Deserialize, Serialize};

/// Where the browser stands, derived from the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
	/// No password configured.
	Unconfigured,
	Unlocked,
	Locked,
}

impl LockState {
	/// State described by `record`. A missing credential wins over a stale `locked` flag.
	pub fn of(record: &LockRecord) -> Self {
		match (record.is_configured(), record.is_locked()) {
			(false, _) => LockState::Unconfigured,
			(true, false) => LockState::Unlocked,
			(true, true) => LockState::Locked,
		}
	}
}

impl std::fmt::Display for LockState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LockState::Unconfigured => write!(f, "unconfigured"),
			LockState::Unlocked => write!(f, "unlocked"),
			LockState::Locked => write!(f, "locked"),
		}
	}
}

/// What asked for the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTrigger {
	Manual,
	Startup,
	Installed,
	/// A top-level navigation while locked.
	Navigation,
}

impl std::fmt::Display for LockTrigger {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LockTrigger::Manual => write!(f, "manual"),
			LockTrigger::Startup => write!(f, "startup"),
			LockTrigger::Installed => write!(f, "installed"),
			LockTrigger::Navigation => write!(f, "navigation"),
		}
	}
}

/// Result of an engage-lock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
	/// Fresh lock: the session was captured and the lock surface opened.
	Engaged { saved_tabs: usize },
	/// Already locked: the lock surface was focused or reopened, nothing captured.
	Reaffirmed,
	/// Another request was still running and re-affirms on behalf of this one.
	Coalesced,
	/// No password configured; the setup reminder was checked instead.
	NotConfigured { reminded: bool },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn state_follows_record() {
		let mut record = LockRecord::default();
		assert_eq!(LockState::of(&record), LockState::Unconfigured);

		record.locked = Some(true);
		assert_eq!(LockState::of(&record), LockState::Unconfigured);

		record.credential_hash = Some("h".into());
		assert_eq!(LockState::of(&record), LockState::Locked);

		record.locked = Some(false);
		assert_eq!(LockState::of(&record), LockState::Unlocked);
	}
}
