//! Messages exchanged with the lock and setup pages, and browser events.

use serde::{Deserialize, Serialize};

use crate::window::TabId;

/// Request sent by an extension page to the background coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
	/// Unlock with the configured password.
	#[serde(rename = "validatePassword")]
	VerifySecret { password: String },
	/// Unlock with the one-time recovery code and clear the credentials.
	#[serde(rename = "validateRecovery")]
	VerifyRecoveryCode {
		#[serde(rename = "recoveryCode")]
		recovery_code: String,
	},
	/// Lock the browser now.
	#[serde(rename = "manualLock")]
	ManualLock,
}

impl Request {
	/// Short name used in logs. Never includes the submitted secret.
	pub fn kind(&self) -> &'static str {
		match self {
			Request::VerifySecret { .. } => "validatePassword",
			Request::VerifyRecoveryCode { .. } => "validateRecovery",
			Request::ManualLock => "manualLock",
		}
	}
}

/// Answer to a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
	pub success: bool,
}

impl Response {
	pub fn ok() -> Self {
		Self { success: true }
	}

	pub fn failed() -> Self {
		Self { success: false }
	}
}

impl From<bool> for Response {
	fn from(success: bool) -> Self {
		Self { success }
	}
}

/// A navigation intercepted before it commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEvent {
	#[serde(default)]
	pub tab_id: Option<TabId>,
	/// `0` for the top-level frame.
	pub frame_id: i64,
	pub url: String,
}

impl NavigationEvent {
	pub fn is_top_level(&self) -> bool {
		self.frame_id == 0
	}
}
