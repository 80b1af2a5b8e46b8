use std::path::PathBuf;

use bl::LockState;
use serde::{Deserialize, Serialize};

/// Current schema version for command output.
pub const SCHEMA_VERSION: u32 = 1;

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub schema_version: u32,
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
}

/// Error information for failed commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
}

/// Standardized error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	AuthFailed,
	NotConfigured,
	AlreadyConfigured,
	Locked,
	InvalidInput,
	ConfigError,
	StoreError,
	IoError,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::AuthFailed => write!(f, "AUTH_FAILED"),
			ErrorCode::NotConfigured => write!(f, "NOT_CONFIGURED"),
			ErrorCode::AlreadyConfigured => write!(f, "ALREADY_CONFIGURED"),
			ErrorCode::Locked => write!(f, "LOCKED"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
			ErrorCode::StoreError => write!(f, "STORE_ERROR"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

/// Payload of `bl status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
	pub state: LockState,
	pub saved_tabs: usize,
	pub has_window_bounds: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub next_reminder_at: Option<u64>,
	pub reminder_due: bool,
	pub store: PathBuf,
}

/// Payload of commands that issue a recovery code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryCodeData {
	pub recovery_code: String,
}

/// Payload of `bl reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetData {
	pub cleared: bool,
	pub state: LockState,
}

/// Payload of `bl session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
	pub locked: bool,
	/// Addresses as stored, duplicates included.
	pub saved: Vec<String>,
	/// What an unlock would open.
	pub restores: Vec<String>,
}

/// Plain-text rendering of a payload.
pub trait TextOutput {
	fn render_text(&self) -> String;
}
