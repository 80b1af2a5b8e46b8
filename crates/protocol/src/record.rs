//! Persisted lock record and the partial writes applied to it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Window geometry captured at lock time and reapplied on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
	pub width: i32,
	pub height: i32,
	pub top: i32,
	pub left: i32,
}

/// Fields of the persisted record, named as they appear in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
	CredentialHash,
	RecoveryHash,
	Locked,
	SavedSession,
	WindowBounds,
	NextReminderAt,
}

impl RecordKey {
	/// Every key, in storage order.
	pub const ALL: [RecordKey; 6] = [
		RecordKey::CredentialHash,
		RecordKey::RecoveryHash,
		RecordKey::Locked,
		RecordKey::SavedSession,
		RecordKey::WindowBounds,
		RecordKey::NextReminderAt,
	];

	/// Storage key name.
	pub fn as_str(self) -> &'static str {
		match self {
			RecordKey::CredentialHash => "masterHash",
			RecordKey::RecoveryHash => "recoveryHash",
			RecordKey::Locked => "isLocked",
			RecordKey::SavedSession => "savedSession",
			RecordKey::WindowBounds => "windowBounds",
			RecordKey::NextReminderAt => "nextReminder",
		}
	}
}

impl std::fmt::Display for RecordKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The lock record as read back from storage.
///
/// Every field is optional: the record is created implicitly by the first
/// write and a read only returns the keys that were requested and present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockRecord {
	#[serde(rename = "masterHash", default, skip_serializing_if = "Option::is_none")]
	pub credential_hash: Option<String>,
	#[serde(rename = "recoveryHash", default, skip_serializing_if = "Option::is_none")]
	pub recovery_hash: Option<String>,
	#[serde(rename = "isLocked", default, skip_serializing_if = "Option::is_none")]
	pub locked: Option<bool>,
	#[serde(rename = "savedSession", default, skip_serializing_if = "Option::is_none")]
	pub saved_session: Option<Vec<String>>,
	#[serde(rename = "windowBounds", default, skip_serializing_if = "Option::is_none")]
	pub window_bounds: Option<WindowBounds>,
	#[serde(rename = "nextReminder", default, skip_serializing_if = "Option::is_none")]
	pub next_reminder_at: Option<u64>,
}

impl LockRecord {
	/// Builds a record from the raw key/value map held by a store.
	///
	/// Unknown keys are ignored so foreign data sharing the store does not
	/// break reads.
	pub fn from_map(map: Map<String, Value>) -> serde_json::Result<Self> {
		serde_json::from_value(Value::Object(map))
	}

	/// Returns `true` when a credential hash is present.
	pub fn is_configured(&self) -> bool {
		self.credential_hash.is_some()
	}

	/// Returns `true` when the record says the browser is locked.
	pub fn is_locked(&self) -> bool {
		self.locked.unwrap_or(false)
	}
}

/// A partial write to the lock record.
///
/// Only the fields set on the patch are written. A field can be written as
/// JSON `null`, which is how an absent window geometry is recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
	fields: Map<String, Value>,
}

impl RecordPatch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn credential_hash(self, hash: impl Into<String>) -> Self {
		self.with(RecordKey::CredentialHash, Value::String(hash.into()))
	}

	pub fn recovery_hash(self, hash: impl Into<String>) -> Self {
		self.with(RecordKey::RecoveryHash, Value::String(hash.into()))
	}

	pub fn locked(self, locked: bool) -> Self {
		self.with(RecordKey::Locked, Value::Bool(locked))
	}

	pub fn saved_session(self, urls: &[String]) -> Self {
		let urls = urls.iter().cloned().map(Value::String).collect();
		self.with(RecordKey::SavedSession, Value::Array(urls))
	}

	/// Writes the geometry through its serde form; `None` is written as `null`.
	pub fn window_bounds(self, bounds: Option<WindowBounds>) -> Self {
		self.with(RecordKey::WindowBounds, serde_json::json!(bounds))
	}

	pub fn next_reminder_at(self, at_ms: u64) -> Self {
		self.with(RecordKey::NextReminderAt, Value::from(at_ms))
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Returns the raw storage items.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.fields
	}

	pub fn into_map(self) -> Map<String, Value> {
		self.fields
	}

	fn with(mut self, key: RecordKey, value: Value) -> Self {
		self.fields.insert(key.as_str().to_string(), value);
		self
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn record_reads_extension_storage_layout() {
		let stored = json!({
			"masterHash": "abc",
			"isLocked": true,
			"savedSession": ["https://a.com"],
			"windowBounds": null,
			"nextReminder": 1700000000000u64,
			"unrelated": 5,
		});
		let Value::Object(map) = stored else { unreachable!() };
		let record = LockRecord::from_map(map).unwrap();

		assert!(record.is_configured());
		assert!(record.is_locked());
		assert_eq!(record.recovery_hash, None);
		assert_eq!(record.window_bounds, None);
		assert_eq!(record.saved_session.as_deref(), Some(&["https://a.com".to_string()][..]));
		assert_eq!(record.next_reminder_at, Some(1_700_000_000_000));
	}

	#[test]
	fn patch_writes_null_bounds_explicitly() {
		let patch = RecordPatch::new().locked(true).saved_session(&[]).window_bounds(None);
		let map = patch.into_map();
		assert_eq!(map.get("isLocked"), Some(&Value::Bool(true)));
		assert_eq!(map.get("savedSession"), Some(&json!([])));
		assert_eq!(map.get("windowBounds"), Some(&Value::Null));
	}

	#[test]
	fn patch_bounds_deserialize_back() {
		let bounds = WindowBounds {
			width: 1200,
			height: 800,
			top: 10,
			left: 20,
		};
		let map = RecordPatch::new().window_bounds(Some(bounds)).into_map();
		assert_eq!(map.get("windowBounds"), Some(&json!({ "width": 1200, "height": 800, "top": 10, "left": 20 })));
		let record = LockRecord::from_map(map).unwrap();
		assert_eq!(record.window_bounds, Some(bounds));
	}

	#[test]
	fn empty_record_is_unconfigured_and_unlocked() {
		let record = LockRecord::default();
		assert!(!record.is_configured());
		assert!(!record.is_locked());
	}
}
