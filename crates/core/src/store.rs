//! In-process record store.

use std::sync::Arc;

use async_trait::async_trait;
use bl_protocol::{LockRecord, RecordKey, RecordPatch};
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::host::RecordStore;

/// Record store backed by a shared in-memory map.
///
/// Clones share the same map, so a handle kept by the caller observes every
/// write the coordinator makes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	items: Arc<Mutex<Map<String, Value>>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Copy of every stored item.
	pub fn snapshot(&self) -> Map<String, Value> {
		self.items.lock().clone()
	}

	/// Full record as currently stored.
	pub fn record(&self) -> Result<LockRecord> {
		Ok(LockRecord::from_map(self.snapshot())?)
	}
}

#[async_trait(?Send)]
impl RecordStore for MemoryStore {
	async fn get(&self, keys: &[RecordKey]) -> Result<LockRecord> {
		let items = self.items.lock();
		let selected: Map<String, Value> = keys
			.iter()
			.filter_map(|key| items.get(key.as_str()).map(|value| (key.as_str().to_string(), value.clone())))
			.collect();
		Ok(LockRecord::from_map(selected)?)
	}

	async fn set(&self, patch: RecordPatch) -> Result<()> {
		self.items.lock().extend(patch.into_map());
		Ok(())
	}

	async fn remove(&self, keys: &[RecordKey]) -> Result<()> {
		let mut items = self.items.lock();
		for key in keys {
			items.remove(key.as_str());
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn get_returns_only_requested_keys() {
		let store = MemoryStore::new();
		store.set(RecordPatch::new().credential_hash("h").locked(true)).await.unwrap();

		let record = store.get(&[RecordKey::Locked]).await.unwrap();
		assert_eq!(record.locked, Some(true));
		assert_eq!(record.credential_hash, None);
	}

	#[tokio::test]
	async fn remove_clears_fields_and_clones_share_state() {
		let store = MemoryStore::new();
		let observer = store.clone();
		store.set(RecordPatch::new().credential_hash("h").recovery_hash("r")).await.unwrap();
		store.remove(&[RecordKey::CredentialHash, RecordKey::RecoveryHash]).await.unwrap();

		assert_eq!(observer.record().unwrap(), LockRecord::default());
	}
}
