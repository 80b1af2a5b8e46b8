use bl::protocol::{RecordKey, RecordPatch, WindowBounds};
use bl::{Error, RecordStore};
use tempfile::TempDir;

use super::JsonRecordStore;

#[tokio::test]
async fn missing_file_reads_as_empty_record() {
	let dir = TempDir::new().unwrap();
	let store = JsonRecordStore::new(dir.path().join("record.json"));

	let record = store.get(&RecordKey::ALL).await.unwrap();
	assert!(!record.is_configured());
	assert!(!store.path().exists());
}

#[tokio::test]
async fn set_merges_and_keeps_wire_names() {
	let dir = TempDir::new().unwrap();
	let store = JsonRecordStore::new(dir.path().join("nested").join("record.json"));

	store.set(RecordPatch::new().credential_hash("abc").locked(true)).await.unwrap();
	store
		.set(RecordPatch::new().window_bounds(Some(WindowBounds {
			width: 800,
			height: 600,
			top: 0,
			left: 10,
		})))
		.await
		.unwrap();

	let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
	assert_eq!(raw["masterHash"], "abc");
	assert_eq!(raw["isLocked"], true);
	assert_eq!(raw["windowBounds"]["width"], 800);

	let record = store.get(&[RecordKey::CredentialHash, RecordKey::Locked]).await.unwrap();
	assert_eq!(record.credential_hash.as_deref(), Some("abc"));
	assert!(record.window_bounds.is_none());
}

#[tokio::test]
async fn remove_drops_only_named_keys() {
	let dir = TempDir::new().unwrap();
	let store = JsonRecordStore::new(dir.path().join("record.json"));
	store.set(RecordPatch::new().credential_hash("a").recovery_hash("b").locked(false)).await.unwrap();

	store.remove(&[RecordKey::CredentialHash, RecordKey::RecoveryHash]).await.unwrap();

	let items = store.load().unwrap();
	assert_eq!(items.len(), 1);
	assert_eq!(items["isLocked"], false);
}

#[tokio::test]
async fn non_object_file_is_a_store_error() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("record.json");
	std::fs::write(&path, "[1, 2]").unwrap();

	let err = JsonRecordStore::new(&path).get(&[RecordKey::Locked]).await.unwrap_err();
	assert!(matches!(err, Error::Store(_)));
}
