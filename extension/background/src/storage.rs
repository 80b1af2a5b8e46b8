use async_trait::async_trait;
use bl::protocol::{LockRecord, RecordKey, RecordPatch};
use bl::{Error, RecordStore, Result};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;

use crate::chrome;

/// [`RecordStore`] over `chrome.storage.local`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeStorage;

fn store_error(err: JsValue) -> Error {
	Error::Store(chrome::describe(&err))
}

fn key_list(keys: &[RecordKey]) -> Result<JsValue> {
	let names: Vec<&str> = keys.iter().map(|key| key.as_str()).collect();
	chrome::to_js(&names).map_err(|err| Error::Store(err.to_string()))
}

#[async_trait(?Send)]
impl RecordStore for ChromeStorage {
	async fn get(&self, keys: &[RecordKey]) -> Result<LockRecord> {
		let raw = chrome::storage_get(&key_list(keys)?).await.map_err(store_error)?;
		let items: Map<String, Value> = serde_wasm_bindgen::from_value(raw).map_err(|err| Error::Store(err.to_string()))?;
		Ok(LockRecord::from_map(items)?)
	}

	async fn set(&self, patch: RecordPatch) -> Result<()> {
		if patch.is_empty() {
			return Ok(());
		}
		let items = chrome::to_js(patch.as_map()).map_err(|err| Error::Store(err.to_string()))?;
		chrome::storage_set(&items).await.map_err(store_error)?;
		Ok(())
	}

	async fn remove(&self, keys: &[RecordKey]) -> Result<()> {
		chrome::storage_remove(&key_list(keys)?).await.map_err(store_error)?;
		Ok(())
	}
}
