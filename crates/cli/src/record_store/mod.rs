//! Lock record persisted as a JSON file.
//!
//! The file holds the same flat key/value items the extension keeps in
//! browser storage, so a record exported from the browser can be inspected
//! and administered here. Every request re-reads the file; writes merge into
//! what is on disk and save the whole object back.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bl::protocol::{LockRecord, RecordKey, RecordPatch};
use bl::{Error, RecordStore, Result};
use serde_json::{Map, Value};
use tracing::debug;

#[cfg(test)]
mod tests;

/// Default record location: `<config dir>/bl/record.json`.
pub fn default_store_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("bl").join("record.json"))
}

#[derive(Debug, Clone)]
pub struct JsonRecordStore {
	path: PathBuf,
}

impl JsonRecordStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads every stored item. A missing file is an empty record.
	pub fn load(&self) -> Result<Map<String, Value>> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
			Err(err) => return Err(Error::Store(format!("{}: {err}", self.path.display()))),
		};
		if content.trim().is_empty() {
			return Ok(Map::new());
		}
		match serde_json::from_str(&content)? {
			Value::Object(items) => Ok(items),
			other => Err(Error::Store(format!("{}: expected a JSON object, found {other}", self.path.display()))),
		}
	}

	pub fn save(&self, items: &Map<String, Value>) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).map_err(|err| Error::Store(format!("{}: {err}", parent.display())))?;
		}
		let json = serde_json::to_string_pretty(items)?;
		fs::write(&self.path, json).map_err(|err| Error::Store(format!("{}: {err}", self.path.display())))?;
		debug!(target = "bl.cli", path = %self.path.display(), items = items.len(), "record saved");
		Ok(())
	}
}

#[async_trait(?Send)]
impl RecordStore for JsonRecordStore {
	async fn get(&self, keys: &[RecordKey]) -> Result<LockRecord> {
		let mut items = self.load()?;
		let selected: Map<String, Value> = keys
			.iter()
			.filter_map(|key| items.remove(key.as_str()).map(|value| (key.as_str().to_string(), value)))
			.collect();
		Ok(LockRecord::from_map(selected)?)
	}

	async fn set(&self, patch: RecordPatch) -> Result<()> {
		if patch.is_empty() {
			return Ok(());
		}
		let mut items = self.load()?;
		items.extend(patch.into_map());
		self.save(&items)
	}

	async fn remove(&self, keys: &[RecordKey]) -> Result<()> {
		let mut items = self.load()?;
		let before = items.len();
		for key in keys {
			items.remove(key.as_str());
		}
		if items.len() == before {
			return Ok(());
		}
		self.save(&items)
	}
}
