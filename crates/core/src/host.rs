//! Capabilities the coordinator needs from its host.
//!
//! The browser's window, tab and storage APIs are single-threaded and
//! callback driven; they are modelled here as `?Send` async traits so the
//! same coordinator runs on a browser event loop and on a current-thread
//! test runtime.

use std::time::Duration;

use async_trait::async_trait;
use bl_protocol::{CreateWindow, LockRecord, RecordKey, RecordPatch, TabId, TabInfo, WindowId, WindowInfo};

use crate::error::Result;

/// External window and tab manager.
#[async_trait(?Send)]
pub trait WindowManager {
	/// All open windows, populated with their tabs.
	async fn windows(&self) -> Result<Vec<WindowInfo>>;

	/// Creates a window and returns it once the window manager confirms it.
	async fn create_window(&self, request: CreateWindow) -> Result<WindowInfo>;

	async fn close_window(&self, id: WindowId) -> Result<()>;

	/// Brings a window to the front.
	async fn focus_window(&self, id: WindowId) -> Result<()>;

	async fn tabs(&self, window: WindowId) -> Result<Vec<TabInfo>>;

	async fn close_tab(&self, id: TabId) -> Result<()>;
}

/// Key-value store holding the lock record.
///
/// Reads see this process's earlier writes. Nothing stronger is assumed: a
/// single [`set`](RecordStore::set) is the unit of atomicity.
#[async_trait(?Send)]
pub trait RecordStore {
	/// Reads the requested fields. Missing fields come back as `None`.
	async fn get(&self, keys: &[RecordKey]) -> Result<LockRecord>;

	/// Writes every field of `patch` in one request.
	async fn set(&self, patch: RecordPatch) -> Result<()>;

	async fn remove(&self, keys: &[RecordKey]) -> Result<()>;
}

/// Wall clock and timer.
#[async_trait(?Send)]
pub trait Clock {
	/// Milliseconds since the Unix epoch.
	fn now_ms(&self) -> u64;

	async fn sleep(&self, duration: Duration);
}
