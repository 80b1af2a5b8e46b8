//! In-memory window manager, clock, and store wrappers for coordinator tests.
//!
//! Every host call yields once before doing its work, so concurrent
//! coordinator calls driven by `tokio::join!` interleave at the same points
//! they would in a browser.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use bl::protocol::{CreateWindow, LockRecord, RecordKey, RecordPatch, TabId, TabInfo, WindowId, WindowInfo, WindowType};
use bl::{Clock, Error, LockConfig, LockCoordinator, MemoryStore, RecordStore, Result, WindowManager};

pub const ORIGIN: &str = "chrome-extension://test-ext/";
pub const LOCK_URL: &str = "chrome-extension://test-ext/lock.html";
pub const SETUP_URL: &str = "chrome-extension://test-ext/popup.html?mode=setup";

#[derive(Debug, Default)]
struct FakeState {
	next_window: i32,
	next_tab: i32,
	windows: Vec<WindowInfo>,
	created: Vec<CreateWindow>,
	focused: Vec<WindowId>,
	closed_tabs: Vec<TabId>,
	/// Windows whose close request fails while the window stays open.
	stuck: HashSet<WindowId>,
	/// Extra addresses the "browser" adds to every new normal window.
	auto_restore: Vec<String>,
	/// The next tab listing never resolves.
	stall_next_tabs: bool,
	tabs_stalled: bool,
}

/// Window manager fake. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakeWindows {
	state: Rc<RefCell<FakeState>>,
}

impl FakeWindows {
	pub fn new() -> Self {
		let fake = Self::default();
		{
			let mut state = fake.state.borrow_mut();
			state.next_window = 1;
			state.next_tab = 100;
		}
		fake
	}

	/// Opens a window directly, as the user would.
	pub fn open(&self, window_type: WindowType, urls: &[&str]) -> WindowId {
		let urls = urls.iter().map(|u| u.to_string()).collect();
		self.insert(window_type, urls, Some((1280, 800, 40, 60))).id
	}

	/// Closes a window behind the coordinator's back.
	pub fn close_externally(&self, id: WindowId) {
		self.state.borrow_mut().windows.retain(|w| w.id != id);
	}

	pub fn make_stuck(&self, id: WindowId) {
		self.state.borrow_mut().stuck.insert(id);
	}

	pub fn set_auto_restore(&self, urls: &[&str]) {
		self.state.borrow_mut().auto_restore = urls.iter().map(|u| u.to_string()).collect();
	}

	/// Makes the next `tabs` call hang, as a browser that stops answering would.
	pub fn stall_next_tabs(&self) {
		self.state.borrow_mut().stall_next_tabs = true;
	}

	/// Whether a `tabs` call is currently hanging.
	pub fn tabs_stalled(&self) -> bool {
		self.state.borrow().tabs_stalled
	}

	pub fn all(&self) -> Vec<WindowInfo> {
		self.state.borrow().windows.clone()
	}

	pub fn ids(&self) -> Vec<WindowId> {
		self.state.borrow().windows.iter().map(|w| w.id).collect()
	}

	pub fn urls(&self, id: WindowId) -> Vec<String> {
		self.state
			.borrow()
			.windows
			.iter()
			.find(|w| w.id == id)
			.map(|w| w.tabs.iter().filter_map(|t| t.resolved_url().map(str::to_string)).collect())
			.unwrap_or_default()
	}

	pub fn created(&self) -> Vec<CreateWindow> {
		self.state.borrow().created.clone()
	}

	pub fn focus_log(&self) -> Vec<WindowId> {
		self.state.borrow().focused.clone()
	}

	pub fn closed_tabs(&self) -> Vec<TabId> {
		self.state.borrow().closed_tabs.clone()
	}

	/// Open windows showing a page whose address starts with `prefix`.
	pub fn windows_showing(&self, prefix: &str) -> Vec<WindowId> {
		self.state
			.borrow()
			.windows
			.iter()
			.filter(|w| w.has_tab(|url| url.starts_with(prefix)))
			.map(|w| w.id)
			.collect()
	}

	pub fn normal_windows(&self) -> Vec<WindowInfo> {
		self.state.borrow().windows.iter().filter(|w| w.window_type == WindowType::Normal).cloned().collect()
	}

	fn insert(&self, window_type: WindowType, urls: Vec<String>, geometry: Option<(i32, i32, i32, i32)>) -> WindowInfo {
		let mut state = self.state.borrow_mut();
		let id = WindowId(state.next_window);
		state.next_window += 1;

		let mut tabs = Vec::new();
		for url in urls {
			let tab = TabId(state.next_tab);
			state.next_tab += 1;
			tabs.push(TabInfo {
				id: tab,
				window_id: id,
				url: Some(url),
				pending_url: None,
			});
		}

		let window = WindowInfo {
			id,
			window_type,
			focused: false,
			width: geometry.map(|g| g.0),
			height: geometry.map(|g| g.1),
			top: geometry.map(|g| g.2),
			left: geometry.map(|g| g.3),
			tabs,
		};
		state.windows.push(window.clone());
		window
	}
}

#[async_trait(?Send)]
impl WindowManager for FakeWindows {
	async fn windows(&self) -> Result<Vec<WindowInfo>> {
		tokio::task::yield_now().await;
		Ok(self.all())
	}

	async fn create_window(&self, request: CreateWindow) -> Result<WindowInfo> {
		tokio::task::yield_now().await;
		let mut urls = request.urls.clone();
		if request.window_type == WindowType::Normal {
			urls.extend(self.state.borrow().auto_restore.iter().cloned());
		}
		let geometry = match (request.width, request.height) {
			(Some(w), Some(h)) => Some((w, h, request.top.unwrap_or(0), request.left.unwrap_or(0))),
			_ => Some((1024, 768, 0, 0)),
		};
		let window = self.insert(request.window_type, urls, geometry);
		self.state.borrow_mut().created.push(request);
		Ok(window)
	}

	async fn close_window(&self, id: WindowId) -> Result<()> {
		tokio::task::yield_now().await;
		let mut state = self.state.borrow_mut();
		if state.stuck.contains(&id) {
			return Err(Error::WindowManager(format!("window {id} refused to close")));
		}
		let before = state.windows.len();
		state.windows.retain(|w| w.id != id);
		if state.windows.len() == before {
			return Err(Error::WindowManager(format!("No window with id: {id}.")));
		}
		Ok(())
	}

	async fn focus_window(&self, id: WindowId) -> Result<()> {
		tokio::task::yield_now().await;
		let mut state = self.state.borrow_mut();
		if !state.windows.iter().any(|w| w.id == id) {
			return Err(Error::WindowManager(format!("No window with id: {id}.")));
		}
		for window in &mut state.windows {
			window.focused = window.id == id;
		}
		state.focused.push(id);
		Ok(())
	}

	async fn tabs(&self, window: WindowId) -> Result<Vec<TabInfo>> {
		tokio::task::yield_now().await;
		let stall = {
			let mut state = self.state.borrow_mut();
			state.tabs_stalled = std::mem::take(&mut state.stall_next_tabs);
			state.tabs_stalled
		};
		if stall {
			std::future::pending::<()>().await;
		}
		self.state
			.borrow()
			.windows
			.iter()
			.find(|w| w.id == window)
			.map(|w| w.tabs.clone())
			.ok_or_else(|| Error::WindowManager(format!("No window with id: {window}.")))
	}

	async fn close_tab(&self, id: TabId) -> Result<()> {
		tokio::task::yield_now().await;
		let mut state = self.state.borrow_mut();
		for window in &mut state.windows {
			window.tabs.retain(|t| t.id != id);
		}
		state.closed_tabs.push(id);
		Ok(())
	}
}

/// Clock whose time only moves when told to, or when something sleeps.
#[derive(Debug, Clone)]
pub struct ManualClock {
	now: Rc<Cell<u64>>,
}

impl ManualClock {
	pub fn new(start_ms: u64) -> Self {
		Self {
			now: Rc::new(Cell::new(start_ms)),
		}
	}

	pub fn advance(&self, ms: u64) {
		self.now.set(self.now.get() + ms);
	}
}

#[async_trait(?Send)]
impl Clock for ManualClock {
	fn now_ms(&self) -> u64 {
		self.now.get()
	}

	async fn sleep(&self, duration: Duration) {
		self.advance(duration.as_millis() as u64);
		tokio::task::yield_now().await;
	}
}

/// Store wrapper that can be told to fail every request.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
	inner: MemoryStore,
	failing: Rc<Cell<bool>>,
}

impl FlakyStore {
	pub fn new(inner: MemoryStore) -> Self {
		Self {
			inner,
			failing: Rc::new(Cell::new(false)),
		}
	}

	pub fn set_failing(&self, failing: bool) {
		self.failing.set(failing);
	}

	fn check(&self) -> Result<()> {
		if self.failing.get() {
			return Err(Error::Store("storage unavailable".to_string()));
		}
		Ok(())
	}
}

#[async_trait(?Send)]
impl RecordStore for FlakyStore {
	async fn get(&self, keys: &[RecordKey]) -> Result<LockRecord> {
		self.check()?;
		self.inner.get(keys).await
	}

	async fn set(&self, patch: RecordPatch) -> Result<()> {
		self.check()?;
		self.inner.set(patch).await
	}

	async fn remove(&self, keys: &[RecordKey]) -> Result<()> {
		self.check()?;
		self.inner.remove(keys).await
	}
}

pub type TestCoordinator<S = MemoryStore> = LockCoordinator<FakeWindows, S, ManualClock>;

/// Coordinator wired to fresh fakes, plus handles onto them.
pub struct Harness<S = MemoryStore> {
	pub coordinator: TestCoordinator<S>,
	pub windows: FakeWindows,
	pub store: MemoryStore,
	pub clock: ManualClock,
}

pub const START_MS: u64 = 1_700_000_000_000;

pub fn harness() -> Harness {
	let windows = FakeWindows::new();
	let store = MemoryStore::new();
	let clock = ManualClock::new(START_MS);
	let coordinator = LockCoordinator::new(windows.clone(), store.clone(), clock.clone(), LockConfig::for_origin(ORIGIN));
	Harness {
		coordinator,
		windows,
		store,
		clock,
	}
}

pub fn flaky_harness() -> (Harness<FlakyStore>, FlakyStore) {
	let windows = FakeWindows::new();
	let store = MemoryStore::new();
	let flaky = FlakyStore::new(store.clone());
	let clock = ManualClock::new(START_MS);
	let coordinator = LockCoordinator::new(windows.clone(), flaky.clone(), clock.clone(), LockConfig::for_origin(ORIGIN));
	(
		Harness {
			coordinator,
			windows,
			store,
			clock,
		},
		flaky,
	)
}

pub fn strings(urls: &[&str]) -> Vec<String> {
	urls.iter().map(|u| u.to_string()).collect()
}
