//! Background worker of the browser lock extension.
//!
//! Binds the lock coordinator to `chrome.windows`, `chrome.tabs` and
//! `chrome.storage.local`, and feeds it the browser's lifecycle, navigation
//! and message events.

mod chrome;
mod clock;
mod listeners;
mod logging;
mod storage;
mod windows;

use std::rc::Rc;

use bl::{LockConfig, LockCoordinator};
use tracing::info;
use wasm_bindgen::prelude::*;

pub use clock::JsClock;
pub use storage::ChromeStorage;
pub use windows::ChromeWindows;

pub(crate) type Coordinator = LockCoordinator<ChromeWindows, ChromeStorage, JsClock>;

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
	logging::init_logging();

	let config = LockConfig::for_origin(chrome::runtime_get_url(""));
	info!(target = "bl.ext", origin = %config.extension_origin, "background worker started");

	let coordinator = Rc::new(LockCoordinator::new(ChromeWindows, ChromeStorage, JsClock, config));
	listeners::install(coordinator);
}
