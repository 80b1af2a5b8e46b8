//! Coordinator configuration: surface addresses, sizes, and timings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Width and height of a popup surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
	pub width: i32,
	pub height: i32,
}

/// Settings for a [`LockCoordinator`](crate::LockCoordinator).
///
/// Every field has a default; a JSON override only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LockConfig {
	/// Origin of the extension's own pages, e.g. `chrome-extension://<id>/`.
	pub extension_origin: String,
	/// Lock surface page, relative to the extension origin.
	pub lock_page: String,
	/// Setup prompt page, relative to the extension origin.
	pub setup_page: String,
	/// Page opened on unlock when no session was saved.
	pub blank_page: String,
	pub lock_surface: SurfaceSize,
	pub setup_surface: SurfaceSize,
	/// Cooldown between two setup reminders.
	pub reminder_interval_ms: u64,
	/// Wait before pruning duplicate tabs from a restored window.
	pub settle_delay_ms: u64,
	/// Time after a successful unlock's window creation at which the
	/// verification busy flag expires on its own.
	pub busy_release_ms: u64,
}

impl Default for LockConfig {
	fn default() -> Self {
		Self {
			extension_origin: String::new(),
			lock_page: "lock.html".to_string(),
			setup_page: "popup.html?mode=setup".to_string(),
			blank_page: "chrome://newtab/".to_string(),
			lock_surface: SurfaceSize { width: 450, height: 550 },
			setup_surface: SurfaceSize { width: 420, height: 600 },
			reminder_interval_ms: 7 * DAY_MS,
			settle_delay_ms: 500,
			busy_release_ms: 1000,
		}
	}
}

impl LockConfig {
	/// Default configuration for the extension served from `origin`.
	pub fn for_origin(origin: impl Into<String>) -> Self {
		let mut origin = origin.into();
		if !origin.is_empty() && !origin.ends_with('/') {
			origin.push('/');
		}
		Self {
			extension_origin: origin,
			..Self::default()
		}
	}

	/// Parses a JSON override on top of the defaults.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		if self.lock_page.is_empty() || self.setup_page.is_empty() {
			return Err(Error::Config("lockPage and setupPage must not be empty".to_string()));
		}
		if self.lock_page == self.setup_page {
			return Err(Error::Config("lockPage and setupPage must differ".to_string()));
		}
		Ok(())
	}

	pub fn lock_surface_url(&self) -> String {
		format!("{}{}", self.extension_origin, self.lock_page)
	}

	pub fn setup_surface_url(&self) -> String {
		format!("{}{}", self.extension_origin, self.setup_page)
	}

	/// Identifier of the extension, taken from the origin's host.
	pub fn extension_id(&self) -> Option<&str> {
		let rest = self.extension_origin.split_once("://")?.1;
		let id = rest.trim_end_matches('/');
		(!id.is_empty()).then_some(id)
	}

	/// Returns `true` for any page served by the extension itself.
	pub fn is_extension_page(&self, url: &str) -> bool {
		if !self.extension_origin.is_empty() && url.starts_with(&self.extension_origin) {
			return true;
		}
		self.extension_id().is_some_and(|id| url.contains(id))
	}

	pub fn is_lock_surface(&self, url: &str) -> bool {
		self.is_surface(url, &self.lock_page)
	}

	pub fn is_setup_surface(&self, url: &str) -> bool {
		self.is_surface(url, &self.setup_page)
	}

	pub fn settle_delay(&self) -> Duration {
		Duration::from_millis(self.settle_delay_ms)
	}

	fn is_surface(&self, url: &str, page: &str) -> bool {
		let ours = self.extension_origin.is_empty() || self.is_extension_page(url);
		ours && url.contains(page)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn origin_gets_trailing_slash() {
		let config = LockConfig::for_origin("chrome-extension://abcdef");
		assert_eq!(config.lock_surface_url(), "chrome-extension://abcdef/lock.html");
		assert_eq!(config.setup_surface_url(), "chrome-extension://abcdef/popup.html?mode=setup");
		assert_eq!(config.extension_id(), Some("abcdef"));
	}

	#[test]
	fn extension_pages_are_recognised() {
		let config = LockConfig::for_origin("chrome-extension://abcdef/");
		assert!(config.is_extension_page("chrome-extension://abcdef/lock.html"));
		assert!(config.is_lock_surface("chrome-extension://abcdef/lock.html"));
		assert!(!config.is_lock_surface("chrome-extension://abcdef/popup.html?mode=setup"));
		assert!(config.is_setup_surface("chrome-extension://abcdef/popup.html?mode=setup"));
		assert!(!config.is_extension_page("https://example.com/lock.html"));
		assert!(!config.is_lock_surface("https://example.com/lock.html"));
	}

	#[test]
	fn json_override_keeps_other_defaults() {
		let config = LockConfig::from_json_str(r#"{ "settleDelayMs": 50, "extensionOrigin": "chrome-extension://x/" }"#).unwrap();
		assert_eq!(config.settle_delay_ms, 50);
		assert_eq!(config.busy_release_ms, 1000);
		assert_eq!(config.reminder_interval_ms, 7 * DAY_MS);
		assert_eq!(config.lock_surface, SurfaceSize { width: 450, height: 550 });
	}

	#[test]
	fn json_override_rejects_clashing_pages() {
		let err = LockConfig::from_json_str(r#"{ "lockPage": "a.html", "setupPage": "a.html" }"#).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}
}
