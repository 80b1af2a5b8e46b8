//! Session capture: which tabs are worth restoring, and where.

use std::collections::HashSet;

use bl_protocol::{WindowBounds, WindowInfo, WindowType};
use url::Url;

use crate::config::LockConfig;

/// How a tab address is treated at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClass {
	/// An http(s) page that will be reopened on unlock.
	External,
	/// One of the extension's own pages.
	Extension,
	/// Browser-internal or non-web address (`chrome://`, `about:`, `file:`, ...).
	Internal,
}

/// Classifies a tab address.
pub fn classify(url: &str, config: &LockConfig) -> TabClass {
	if config.is_extension_page(url) {
		return TabClass::Extension;
	}
	match Url::parse(url) {
		Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => TabClass::External,
		_ => TabClass::Internal,
	}
}

/// Removes repeated addresses, keeping the first occurrence of each.
pub fn dedup_preserving_order<I>(urls: I) -> Vec<String>
where
	I: IntoIterator<Item = String>,
{
	let mut seen = HashSet::new();
	urls.into_iter().filter(|url| seen.insert(url.clone())).collect()
}

/// Geometry of the window the restored session should reuse.
///
/// Prefers the first normal window and falls back to the first window of any
/// type.
pub fn representative_bounds(windows: &[WindowInfo]) -> Option<WindowBounds> {
	windows
		.iter()
		.find(|w| w.window_type == WindowType::Normal)
		.or_else(|| windows.first())
		.and_then(WindowInfo::bounds)
}

/// State captured at the unlocked to locked transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
	pub urls: Vec<String>,
	pub bounds: Option<WindowBounds>,
}

/// Captures external tab addresses across all windows, in window then tab order.
pub fn capture(windows: &[WindowInfo], config: &LockConfig) -> SessionSnapshot {
	let urls = windows
		.iter()
		.flat_map(|w| w.tabs.iter())
		.filter_map(|tab| tab.url.as_deref())
		.filter(|url| classify(url, config) == TabClass::External)
		.map(str::to_string);

	SessionSnapshot {
		urls: dedup_preserving_order(urls),
		bounds: representative_bounds(windows),
	}
}
