//! Window and tab shapes reported by, and sent to, the window manager.

use serde::{Deserialize, Serialize};

use crate::record::WindowBounds;

/// Window manager identifier for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i32);

/// Window manager identifier for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i32);

impl std::fmt::Display for WindowId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::fmt::Display for TabId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Kind of browser window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
	#[default]
	Normal,
	Popup,
	Panel,
	App,
	Devtools,
}

/// A tab as reported by the window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
	pub id: TabId,
	pub window_id: WindowId,
	/// Committed address. Missing while the tab has not loaded anything yet.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Address the tab is navigating to, before it commits.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pending_url: Option<String>,
}

impl TabInfo {
	/// Address the tab is showing or about to show.
	pub fn resolved_url(&self) -> Option<&str> {
		self.pending_url.as_deref().or(self.url.as_deref())
	}
}

/// A window as reported by the window manager, populated with its tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
	pub id: WindowId,
	#[serde(rename = "type", default)]
	pub window_type: WindowType,
	#[serde(default)]
	pub focused: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub top: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub left: Option<i32>,
	#[serde(default)]
	pub tabs: Vec<TabInfo>,
}

impl WindowInfo {
	/// Geometry of the window, when the window manager reported all of it.
	pub fn bounds(&self) -> Option<WindowBounds> {
		Some(WindowBounds {
			width: self.width?,
			height: self.height?,
			top: self.top?,
			left: self.left?,
		})
	}

	/// Returns `true` when any tab of this window resolves to an address accepted by `pred`.
	pub fn has_tab(&self, mut pred: impl FnMut(&str) -> bool) -> bool {
		self.tabs.iter().filter_map(TabInfo::resolved_url).any(|url| pred(url))
	}
}

/// Parameters for creating a window.
///
/// Serializes to the window manager's create payload: addresses go under
/// `url` and geometry fields are omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWindow {
	#[serde(rename = "url")]
	pub urls: Vec<String>,
	#[serde(rename = "type")]
	pub window_type: WindowType,
	pub focused: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub top: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub left: Option<i32>,
}

impl CreateWindow {
	/// A focused normal window opening `urls`.
	pub fn normal(urls: Vec<String>) -> Self {
		Self {
			urls,
			window_type: WindowType::Normal,
			focused: true,
			width: None,
			height: None,
			top: None,
			left: None,
		}
	}

	/// A focused popup window at `url` with the given size.
	pub fn popup(url: impl Into<String>, width: i32, height: i32) -> Self {
		Self {
			urls: vec![url.into()],
			window_type: WindowType::Popup,
			focused: true,
			width: Some(width),
			height: Some(height),
			top: None,
			left: None,
		}
	}

	/// Applies a captured geometry; `None` leaves placement to the window manager.
	pub fn with_bounds(mut self, bounds: Option<WindowBounds>) -> Self {
		if let Some(b) = bounds {
			self.width = Some(b.width);
			self.height = Some(b.height);
			self.top = Some(b.top);
			self.left = Some(b.left);
		}
		self
	}
}
