use async_trait::async_trait;
use bl::protocol::{CreateWindow, TabId, TabInfo, WindowId, WindowInfo};
use bl::{Error, Result, WindowManager};
use serde_json::json;
use wasm_bindgen::JsValue;

use crate::chrome;

/// [`WindowManager`] over `chrome.windows` and `chrome.tabs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeWindows;

fn host_error(err: JsValue) -> Error {
	Error::WindowManager(chrome::describe(&err))
}

fn decode_error(err: serde_wasm_bindgen::Error) -> Error {
	Error::WindowManager(err.to_string())
}

fn encode(value: &serde_json::Value) -> Result<JsValue> {
	chrome::to_js(value).map_err(decode_error)
}

#[async_trait(?Send)]
impl WindowManager for ChromeWindows {
	async fn windows(&self) -> Result<Vec<WindowInfo>> {
		let query = encode(&json!({ "populate": true }))?;
		let raw = chrome::windows_get_all(&query).await.map_err(host_error)?;
		serde_wasm_bindgen::from_value(raw).map_err(decode_error)
	}

	async fn create_window(&self, request: CreateWindow) -> Result<WindowInfo> {
		let data = chrome::to_js(&request).map_err(decode_error)?;
		let raw = chrome::windows_create(&data).await.map_err(host_error)?;
		serde_wasm_bindgen::from_value(raw).map_err(decode_error)
	}

	async fn close_window(&self, id: WindowId) -> Result<()> {
		chrome::windows_remove(id.0).await.map_err(host_error)?;
		Ok(())
	}

	async fn focus_window(&self, id: WindowId) -> Result<()> {
		let info = encode(&json!({ "focused": true }))?;
		chrome::windows_update(id.0, &info).await.map_err(host_error)?;
		Ok(())
	}

	async fn tabs(&self, window: WindowId) -> Result<Vec<TabInfo>> {
		let query = encode(&json!({ "windowId": window }))?;
		let raw = chrome::tabs_query(&query).await.map_err(host_error)?;
		serde_wasm_bindgen::from_value(raw).map_err(decode_error)
	}

	async fn close_tab(&self, id: TabId) -> Result<()> {
		chrome::tabs_remove(id.0).await.map_err(host_error)?;
		Ok(())
	}
}
