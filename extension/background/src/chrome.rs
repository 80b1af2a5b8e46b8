//! Raw bindings to the extension APIs used by the background worker.
//!
//! Promise-returning calls are imported as `async` functions with `catch`, so
//! a rejected promise (for example removing a window that is already gone)
//! surfaces as `Err` instead of throwing.

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = getAll)]
	pub async fn windows_get_all(query: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = create)]
	pub async fn windows_create(data: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = remove)]
	pub async fn windows_remove(window_id: i32) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = update)]
	pub async fn windows_update(window_id: i32, info: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
	pub async fn tabs_query(query: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = remove)]
	pub async fn tabs_remove(tab_id: i32) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
	pub async fn storage_get(keys: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
	pub async fn storage_set(items: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = remove)]
	pub async fn storage_remove(keys: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(js_namespace = ["chrome", "runtime"], js_name = getURL)]
	pub fn runtime_get_url(path: &str) -> String;

	#[wasm_bindgen(js_namespace = ["chrome", "runtime", "onStartup"], js_name = addListener)]
	pub fn on_startup(callback: &Closure<dyn FnMut()>);

	#[wasm_bindgen(js_namespace = ["chrome", "runtime", "onInstalled"], js_name = addListener)]
	pub fn on_installed(callback: &Closure<dyn FnMut(JsValue)>);

	#[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
	pub fn on_message(callback: &Closure<dyn FnMut(JsValue, JsValue, Function) -> bool>);

	#[wasm_bindgen(js_namespace = ["chrome", "webNavigation", "onBeforeNavigate"], js_name = addListener)]
	pub fn on_before_navigate(callback: &Closure<dyn FnMut(JsValue)>);

	#[wasm_bindgen(js_name = setTimeout)]
	pub fn set_timeout(handler: &Function, timeout_ms: i32) -> JsValue;
}

/// Converts `value` to a plain JS object, with maps as objects rather than `Map`s.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
	value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Best-effort text for a rejected promise or thrown value.
pub fn describe(err: &JsValue) -> String {
	if let Some(message) = err.as_string() {
		return message;
	}
	if let Some(error) = err.dyn_ref::<js_sys::Error>() {
		return String::from(error.message());
	}
	js_sys::Reflect::get(err, &JsValue::from_str("message"))
		.ok()
		.and_then(|message| message.as_string())
		.unwrap_or_else(|| format!("{err:?}"))
}
