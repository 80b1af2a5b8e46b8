use std::time::Duration;

use async_trait::async_trait;
use bl::Clock;
use js_sys::{Date, Promise};
use wasm_bindgen_futures::JsFuture;

use crate::chrome;

/// [`Clock`] backed by `Date.now()` and `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsClock;

#[async_trait(?Send)]
impl Clock for JsClock {
	fn now_ms(&self) -> u64 {
		Date::now() as u64
	}

	async fn sleep(&self, duration: Duration) {
		let ms = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
		let promise = Promise::new(&mut |resolve, _reject| {
			chrome::set_timeout(&resolve, ms);
		});
		// setTimeout never rejects.
		let _ = JsFuture::from(promise).await;
	}
}
