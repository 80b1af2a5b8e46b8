//! Event listener registration.
//!
//! Listeners are registered synchronously while the worker script runs, so
//! the browser can deliver the event that woke the worker. Each closure is
//! leaked: the worker keeps them for its whole lifetime.

use std::rc::Rc;

use bl::protocol::{NavigationEvent, Request};
use js_sys::Function;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::chrome;
use crate::Coordinator;

pub fn install(coordinator: Rc<Coordinator>) {
	let startup = {
		let coordinator = Rc::clone(&coordinator);
		Closure::<dyn FnMut()>::new(move || {
			let coordinator = Rc::clone(&coordinator);
			spawn_local(async move {
				coordinator.on_startup().await;
			});
		})
	};
	chrome::on_startup(&startup);
	startup.forget();

	let installed = {
		let coordinator = Rc::clone(&coordinator);
		Closure::<dyn FnMut(JsValue)>::new(move |_details: JsValue| {
			let coordinator = Rc::clone(&coordinator);
			spawn_local(async move {
				coordinator.on_installed().await;
			});
		})
	};
	chrome::on_installed(&installed);
	installed.forget();

	let navigation = {
		let coordinator = Rc::clone(&coordinator);
		Closure::<dyn FnMut(JsValue)>::new(move |details: JsValue| {
			let event: NavigationEvent = match serde_wasm_bindgen::from_value(details) {
				Ok(event) => event,
				Err(err) => {
					debug!(target = "bl.nav", error = %err, "unreadable navigation event");
					return;
				}
			};
			let coordinator = Rc::clone(&coordinator);
			spawn_local(async move {
				if let Err(err) = coordinator.on_navigation(&event).await {
					warn!(target = "bl.nav", error = %err, "navigation guard failed");
				}
			});
		})
	};
	chrome::on_before_navigate(&navigation);
	navigation.forget();

	let messages = Closure::<dyn FnMut(JsValue, JsValue, Function) -> bool>::new(move |message: JsValue, _sender: JsValue, send_response: Function| {
		// Messages this worker does not understand are left for other listeners.
		let request: Request = match serde_wasm_bindgen::from_value(message) {
			Ok(request) => request,
			Err(_) => return false,
		};
		let coordinator = Rc::clone(&coordinator);
		spawn_local(async move {
			let response = coordinator.handle(request).await;
			let reply = chrome::to_js(&response).unwrap_or(JsValue::UNDEFINED);
			if let Err(err) = send_response.call1(&JsValue::NULL, &reply) {
				debug!(target = "bl.message", error = %chrome::describe(&err), "sender went away before the response");
			}
		});
		// Keeps the channel open for the asynchronous response.
		true
	});
	chrome::on_message(&messages);
	messages.forget();
}
