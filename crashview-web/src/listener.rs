use crashview::event::{EventKind, Listen};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// A DOM event listener that is removed when dropped.
///
/// The closure lives exactly as long as the registration, so it's never called after
/// it's freed and never leaks.
pub struct Listener {
	target: web_sys::EventTarget,
	kind: EventKind,
	closure: Closure<dyn FnMut()>,
}

impl Listener {
	/// Registers the callback; a target that refuses it is logged, leaving the guard inert.
	pub fn new(target: &web_sys::EventTarget, kind: EventKind, callback: impl FnMut() + 'static) -> Self {
		let closure = Closure::<dyn FnMut()>::new(callback);

		if let Err(err) = target.add_event_listener_with_callback(&kind.to_string(), closure.as_ref().unchecked_ref()) {
			tracing::warn!(%kind, ?err, "failed to add listener");
		}

		Self {
			target: target.clone(),
			kind,
			closure,
		}
	}

	pub fn kind(&self) -> EventKind {
		self.kind
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let res = self
			.target
			.remove_event_listener_with_callback(&self.kind.to_string(), self.closure.as_ref().unchecked_ref());

		if let Err(err) = res {
			tracing::warn!(kind = %self.kind, ?err, "failed to remove listener");
		}
	}
}

/// The browser window, as the source of `resize` events.
pub struct BrowserWindow {
	window: web_sys::Window,
}

impl BrowserWindow {
	pub fn new(window: web_sys::Window) -> Self {
		Self { window }
	}
}

impl Listen for BrowserWindow {
	type Listener = Listener;

	fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Listener {
		Listener::new(&self.window, kind, callback)
	}
}
